//! One program: its syntax, analysis results and execution state.

use tern_eval::{EvalMode, Globals, Interpreter, InterpreterBuilder, SharedOutput};
use tern_ir::{Name, NodeId, StringInterner, SyntaxForest, TreeBuilder};
use tern_types::{GlobalAnalysis, GtaError, NativeRegistry, NoSources, Program, SourceLoader};
use tern_value::{EvalError, Value};

/// Errors surfaced to the host.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Analysis(#[from] GtaError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("no function {function} in package {package}")]
    UnknownFunction { package: String, function: String },
}

pub struct Session {
    interner: StringInterner,
    forest: SyntaxForest,
    program: Program,
    natives: NativeRegistry,
    loader: Box<dyn SourceLoader>,
    mode: EvalMode,
    output: Option<SharedOutput>,
    /// Package variables, kept between calls once execution has started.
    globals: Option<Globals>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session without source imports, executing in `Interpret` mode.
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let program = Program::new(&interner);
        Session {
            interner,
            forest: SyntaxForest::new(),
            program,
            natives: NativeRegistry::new(),
            loader: Box::new(NoSources),
            mode: EvalMode::default(),
            output: None,
            globals: None,
        }
    }

    pub fn set_loader(&mut self, loader: impl SourceLoader + 'static) {
        self.loader = Box::new(loader);
    }

    pub fn set_mode(&mut self, mode: EvalMode) {
        self.mode = mode;
    }

    /// Destination of `println` and `print`.
    pub fn set_output(&mut self, output: SharedOutput) {
        self.output = Some(output);
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn forest(&self) -> &SyntaxForest {
        &self.forest
    }

    /// Annotation access for the CFG builder.
    pub fn forest_mut(&mut self) -> &mut SyntaxForest {
        &mut self.forest
    }

    /// Parser-facing construction API over the session's forest.
    pub fn tree(&mut self) -> TreeBuilder<'_> {
        TreeBuilder::new(&mut self.forest, &self.interner)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Make a native package importable under `path`.
    pub fn register_native(&mut self, path: &str, exports: &[(&str, Value)]) {
        let path = self.interner.intern(path);
        let exports: Vec<(Name, Value)> = exports
            .iter()
            .map(|(name, value)| (self.interner.intern(name), value.clone()))
            .collect();
        self.natives.register(path, exports);
    }

    /// Run global type analysis over `roots`.
    ///
    /// Package variables already stored by earlier execution keep their
    /// values; storage grows to cover whatever this run declares.
    pub fn analyze(&mut self, roots: &[NodeId]) -> Result<(), GtaError> {
        let result = GlobalAnalysis::new(
            &mut self.forest,
            &self.interner,
            &mut self.program,
            &self.natives,
            self.loader.as_mut(),
        )
        .run(roots);
        if let Some(globals) = &mut self.globals {
            globals.extend_to(&self.program.scopes);
        }
        result
    }

    /// Reject incomplete or cyclic type declarations.
    pub fn verify(&self) -> Result<(), GtaError> {
        self.program.verify(&self.interner)
    }

    /// Interpreter over the analyzed program, starting from the session's
    /// package variables.
    pub fn interpreter(&self) -> Interpreter<'_> {
        let mut builder = InterpreterBuilder::new(&self.interner, &self.forest, &self.program)
            .mode(self.mode.clone());
        if let Some(output) = &self.output {
            builder = builder.output(output.clone());
        }
        if let Some(globals) = &self.globals {
            builder = builder.globals(globals.clone());
        }
        builder.build()
    }

    /// Run the package initialization chains of `files`.
    pub fn initialize(&mut self, files: &[NodeId]) -> Result<(), SessionError> {
        self.with_interpreter(|interp| {
            files
                .iter()
                .try_for_each(|&file| interp.init_package(file))
        })?;
        Ok(())
    }

    /// Call `package.function` with `args`, returning its results.
    ///
    /// Writes to package variables persist into later calls.
    pub fn call(
        &mut self,
        package: &str,
        function: &str,
        args: &[Value],
    ) -> Result<Vec<Value>, SessionError> {
        let def = self.lookup_function(package, function)?;
        Ok(self.with_interpreter(|interp| interp.call(def, args))?)
    }

    /// Declaration node of `package.function`.
    pub fn lookup_function(&self, package: &str, function: &str) -> Result<NodeId, SessionError> {
        let unknown = || SessionError::UnknownFunction {
            package: package.to_string(),
            function: function.to_string(),
        };
        let pkg = self.interner.get(package).ok_or_else(unknown)?;
        let func = self.interner.get(function).ok_or_else(unknown)?;
        self.program.function(pkg, func).ok_or_else(unknown)
    }

    fn with_interpreter<T>(
        &mut self,
        f: impl FnOnce(&mut Interpreter<'_>) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        let globals = self
            .globals
            .take()
            .unwrap_or_else(|| Globals::new(&self.program.scopes));
        let mut builder = InterpreterBuilder::new(&self.interner, &self.forest, &self.program)
            .mode(self.mode.clone())
            .globals(globals);
        if let Some(output) = &self.output {
            builder = builder.output(output.clone());
        }
        let mut interp = builder.build();
        let result = f(&mut interp);
        self.globals = Some(interp.into_globals());
        result
    }
}
