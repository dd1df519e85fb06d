//! `InterpreterBuilder` for creating `Interpreter` instances.

use tern_ir::{StringInterner, SyntaxForest};
use tern_types::Program;

use super::interned_names::BuiltinNames;
use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::eval_mode::{EvalMode, ModeState};
use crate::output::{Output, SharedOutput};
use crate::Globals;

/// Builder for `Interpreter`.
///
/// Unset pieces default from the mode: `TestRun` captures output, every
/// other mode writes to stdout; the call stack takes the
/// mode's depth limit; globals are sized from the program's scope tree.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    forest: &'a SyntaxForest,
    program: &'a Program,
    mode: EvalMode,
    output: Option<SharedOutput>,
    globals: Option<Globals>,
    call_stack: Option<CallStack>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(
        interner: &'a StringInterner,
        forest: &'a SyntaxForest,
        program: &'a Program,
    ) -> Self {
        InterpreterBuilder {
            interner,
            forest,
            program,
            mode: EvalMode::default(),
            output: None,
            globals: None,
            call_stack: None,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = Some(output);
        self
    }

    /// Reuse package variables from an earlier interpreter.
    #[must_use]
    pub fn globals(mut self, globals: Globals) -> Self {
        self.globals = Some(globals);
        self
    }

    /// Override the mode's depth limit.
    #[must_use]
    pub fn call_stack(mut self, call_stack: CallStack) -> Self {
        self.call_stack = Some(call_stack);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let mode = self.mode;
        let output = self.output.unwrap_or_else(|| {
            if mode.captures_output() {
                Output::capture()
            } else {
                Output::stdout()
            }
        });
        let call_stack = self
            .call_stack
            .unwrap_or_else(|| CallStack::new(mode.max_recursion_depth()));
        let globals = self
            .globals
            .unwrap_or_else(|| Globals::new(&self.program.scopes));
        tracing::debug!(?mode, max_depth = ?call_stack.max_depth(), "interpreter built");

        Interpreter {
            interner: self.interner,
            forest: self.forest,
            program: self.program,
            globals,
            mode_state: ModeState::new(&mode),
            mode,
            call_stack,
            output,
            names: BuiltinNames::new(self.interner),
        }
    }
}
