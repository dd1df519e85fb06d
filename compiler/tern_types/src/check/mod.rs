//! Global type analysis.
//!
//! One pre-order walk per root. Declaration nodes (`File`, `ImportSpec`,
//! `TypeSpec`, `FuncDecl`, `Define`) are registered and, apart from `File`,
//! pruned; everything else is descended into. Function bodies are never
//! visited.
//!
//! Variables whose initializer mentions a declaration not seen yet are
//! parked and settled once every root of the run has been registered, so
//! the outcome does not depend on file or declaration order.

mod registration;

use tern_ir::{Name, NodeId, NodeKind, ScopeId, StringInterner, SyntaxForest, Walk, WalkControl};

use crate::{GtaError, NativeRegistry, Program, SourceLoader};

/// Names the analysis compares against.
#[derive(Copy, Clone)]
struct WellKnown {
    dot: Name,
    blank: Name,
    len: Name,
    true_: Name,
    false_: Name,
}

impl WellKnown {
    fn new(interner: &StringInterner) -> Self {
        WellKnown {
            dot: interner.intern("."),
            blank: interner.intern("_"),
            len: interner.intern("len"),
            true_: interner.intern("true"),
            false_: interner.intern("false"),
        }
    }
}

/// A global variable whose type could not be inferred on first visit.
#[derive(Clone, Debug)]
struct PendingVar {
    scope: ScopeId,
    name: Name,
    define: NodeId,
    /// Node the type is read from.
    source: NodeId,
    index: u32,
}

/// Declaration walk over a syntax forest.
pub struct GlobalAnalysis<'a> {
    forest: &'a mut SyntaxForest,
    interner: &'a StringInterner,
    program: &'a mut Program,
    natives: &'a NativeRegistry,
    loader: &'a mut dyn SourceLoader,
    /// Active scope: the package of the file being walked.
    scope: ScopeId,
    pending: Vec<PendingVar>,
    names: WellKnown,
}

impl<'a> GlobalAnalysis<'a> {
    pub fn new(
        forest: &'a mut SyntaxForest,
        interner: &'a StringInterner,
        program: &'a mut Program,
        natives: &'a NativeRegistry,
        loader: &'a mut dyn SourceLoader,
    ) -> Self {
        GlobalAnalysis {
            forest,
            interner,
            program,
            natives,
            loader,
            scope: ScopeId::UNIVERSE,
            pending: Vec::new(),
            names: WellKnown::new(interner),
        }
    }

    /// Register every declaration reachable from `roots`.
    #[tracing::instrument(level = "debug", skip_all, fields(roots = roots.len()))]
    pub fn run(&mut self, roots: &[NodeId]) -> Result<(), GtaError> {
        self.analyze_roots(roots)?;
        registration::settle_pending(self)
    }

    fn analyze_roots(&mut self, roots: &[NodeId]) -> Result<(), GtaError> {
        for &root in roots {
            self.analyze(root)?;
        }
        Ok(())
    }

    fn analyze(&mut self, root: NodeId) -> Result<(), GtaError> {
        self.scope = ScopeId::UNIVERSE;
        let mut walk = Walk::new(root);
        let mut previous = None;
        while let Some(id) = walk.next(self.forest, previous) {
            let control = self.visit(id)?;
            previous = Some((id, control));
        }
        Ok(())
    }

    fn visit(&mut self, id: NodeId) -> Result<WalkControl, GtaError> {
        match self.forest.kind(id) {
            NodeKind::File => registration::register_file(self, id),
            NodeKind::ImportSpec => registration::register_import(self, id),
            NodeKind::TypeSpec => registration::register_type_spec(self, id),
            NodeKind::FuncDecl => registration::register_func(self, id),
            NodeKind::Define => registration::register_var(self, id),
            _ => Ok(WalkControl::Descend),
        }
    }

    fn malformed(&self, node: NodeId, detail: &'static str) -> GtaError {
        GtaError::Malformed {
            kind: self.forest.kind(node),
            node,
            detail,
        }
    }

    /// Name of an identifier child, or a malformed-node error.
    fn ident_child(
        &self,
        parent: NodeId,
        index: usize,
        detail: &'static str,
    ) -> Result<(NodeId, Name), GtaError> {
        self.forest
            .child(parent, index)
            .and_then(|c| match self.forest.kind(c) {
                NodeKind::Ident => self.forest.name(c).map(|n| (c, n)),
                _ => None,
            })
            .ok_or_else(|| self.malformed(parent, detail))
    }

    fn text(&self, name: Name) -> String {
        self.interner.lookup(name).to_string()
    }
}
