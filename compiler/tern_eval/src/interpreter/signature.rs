//! Parameter and result layout read from a `FuncDecl`'s `FuncType`.

use tern_ir::{NodeId, NodeKind};
use tern_value::{malformed_graph, EvalResult};

use super::Interpreter;

impl Interpreter<'_> {
    fn func_type(&self, def: NodeId) -> EvalResult<NodeId> {
        self.forest
            .child(def, 2)
            .filter(|&id| self.forest.kind(id) == NodeKind::FuncType)
            .ok_or_else(|| malformed_graph(format!("{def} has no function type")))
    }

    /// One entry per positional parameter: the name identifier, or `None`
    /// for an unnamed parameter.
    pub(crate) fn params(&self, def: NodeId) -> EvalResult<Vec<Option<NodeId>>> {
        let ftype = self.func_type(def)?;
        let mut params = Vec::new();
        if let Some(list) = self.forest.child(ftype, 0) {
            for &field in self.forest.children(list) {
                match self.forest.children(field).split_last() {
                    Some((_, [])) | None => params.push(None),
                    Some((_, names)) => params.extend(names.iter().copied().map(Some)),
                }
            }
        }
        Ok(params)
    }

    /// Number of declared results; `a, b int` counts as two.
    pub(crate) fn result_count(&self, def: NodeId) -> EvalResult<usize> {
        let ftype = self.func_type(def)?;
        let Some(list) = self.forest.child(ftype, 1) else {
            return Ok(0);
        };
        Ok(self
            .forest
            .children(list)
            .iter()
            .map(|&field| self.forest.children(field).len().saturating_sub(1).max(1))
            .sum())
    }
}
