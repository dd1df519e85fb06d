//! Reading and writing node values.

use tern_ir::{Literal, NodeId, NodeKind, ScopeId, Slot};
use tern_types::SymbolKind;
use tern_value::{malformed_graph, EvalResult, Value};

use super::Interpreter;
use crate::Frame;

impl Interpreter<'_> {
    /// Current value of `node`: literals and function declarations are
    /// their own value, everything else lives in the node's slot.
    pub(crate) fn value(&self, node: NodeId, frame: &Frame) -> EvalResult {
        let n = self.forest.node(node);
        match n.kind {
            NodeKind::BasicLit => self.literal(node),
            NodeKind::FuncDecl => Ok(Value::Func(node)),
            _ => match n.slot {
                Some(slot) => self.load(slot, frame),
                None => self.bound_value(node),
            },
        }
    }

    pub(crate) fn values(&self, nodes: &[NodeId], frame: &Frame) -> EvalResult<Vec<Value>> {
        nodes.iter().map(|&n| self.value(n, frame)).collect()
    }

    fn literal(&self, node: NodeId) -> EvalResult {
        match self.forest.literal(node) {
            Some(Literal::Int(n)) => Ok(Value::int(n)),
            Some(Literal::Bool(b)) => Ok(Value::boolean(b)),
            Some(Literal::Str(s)) => Ok(Value::string(self.interner.lookup(s))),
            None => Err(malformed_graph(format!("literal {node} has no value"))),
        }
    }

    pub(crate) fn load(&self, slot: Slot, frame: &Frame) -> EvalResult {
        let found = match slot {
            Slot::Local(index) => frame.get(index),
            Slot::Global { scope, index } => self.globals.get(scope, index),
        };
        found
            .cloned()
            .ok_or_else(|| malformed_graph(format!("{slot:?} is out of range")))
    }

    /// Slotless identifier: a native value brought in by a dot-import.
    fn bound_value(&self, node: NodeId) -> EvalResult {
        let missing = || malformed_graph(format!("{node} has no slot"));
        let name = self.forest.name(node).ok_or_else(missing)?;
        let scope = self.enclosing_scope(node).ok_or_else(missing)?;
        match self.program.scopes.lookup(scope, name) {
            Some((_, sym)) if sym.kind == SymbolKind::Bound => sym.val.clone().ok_or_else(missing),
            _ => Err(missing()),
        }
    }

    /// Package scope recorded on the `File` node containing `node`.
    fn enclosing_scope(&self, node: NodeId) -> Option<ScopeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.forest.node(id);
            if n.kind == NodeKind::File {
                return n.scope;
            }
            current = n.parent;
        }
        None
    }

    pub(crate) fn store(&mut self, node: NodeId, frame: &mut Frame, value: Value) -> EvalResult<()> {
        let slot = self
            .forest
            .node(node)
            .slot
            .ok_or_else(|| malformed_graph(format!("{node} has no slot")))?;
        self.store_slot(slot, frame, value)
    }

    /// Store into `node` if it has a slot; blank targets have none.
    pub(crate) fn store_if_slotted(
        &mut self,
        node: NodeId,
        frame: &mut Frame,
        value: Value,
    ) -> EvalResult<()> {
        match self.forest.node(node).slot {
            Some(slot) => self.store_slot(slot, frame, value),
            None => Ok(()),
        }
    }

    fn store_slot(&mut self, slot: Slot, frame: &mut Frame, value: Value) -> EvalResult<()> {
        let stored = match slot {
            Slot::Local(index) => frame.set(index, value),
            Slot::Global { scope, index } => self.globals.set(scope, index, value),
        };
        if stored {
            Ok(())
        } else {
            Err(malformed_graph(format!("{slot:?} is out of range")))
        }
    }

    pub(crate) fn local_slot(&self, node: NodeId) -> EvalResult<u32> {
        match self.forest.node(node).slot {
            Some(Slot::Local(index)) => Ok(index),
            _ => Err(malformed_graph(format!("{node} has no local slot"))),
        }
    }

    /// Whether reading `node` yields a run-time value rather than a type.
    pub(crate) fn carries_value(&self, node: NodeId) -> bool {
        let n = self.forest.node(node);
        matches!(n.kind, NodeKind::BasicLit | NodeKind::FuncDecl) || n.slot.is_some()
    }
}
