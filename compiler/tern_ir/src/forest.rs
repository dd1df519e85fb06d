//! Arena of syntax nodes.

use crate::{Action, Literal, Name, Node, NodeId, NodeKind, ScopeId, Slot, TypeId};

/// Arena owning every node of every loaded file.
///
/// Nodes are only ever appended, so a `NodeId` stays valid for the life of
/// the forest. Children are pushed before their parent; `push` wires the
/// parent back-references.
#[derive(Clone, Debug, Default)]
pub struct SyntaxForest {
    nodes: Vec<Node>,
}

impl SyntaxForest {
    pub fn new() -> Self {
        SyntaxForest { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SyntaxForest {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn next_id(&self) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("syntax forest exceeded {} nodes", u32::MAX));
        NodeId::new(index)
    }

    /// Append a node with the given children.
    pub fn push(&mut self, kind: NodeKind, children: &[NodeId]) -> NodeId {
        let id = self.next_id();
        let mut node = Node::new(kind);
        node.children.extend_from_slice(children);
        for &child in children {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(node);
        id
    }

    /// Append an identifier leaf.
    pub fn push_ident(&mut self, name: Name) -> NodeId {
        let id = self.push(NodeKind::Ident, &[]);
        self.nodes[id.index()].name = Some(name);
        id
    }

    /// Append a literal leaf, typed after its payload.
    pub fn push_literal(&mut self, lit: Literal) -> NodeId {
        let id = self.push(NodeKind::BasicLit, &[]);
        let node = &mut self.nodes[id.index()];
        node.val = Some(lit);
        node.typ = Some(lit.type_id());
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// # Panics
    /// Panics if `id` does not belong to this forest.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    #[inline]
    pub fn child(&self, id: NodeId, i: usize) -> Option<NodeId> {
        self.node(id).child(i)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline]
    pub fn name(&self, id: NodeId) -> Option<Name> {
        self.node(id).name
    }

    #[inline]
    pub fn literal(&self, id: NodeId) -> Option<Literal> {
        self.node(id).val
    }

    #[inline]
    pub fn typ(&self, id: NodeId) -> Option<TypeId> {
        self.node(id).typ
    }

    // Annotations written by type analysis.

    pub fn set_type(&mut self, id: NodeId, typ: TypeId) {
        self.node_mut(id).typ = Some(typ);
    }

    pub fn set_name(&mut self, id: NodeId, name: Name) {
        self.node_mut(id).name = Some(name);
    }

    pub fn set_scope(&mut self, id: NodeId, scope: ScopeId) {
        self.node_mut(id).scope = Some(scope);
    }

    pub fn set_slot(&mut self, id: NodeId, slot: Slot) {
        self.node_mut(id).slot = Some(slot);
    }

    // Annotations written by the CFG builder.

    pub fn set_action(&mut self, id: NodeId, action: Action) {
        self.node_mut(id).action = action;
    }

    /// Unconditional successor.
    pub fn link(&mut self, from: NodeId, to: NodeId) {
        self.node_mut(from).tnext = Some(to);
    }

    /// Conditional successors, chosen by the boolean in `from`'s own slot.
    pub fn branch(&mut self, from: NodeId, on_true: Option<NodeId>, on_false: NodeId) {
        let node = self.node_mut(from);
        node.tnext = on_true;
        node.fnext = Some(on_false);
    }

    pub fn set_start(&mut self, func: NodeId, entry: NodeId) {
        self.node_mut(func).start = Some(entry);
    }

    pub fn set_frame_len(&mut self, func: NodeId, len: u32) {
        self.node_mut(func).frame_len = Some(len);
    }

    pub fn set_callee(&mut self, call: NodeId, func: NodeId) {
        self.node_mut(call).callee = Some(func);
    }

    pub fn set_scrutinee(&mut self, case: NodeId, tag: NodeId) {
        self.node_mut(case).scrutinee = Some(tag);
    }

    /// Record the switch tag of a case clause nested as
    /// `SwitchStmt[tag, BlockStmt[CaseClause...]]`.
    ///
    /// Returns the captured tag, or `None` if the clause is not in that shape.
    pub fn capture_scrutinee(&mut self, case: NodeId) -> Option<NodeId> {
        let block = self.parent(case)?;
        let switch = self.parent(block)?;
        if self.kind(switch) != NodeKind::SwitchStmt {
            return None;
        }
        let tag = self.child(switch, 0)?;
        self.set_scrutinee(case, tag);
        Some(tag)
    }

    pub fn set_aux(&mut self, id: NodeId, slot: u32) {
        self.node_mut(id).aux = Some(slot);
    }
}

#[cfg(test)]
mod tests;
