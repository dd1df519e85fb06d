//! Shared helpers for phase tests.

#![allow(dead_code, reason = "not every phase uses every helper")]

use tern_ir::{Action, NodeId, Slot, SyntaxForest, TreeBuilder};

/// Writes actions, slots and successor links over a session forest.
pub struct Cfg<'f> {
    forest: &'f mut SyntaxForest,
}

impl<'f> Cfg<'f> {
    pub fn new(forest: &'f mut SyntaxForest) -> Self {
        Cfg { forest }
    }

    /// Execute `action` at `node`, writing local slot `slot` if given.
    pub fn op(&mut self, node: NodeId, action: Action, slot: Option<u32>) -> &mut Self {
        self.forest.set_action(node, action);
        if let Some(slot) = slot {
            self.forest.set_slot(node, Slot::Local(slot));
        }
        self
    }

    pub fn slot(&mut self, node: NodeId, slot: Slot) -> &mut Self {
        self.forest.set_slot(node, slot);
        self
    }

    pub fn chain(&mut self, nodes: &[NodeId]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.forest.link(pair[0], pair[1]);
        }
        self
    }

    pub fn link(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        self.forest.link(from, to);
        self
    }

    pub fn callee(&mut self, call: NodeId, def: NodeId) -> &mut Self {
        self.forest.set_callee(call, def);
        self
    }

    /// Entry point and frame size of `decl`; parameters take consecutive
    /// slots from `first_param` in declaration order.
    pub fn func(&mut self, decl: NodeId, entry: NodeId, frame_len: u32, first_param: u32) -> &mut Self {
        let ftype = self.forest.child(decl, 2).unwrap();
        let params = self.forest.child(ftype, 0).unwrap();
        let mut slot = first_param;
        for field in self.forest.children(params).to_vec() {
            let children = self.forest.children(field).to_vec();
            for &name in &children[..children.len() - 1] {
                self.forest.set_slot(name, Slot::Local(slot));
                slot += 1;
            }
        }
        self.forest.set_start(decl, entry);
        self.forest.set_frame_len(decl, frame_len);
        self
    }

    /// Package initialization chain of `file`.
    pub fn init(&mut self, file: NodeId, entry: NodeId) -> &mut Self {
        self.forest.set_start(file, entry);
        self
    }
}

/// Slot analysis gave the variable declared by `define`.
pub fn global_slot(forest: &SyntaxForest, define: NodeId) -> Slot {
    let ident = forest.child(define, 0).unwrap();
    forest.node(ident).slot.expect("package variable has a slot")
}

/// `func name(params... int) (int x results)` with `body`.
pub fn int_func(
    b: &mut TreeBuilder<'_>,
    name: &str,
    params: &[&str],
    results: usize,
    body: &[NodeId],
) -> NodeId {
    let mut param_fields = Vec::new();
    if !params.is_empty() {
        let int = b.type_name("int");
        param_fields.push(b.field(params, int));
    }
    let mut result_fields = Vec::new();
    for _ in 0..results {
        let int = b.type_name("int");
        result_fields.push(b.field(&[], int));
    }
    let ftype = b.func_type(&param_fields, &result_fields);
    b.func_decl(None, name, ftype, body)
}
