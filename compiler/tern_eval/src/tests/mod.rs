//! Engine tests over hand-annotated program graphs.
//!
//! The fixture plays the CFG builder: it builds function trees with
//! `TreeBuilder`, then writes slots, actions and successor links directly.

#![allow(clippy::unwrap_used, reason = "tests")]

mod range_tests;

use tern_ir::{Action, NodeId, NodeKind, Slot, StringInterner, SyntaxForest, TreeBuilder};
use tern_types::Program;

use crate::{EvalMode, Interpreter, InterpreterBuilder};

pub(crate) struct Fixture {
    pub interner: StringInterner,
    pub forest: SyntaxForest,
    pub program: Program,
}

impl Fixture {
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let program = Program::new(&interner);
        Fixture {
            interner,
            forest: SyntaxForest::new(),
            program,
        }
    }

    pub fn tree(&mut self) -> TreeBuilder<'_> {
        TreeBuilder::new(&mut self.forest, &self.interner)
    }

    pub fn int(&mut self, v: i64) -> NodeId {
        self.tree().int(v)
    }

    /// Identifier living in local slot `slot`.
    pub fn local(&mut self, name: &str, slot: u32) -> NodeId {
        let id = self.tree().ident(name);
        self.forest.set_slot(id, Slot::Local(slot));
        id
    }

    /// Node executing `action`, optionally writing local slot `slot`.
    pub fn op(
        &mut self,
        kind: NodeKind,
        children: &[NodeId],
        action: Action,
        slot: Option<u32>,
    ) -> NodeId {
        let id = self.forest.push(kind, children);
        self.forest.set_action(id, action);
        if let Some(slot) = slot {
            self.forest.set_slot(id, Slot::Local(slot));
        }
        id
    }

    /// Call of the slotless identifier `fun`.
    pub fn call(
        &mut self,
        callee: Option<NodeId>,
        fun: &str,
        args: &[NodeId],
        slot: Option<u32>,
    ) -> NodeId {
        let fun = self.tree().ident(fun);
        self.call_value(fun, callee, args, slot)
    }

    pub fn call_value(
        &mut self,
        fun: NodeId,
        callee: Option<NodeId>,
        args: &[NodeId],
        slot: Option<u32>,
    ) -> NodeId {
        let mut children = vec![fun];
        children.extend_from_slice(args);
        let id = self.op(NodeKind::CallExpr, &children, Action::Call, slot);
        if let Some(def) = callee {
            self.forest.set_callee(id, def);
        }
        id
    }

    /// Link `nodes` in order with unconditional successors.
    pub fn chain(&mut self, nodes: &[NodeId]) {
        for pair in nodes.windows(2) {
            self.forest.link(pair[0], pair[1]);
        }
    }

    /// `func name(params... int) (int x results)`; results take slots
    /// `0..results`, parameters the slots right after.
    pub fn func(
        &mut self,
        name: &str,
        params: &[&str],
        results: u32,
        stmts: &[NodeId],
        entry: NodeId,
        frame_len: u32,
    ) -> NodeId {
        let mut b = self.tree();
        let mut param_fields = Vec::new();
        for &p in params {
            let ty = b.type_name("int");
            param_fields.push(b.field(&[p], ty));
        }
        let mut result_fields = Vec::new();
        for _ in 0..results {
            let ty = b.type_name("int");
            result_fields.push(b.field(&[], ty));
        }
        let ftype = b.func_type(&param_fields, &result_fields);
        let decl = b.func_decl(None, name, ftype, stmts);

        for (slot, field) in (results..).zip(param_fields) {
            let ident = self.forest.child(field, 0).unwrap();
            self.forest.set_slot(ident, Slot::Local(slot));
        }
        self.forest.set_start(decl, entry);
        self.forest.set_frame_len(decl, frame_len);
        decl
    }

    /// `func Double(x int) int { return x * 2 }`
    pub fn double(&mut self) -> NodeId {
        let x = self.local("x", 1);
        let two = self.int(2);
        let mul = self.op(
            NodeKind::BinaryExpr(tern_ir::BinaryOp::Mul),
            &[x, two],
            Action::Mul,
            Some(2),
        );
        let ret = self.op(NodeKind::ReturnStmt, &[mul], Action::Return, None);
        self.chain(&[mul, ret]);
        self.func("Double", &["x"], 1, &[ret], mul, 3)
    }

    /// Interpreter in `TestRun` mode (buffered output).
    pub fn interp(&self) -> Interpreter<'_> {
        self.interp_with(EvalMode::TestRun)
    }

    pub fn interp_with(&self, mode: EvalMode) -> Interpreter<'_> {
        InterpreterBuilder::new(&self.interner, &self.forest, &self.program)
            .mode(mode)
            .build()
    }
}
