//! The frame engine.
//!
//! A function activation allocates a `Frame` of `frame_len` slots, copies
//! the argument values into the parameter slots and then follows the
//! program graph from the function's `start` node:
//!
//! 1. execute the node's `Action`
//! 2. stop on `Flow::Return`
//! 3. otherwise move to `tnext`, or, when the node also has an `fnext`,
//!    to `tnext`/`fnext` depending on the boolean in the node's own slot
//!
//! The walk ends at a node without a successor. Declared results are read
//! back from slots `0..k` of the finished frame.
//!
//! The engine only reads the forest and the `Program`; every write goes to
//! a `Frame` or to `Globals`.

mod actions;
mod builder;
mod interned_names;
mod operand;
mod signature;

pub use builder::InterpreterBuilder;

use tern_ir::{Name, NodeId, NodeKind, StringInterner, SyntaxForest};
use tern_types::Program;
use tern_value::{arity_mismatch, malformed_graph, step_budget_exceeded, type_mismatch, EvalResult, Value};

use crate::diagnostics::{CallFrame, CallStack};
use crate::eval_mode::{EvalMode, ModeState};
use crate::output::SharedOutput;
use crate::{Frame, Globals};
use interned_names::BuiltinNames;

/// What the activation loop does after a node has executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The activation is finished; its results are in slots `0..k`.
    Return,
}

/// Interpreter over an analyzed, CFG-annotated program.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) forest: &'a SyntaxForest,
    pub(crate) program: &'a Program,
    pub(crate) globals: Globals,
    pub(crate) mode: EvalMode,
    pub(crate) mode_state: ModeState,
    pub(crate) call_stack: CallStack,
    pub(crate) output: SharedOutput,
    pub(crate) names: BuiltinNames,
}

impl<'a> Interpreter<'a> {
    /// Interpreter in `Interpret` mode with fresh globals.
    pub fn new(
        interner: &'a StringInterner,
        forest: &'a SyntaxForest,
        program: &'a Program,
    ) -> Self {
        InterpreterBuilder::new(interner, forest, program).build()
    }

    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut Globals {
        &mut self.globals
    }

    /// Hand the package variables back to the host.
    pub fn into_globals(self) -> Globals {
        self.globals
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    /// Nodes executed so far.
    pub fn steps(&self) -> u64 {
        self.mode_state.steps
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Call function `def` with argument values supplied by the host and
    /// return its declared results.
    pub fn call(&mut self, def: NodeId, args: &[Value]) -> EvalResult<Vec<Value>> {
        let count = self.result_count(def)?;
        let mut results = self.invoke(def, args.to_vec(), None)?.into_vec();
        if results.len() < count {
            return Err(malformed_graph(format!(
                "frame of {} is shorter than its {count} results",
                self.func_label(def)
            )));
        }
        results.truncate(count);
        Ok(results)
    }

    /// Run `def` with arguments read from `caller`, copying result `i` into
    /// caller slot `rets[i]`.
    pub fn run(
        &mut self,
        def: NodeId,
        caller: &mut Frame,
        args: &[NodeId],
        rets: &[u32],
    ) -> EvalResult<()> {
        self.run_at(def, caller, args, rets, None)
    }

    /// Execute the initialization chain of a `File` node, if the CFG
    /// builder attached one.
    pub fn init_package(&mut self, file: NodeId) -> EvalResult<()> {
        let node = self.forest.node(file);
        if node.kind != NodeKind::File {
            return Err(malformed_graph(format!("{file} is not a file")));
        }
        let Some(entry) = node.start else {
            return Ok(());
        };
        let mut frame = Frame::new(node.frame_len.unwrap_or(0));
        self.walk(entry, &mut frame)
    }

    pub(crate) fn run_at(
        &mut self,
        def: NodeId,
        caller: &mut Frame,
        args: &[NodeId],
        rets: &[u32],
        call_site: Option<NodeId>,
    ) -> EvalResult<()> {
        let values = self.values(args, caller)?;
        let frame = self.invoke(def, values, call_site)?;
        for (i, &ret) in (0u32..).zip(rets) {
            let value = frame.get(i).cloned().ok_or_else(|| {
                malformed_graph(format!(
                    "result {i} outside the frame of {}",
                    self.func_label(def)
                ))
            })?;
            if !caller.set(ret, value) {
                return Err(malformed_graph(format!(
                    "return slot {ret} outside the caller frame"
                )));
            }
        }
        Ok(())
    }

    /// One activation: push a call frame, execute, pop.
    fn invoke(
        &mut self,
        def: NodeId,
        args: Vec<Value>,
        call_site: Option<NodeId>,
    ) -> EvalResult<Frame> {
        let name = self.func_name(def);
        if let Err(err) = self.call_stack.push(CallFrame { name, call_site }) {
            let err = self.call_stack.attach_backtrace(err, self.interner);
            return Err(match call_site {
                Some(site) => err.at(site),
                None => err,
            });
        }
        let span = tracing::debug_span!(
            "activation",
            func = self.interner.lookup(name),
            depth = self.call_stack.depth()
        );
        let result = span.in_scope(|| {
            tern_stack::ensure_sufficient_stack(|| self.execute(def, args))
        });
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err, self.interner));
        self.call_stack.pop();
        result
    }

    fn execute(&mut self, def: NodeId, args: Vec<Value>) -> EvalResult<Frame> {
        let decl = self.forest.node(def);
        if decl.kind != NodeKind::FuncDecl {
            return Err(malformed_graph(format!("{def} is not a function declaration")));
        }
        let len = decl.frame_len.ok_or_else(|| {
            malformed_graph(format!("{} has no frame length", self.func_label(def)))
        })?;
        let entry = decl.start.ok_or_else(|| {
            malformed_graph(format!("{} has no entry node", self.func_label(def)))
        })?;
        let params = self.params(def)?;
        if params.len() != args.len() {
            return Err(arity_mismatch(
                self.interner.lookup(self.func_name(def)),
                params.len(),
                args.len(),
            ));
        }

        let mut frame = Frame::new(len);
        for (param, arg) in params.into_iter().zip(args) {
            if let Some(param) = param {
                self.store(param, &mut frame, arg)?;
            }
        }
        self.walk(entry, &mut frame)?;
        Ok(frame)
    }

    /// Follow the graph from `entry` until a node has no successor or a
    /// `Return` executes.
    fn walk(&mut self, entry: NodeId, frame: &mut Frame) -> EvalResult<()> {
        let mut next = Some(entry);
        while let Some(node) = next {
            if let Err(exceeded) = self.mode_state.check_step() {
                return Err(step_budget_exceeded(exceeded.budget).at(node));
            }
            let action = self.forest.node(node).action;
            tracing::trace!(%node, %action, "exec");
            match self.exec(node, action, frame).map_err(|e| e.at(node))? {
                Flow::Return => break,
                Flow::Continue => {
                    next = self.successor(node, frame).map_err(|e| e.at(node))?;
                }
            }
        }
        Ok(())
    }

    fn successor(&self, node: NodeId, frame: &Frame) -> EvalResult<Option<NodeId>> {
        let n = self.forest.node(node);
        let Some(on_false) = n.fnext else {
            return Ok(n.tnext);
        };
        let cond = self.value(node, frame)?;
        match cond.as_bool() {
            Some(true) => Ok(n.tnext),
            Some(false) => Ok(Some(on_false)),
            None => Err(type_mismatch("bool", &cond)),
        }
    }

    /// Name of a function declaration: the method annotation, else its
    /// name identifier.
    pub(crate) fn func_name(&self, def: NodeId) -> Name {
        self.forest
            .name(def)
            .or_else(|| self.forest.child(def, 1).and_then(|id| self.forest.name(id)))
            .unwrap_or(Name::EMPTY)
    }

    fn func_label(&self, def: NodeId) -> String {
        format!("function {} ({def})", self.interner.lookup(self.func_name(def)))
    }
}

