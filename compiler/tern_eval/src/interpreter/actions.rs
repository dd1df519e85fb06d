//! The action table.
//!
//! Each node's `Action` was chosen once by the CFG builder; `exec`
//! dispatches on it with a single `match`. Operands are the node's
//! children, results go to the node's own slot unless noted.

use tern_ir::{Action, NodeId};
use tern_value::{
    index_out_of_bounds, malformed_graph, native_error, not_callable, type_mismatch, EvalResult,
    Value,
};

use super::interned_names::Builtin;
use super::{Flow, Interpreter};
use crate::operators::{evaluate_binary, step_int};
use crate::Frame;

fn operand(node: NodeId, children: &[NodeId], i: usize) -> EvalResult<NodeId> {
    children
        .get(i)
        .copied()
        .ok_or_else(|| malformed_graph(format!("{node} is missing operand {i}")))
}

fn as_bool(value: &Value) -> EvalResult<bool> {
    value.as_bool().ok_or_else(|| type_mismatch("bool", value))
}

impl Interpreter<'_> {
    pub(super) fn exec(&mut self, node: NodeId, action: Action, frame: &mut Frame) -> EvalResult<Flow> {
        let forest = self.forest;
        let children = forest.children(node);
        match action {
            Action::Nop => {}
            Action::Add
            | Action::Sub
            | Action::Mul
            | Action::And
            | Action::Equal
            | Action::Greater
            | Action::Lower => {
                let lhs = self.value(operand(node, children, 0)?, frame)?;
                let rhs = self.value(operand(node, children, 1)?, frame)?;
                let result = evaluate_binary(action, &lhs, &rhs)?;
                self.store(node, frame, result)?;
            }
            Action::Land | Action::Lor => self.logical(node, action, children, frame)?,
            Action::Inc | Action::Dec => {
                let current = self.value(operand(node, children, 0)?, frame)?;
                let result = step_int(action, &current)?;
                self.store(node, frame, result)?;
            }
            Action::Assign => self.assign(node, children, frame)?,
            Action::AssignX => self.assign_x(node, children, frame)?,
            Action::ArrayLit => {
                let elems = self.values(children.get(1..).unwrap_or_default(), frame)?;
                self.store(node, frame, Value::seq(elems))?;
            }
            Action::GetIndex => self.get_index(node, children, frame)?,
            Action::Range => self.range(node, children, frame)?,
            Action::Case => self.case(node, children, frame)?,
            Action::Call => self.exec_call(node, children, frame)?,
            Action::Return => {
                let results = self.values(children, frame)?;
                for (i, value) in (0u32..).zip(results) {
                    if !frame.set(i, value) {
                        return Err(malformed_graph(format!(
                            "result {i} outside the frame"
                        )));
                    }
                }
                return Ok(Flow::Return);
            }
            Action::Define => self.define(children, frame)?,
        }
        Ok(Flow::Continue)
    }

    /// `&&` / `||`: the right operand is only read when it decides.
    fn logical(
        &mut self,
        node: NodeId,
        action: Action,
        children: &[NodeId],
        frame: &mut Frame,
    ) -> EvalResult<()> {
        let lhs = as_bool(&self.value(operand(node, children, 0)?, frame)?)?;
        let result = match (action, lhs) {
            (Action::Land, false) => false,
            (Action::Lor, true) => true,
            _ => as_bool(&self.value(operand(node, children, 1)?, frame)?)?,
        };
        self.store(node, frame, Value::Bool(result))
    }

    /// `[lhs..., rhs...]`: every right-hand value is read before any write.
    fn assign(&mut self, node: NodeId, children: &[NodeId], frame: &mut Frame) -> EvalResult<()> {
        if children.len() % 2 != 0 {
            return Err(malformed_graph(format!(
                "{node} assigns {} operands",
                children.len()
            )));
        }
        let (targets, sources) = children.split_at(children.len() / 2);
        let values = self.values(sources, frame)?;
        for (&target, value) in targets.iter().zip(values) {
            self.store_if_slotted(target, frame, value)?;
        }
        Ok(())
    }

    /// `[lhs..., call]`: targets take the consecutive result slots of the
    /// call.
    fn assign_x(&mut self, node: NodeId, children: &[NodeId], frame: &mut Frame) -> EvalResult<()> {
        let (&call, targets) = children
            .split_last()
            .ok_or_else(|| malformed_graph(format!("{node} has no call")))?;
        let base = self.local_slot(call)?;
        let values = (base..)
            .take(targets.len())
            .map(|slot| {
                frame
                    .get(slot)
                    .cloned()
                    .ok_or_else(|| malformed_graph(format!("result slot {slot} outside the frame")))
            })
            .collect::<EvalResult<Vec<_>>>()?;
        for (&target, value) in targets.iter().zip(values) {
            self.store_if_slotted(target, frame, value)?;
        }
        Ok(())
    }

    fn get_index(&mut self, node: NodeId, children: &[NodeId], frame: &mut Frame) -> EvalResult<()> {
        let seq = self.value(operand(node, children, 0)?, frame)?;
        let index = self.value(operand(node, children, 1)?, frame)?;
        let items = seq.as_seq().ok_or_else(|| type_mismatch("sequence", &seq))?;
        let i = index.as_int().ok_or_else(|| type_mismatch("int", &index))?;
        let elem = usize::try_from(i)
            .ok()
            .and_then(|at| items.get(at))
            .cloned()
            .ok_or_else(|| index_out_of_bounds(i, items.len()))?;
        self.store(node, frame, elem)
    }

    /// `[key, value, seq]`, one iteration per visit.
    ///
    /// The cursor lives in the node's `aux` slot; nil means zero. Each visit
    /// writes the index and element and stores `true`. Past the end it
    /// stores `false`, resets the cursor and writes nothing else.
    fn range(&mut self, node: NodeId, children: &[NodeId], frame: &mut Frame) -> EvalResult<()> {
        let key = operand(node, children, 0)?;
        let val = operand(node, children, 1)?;
        let seq = self.value(operand(node, children, 2)?, frame)?;
        let cursor_slot = self
            .forest
            .node(node)
            .aux
            .ok_or_else(|| malformed_graph(format!("{node} has no cursor slot")))?;
        let cursor = match frame.get(cursor_slot) {
            Some(Value::Nil) => 0,
            Some(Value::Int(i)) => *i,
            Some(other) => return Err(type_mismatch("int", other)),
            None => return Err(malformed_graph(format!("cursor slot {cursor_slot} outside the frame"))),
        };
        let items = seq.as_seq().ok_or_else(|| type_mismatch("sequence", &seq))?;

        match usize::try_from(cursor).ok().and_then(|at| items.get(at)).cloned() {
            None => {
                frame.set(cursor_slot, Value::Nil);
                self.store(node, frame, Value::Bool(false))
            }
            Some(elem) => {
                self.store_if_slotted(key, frame, Value::int(cursor))?;
                self.store_if_slotted(val, frame, elem)?;
                frame.set(cursor_slot, Value::int(cursor + 1));
                self.store(node, frame, Value::Bool(true))
            }
        }
    }

    /// Compare the switch tag with the clause expression. A default clause
    /// has no expression and stores nothing.
    fn case(&mut self, node: NodeId, children: &[NodeId], frame: &mut Frame) -> EvalResult<()> {
        if children.len() < 2 {
            return Ok(());
        }
        let tag = self
            .forest
            .node(node)
            .scrutinee
            .ok_or_else(|| malformed_graph(format!("{node} has no switch tag")))?;
        let tag = self.value(tag, frame)?;
        let candidate = self.value(children[0], frame)?;
        self.store(node, frame, Value::Bool(tag == candidate))
    }

    /// `[fun, args...]`.
    fn exec_call(&mut self, node: NodeId, children: &[NodeId], frame: &mut Frame) -> EvalResult<()> {
        let (&fun, args) = children
            .split_first()
            .ok_or_else(|| malformed_graph(format!("{node} has no callee")))?;
        if let Some(def) = self.forest.node(node).callee {
            return self.call_function(node, def, args, frame);
        }
        if let Some(builtin) = self.builtin(fun) {
            return self.call_builtin(builtin, args, frame);
        }
        match self.value(fun, frame)? {
            Value::Func(def) => self.call_function(node, def, args, frame),
            Value::Native(native) => {
                let values = self.values(args, frame)?;
                let result = native
                    .call(&values)
                    .map_err(|message| native_error(native.name, message))?;
                self.store_if_slotted(node, frame, result)
            }
            other => Err(not_callable(&other)),
        }
    }

    /// Results land in the contiguous run of slots starting at the call
    /// node's own slot.
    fn call_function(
        &mut self,
        call: NodeId,
        def: NodeId,
        args: &[NodeId],
        frame: &mut Frame,
    ) -> EvalResult<()> {
        let count = self.result_count(def)?;
        let rets: Vec<u32> = if count == 0 {
            Vec::new()
        } else {
            let base = self.local_slot(call)?;
            (base..).take(count).collect()
        };
        self.run_at(def, frame, args, &rets, Some(call))
    }

    /// A slotless identifier naming a builtin.
    fn builtin(&self, fun: NodeId) -> Option<Builtin> {
        let n = self.forest.node(fun);
        if n.slot.is_some() {
            return None;
        }
        self.names.builtin(n.name?)
    }

    fn call_builtin(&mut self, builtin: Builtin, args: &[NodeId], frame: &Frame) -> EvalResult<()> {
        let values = self.values(args, frame)?;
        let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
        match builtin {
            Builtin::Println => self.output.write(&format!("{}\n", parts.join(" "))),
            Builtin::Print => self.output.write(&parts.concat()),
        }
        Ok(())
    }

    /// `[name, type-or-value...]`: initialize from the last child when it
    /// carries a value.
    fn define(&mut self, children: &[NodeId], frame: &mut Frame) -> EvalResult<()> {
        let [target, .., last] = children else {
            return Ok(());
        };
        if !self.carries_value(*last) {
            return Ok(());
        }
        let value = self.value(*last, frame)?;
        self.store(*target, frame, value)
    }
}
