//! Binary operator actions.
//!
//! Arithmetic is on `int` only, checked, and never widens; `Equal` is the
//! one operator defined on every value.

use tern_ir::Action;
use tern_value::{integer_overflow, malformed_graph, type_mismatch, EvalResult, Value};

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

fn int_operand(value: &Value) -> EvalResult<i64> {
    value.as_int().ok_or_else(|| type_mismatch("int", value))
}

/// Apply a two-operand action to already-read operands.
pub(crate) fn evaluate_binary(action: Action, lhs: &Value, rhs: &Value) -> EvalResult {
    if action == Action::Equal {
        return Ok(Value::Bool(lhs == rhs));
    }
    let a = int_operand(lhs)?;
    let b = int_operand(rhs)?;
    match action {
        Action::Add => checked_arith(a.checked_add(b), "addition"),
        Action::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        Action::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        Action::And => Ok(Value::Int(a & b)),
        Action::Greater => Ok(Value::Bool(a > b)),
        Action::Lower => Ok(Value::Bool(a < b)),
        other => Err(malformed_graph(format!("{other} is not a binary operator"))),
    }
}

/// `Inc` and `Dec`.
pub(crate) fn step_int(action: Action, operand: &Value) -> EvalResult {
    let n = int_operand(operand)?;
    match action {
        Action::Inc => checked_arith(n.checked_add(1), "increment"),
        Action::Dec => checked_arith(n.checked_sub(1), "decrement"),
        other => Err(malformed_graph(format!("{other} is not an increment"))),
    }
}
