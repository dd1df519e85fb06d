//! Tern Eval - frame-based program graph interpreter.
//!
//! Executes functions whose bodies the CFG builder has already annotated:
//! every node carries an `Action`, a frame slot and its successor links.
//! The engine never mutates the graph; all run-time state lives in
//! `Frame`s and in the package `Globals`.
//!
//! # Architecture
//!
//! - `Interpreter`: activation loop, operand reads and the action table
//! - `InterpreterBuilder`: mode, print destination and globals
//! - `EvalMode`: depth limit, step budget and output policy
//! - `CallStack`: live activations, captured into error backtraces
//! - `Output`: destination of the `println`/`print` builtins

mod diagnostics;
mod eval_mode;
mod frame;
mod globals;
pub mod interpreter;
mod operators;
mod output;

pub use diagnostics::{CallFrame, CallStack};
pub use eval_mode::{BudgetExceeded, EvalMode, ModeState};
pub use frame::Frame;
pub use globals::Globals;
pub use interpreter::{Flow, Interpreter, InterpreterBuilder};
pub use output::{Output, SharedOutput};
pub use tern_value::{EvalError, EvalErrorKind, EvalResult, Value};

#[cfg(test)]
mod tests;
