//! Runtime values for the Tern execution engine.
//!
//! Frame slots are dynamically typed: each holds one `Value`. Heap payloads
//! (strings, sequences) sit behind `Heap<T>`, which can only be built through
//! the factory methods on `Value`.

mod errors;
mod heap;
mod value;

pub use errors::{
    BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, arity_mismatch,
    index_out_of_bounds, integer_overflow, malformed_graph, native_error, not_callable,
    stack_overflow, step_budget_exceeded, type_mismatch,
};
pub use heap::Heap;
pub use value::{NativeFn, NativeFnPtr, Value};
