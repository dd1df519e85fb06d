//! Stack safety for deep recursion.
//!
//! Every call executed by the frame engine is a nested Rust activation, so a
//! deeply recursive source program would otherwise overflow the host stack
//! long before the interpreter's own depth limit kicks in. Wrapping each
//! activation in [`ensure_sufficient_stack`] grows the stack on demand.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack when the red zone is hit.
//! - **WASM targets**: passthrough (the engine relies on its depth limit).
//!
//! # Configuration
//!
//! - **Red zone**: 128KB. A frame engine activation allocates a `Frame` on
//!   the heap but keeps the dispatch loop, operand reads and the call stack
//!   push on the native stack, so the margin is slightly larger than a
//!   tree-walker would need.
//! - **Growth size**: 1MB per segment.

/// Minimum stack space to keep available (128KB red zone).
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn run(&mut self, def: NodeId, caller: &mut Frame) -> Result<(), EvalError> {
///     ensure_sufficient_stack(|| self.activate(def, caller))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
