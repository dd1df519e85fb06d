//! Call-stack tracking for runtime diagnostics.
//!
//! Every activation pushes a `CallFrame`; the depth check is part of
//! `push`. When an activation fails, the live stack is captured into an
//! `EvalBacktrace` and attached to the error before the frame is popped.

use tern_ir::{Name, NodeId, StringInterner};
use tern_value::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};

/// A single live activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Interned function or method name.
    pub name: Name,
    /// Call node in the caller, `None` for a host entry call.
    pub call_site: Option<NodeId>,
}

/// Live call stack of one interpreter.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// Empty stack with the given depth limit (`None` for unlimited).
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, or fail with `StackOverflow` without pushing.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Snapshot the stack, innermost activation first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: interner.lookup(f.name).to_string(),
                call_site: f.call_site,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace of the current stack unless `err` already has one.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}
