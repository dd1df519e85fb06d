//! Fatal evaluation errors.
//!
//! A well-formed program graph never produces one of these; each kind marks
//! either a defect in the graph handed to the engine or a resource limit.
//! Errors propagate with `?` up the activation chain; the engine attaches a
//! call-stack backtrace at the error site.

use std::fmt;

use tern_ir::NodeId;

use crate::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("malformed program graph: {detail}")]
    MalformedGraph { detail: String },

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("maximum recursion depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    #[error("step budget exceeded (limit: {budget})")]
    StepBudgetExceeded { budget: u64 },

    #[error("{name}: {message}")]
    Native { name: &'static str, message: String },
}

/// One activation in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name.
    pub name: String,
    /// Call site in the caller, `None` for the entry activation.
    pub call_site: Option<NodeId>,
}

/// Snapshot of the call stack at an error site, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        EvalBacktrace { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(site) = frame.call_site {
                write!(f, " called at {site}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error: a kind, the node being executed, and a backtrace.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Node whose action failed, when known.
    pub node: Option<NodeId>,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            node: None,
            backtrace: None,
        }
    }

    /// Record the failing node unless an inner frame already did.
    #[must_use]
    pub fn at(mut self, node: NodeId) -> Self {
        self.node.get_or_insert(node);
        self
    }

    /// Attach a backtrace unless one is already present.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    /// Render the error with its location and backtrace.
    pub fn report(&self) -> String {
        let mut out = format!("error: {}", self.kind);
        if let Some(node) = self.node {
            out.push_str(&format!(" (at node {node})"));
        }
        out.push('\n');
        if let Some(bt) = &self.backtrace {
            out.push_str(&bt.to_string());
        }
        out
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Factory functions

#[cold]
pub fn type_mismatch(expected: &'static str, got: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::TypeMismatch {
        expected,
        got: got.type_name(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::new(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn arity_mismatch(name: impl Into<String>, expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::ArityMismatch {
        name: name.into(),
        expected,
        got,
    })
}

#[cold]
pub fn malformed_graph(detail: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::MalformedGraph {
        detail: detail.into(),
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::new(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn step_budget_exceeded(budget: u64) -> EvalError {
    EvalError::new(EvalErrorKind::StepBudgetExceeded { budget })
}

#[cold]
pub fn native_error(name: &'static str, message: String) -> EvalError {
    EvalError::new(EvalErrorKind::Native { name, message })
}
