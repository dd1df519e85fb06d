//! Errors of the type graph and of global type analysis.

use tern_ir::{NodeId, NodeKind, TypeId};

use crate::LoadError;

/// Type graph defect.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("type {0:?} is declared but never defined")]
    Unresolved(TypeId),

    #[error("type {0:?} is defined in terms of itself")]
    Cycle(TypeId),

    #[error("type {0:?} is already defined")]
    AlreadyResolved(TypeId),

    #[error("type {0:?} is not a named type")]
    NotNamed(TypeId),
}

/// Rejection raised by global type analysis or by `Program::verify`.
#[derive(Debug, thiserror::Error)]
pub enum GtaError {
    #[error("import cycle: {}", chain.join(" -> "))]
    ImportCycle { chain: Vec<String> },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("malformed {kind:?} node {node}: {detail}")]
    Malformed {
        kind: NodeKind,
        node: NodeId,
        detail: &'static str,
    },

    #[error("{name} redeclared in this package")]
    Redeclared { name: String },

    #[error("cannot infer the type of {name}")]
    CannotInfer { name: String },

    #[error("type {name}: {source}")]
    Type { name: String, source: TypeError },
}
