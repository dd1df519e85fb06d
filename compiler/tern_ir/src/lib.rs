//! Tern IR - syntax forest and program graph.
//!
//! This crate holds the data shared by every phase of the runtime:
//! - `Name`: interned identifiers (`StringInterner`)
//! - `NodeId`, `ScopeId`, `TypeId`: 32-bit handles into the owning arenas
//! - `Node` / `SyntaxForest`: the parsed syntax tree, later annotated in
//!   place by global type analysis and by the CFG builder
//! - `TreeBuilder`: the parser-facing construction API
//! - `Walk`: an explicit pre-order cursor for passes that mutate the forest
//!   while traversing it
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers are `Name(u32)`, types `TypeId(u32)`
//! - **Flatten Everything**: nodes refer to each other by `NodeId`, never by
//!   pointer, so the forest can be annotated after construction
//! - **Read-only at run time**: the execution engine borrows the forest
//!   immutably; every annotation it needs is written before it starts

mod build;
mod forest;
mod ids;
mod interner;
mod name;
mod node;
pub mod visitor;

pub use build::TreeBuilder;
pub use forest::SyntaxForest;
pub use ids::{NodeId, ScopeId, TypeId};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use node::{Action, BinaryOp, IncDec, Literal, Node, NodeKind, Slot, UnaryOp};
pub use visitor::{Walk, WalkControl};
