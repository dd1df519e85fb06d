//! Tern type graph, scope tree and global type analysis.
//!
//! Global type analysis (GTA) runs once over the whole program before any
//! function body is compiled. It registers package-level variables,
//! functions, methods, types and imports into a `Program`, resolving
//! forward references so that declaration order across files does not
//! matter.
//!
//! # Architecture
//!
//! - `Pool`: the type graph (`TypeId` handles, `Tag` discriminants)
//! - `ScopeTree` / `Symbol`: universe scope plus one scope per package
//! - `NativeRegistry`: host packages importable by path
//! - `SourceLoader`: seam through which imports pull in more files
//! - `GlobalAnalysis`: the declaration walk

mod check;
mod error;
mod loader;
mod pool;
mod program;
mod registry;
mod scope;
mod tag;

pub use check::GlobalAnalysis;
pub use error::{GtaError, TypeError};
pub use loader::{LoadError, NoSources, SourceLoader};
pub use pool::Pool;
pub use program::Program;
pub use registry::NativeRegistry;
pub use scope::{Scope, ScopeTree, Symbol, SymbolKind};
pub use tag::Tag;
