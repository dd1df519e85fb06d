//! Tern session driver.
//!
//! Owns everything one program needs: the interner, the syntax forest, the
//! analyzed `Program`, the native package registry and the source loader.
//! A host builds (or parses) files into the session's forest, runs
//! `analyze` and `verify`, lets its CFG builder annotate the function
//! bodies, and then calls functions through `call` or an `Interpreter`.
//!
//! Sessions share nothing: each has its own universe scope and type graph.

mod loader;
mod session;
mod tracing_setup;

pub use loader::MemoryLoader;
pub use session::{Session, SessionError};
pub use tracing_setup::init_tracing;
