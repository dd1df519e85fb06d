//! Source package loading seam.

use tern_ir::{NodeId, StringInterner, SyntaxForest};

/// Failure to produce the syntax of an imported source package.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("cannot find package {path:?}")]
    NotFound { path: String },

    #[error("cannot load package {path:?}: {message}")]
    Failed { path: String, message: String },
}

/// Supplies the parsed files of a source package on import.
///
/// Implementations parse (or fetch pre-parsed) files into `forest` and return
/// their `File` roots.
pub trait SourceLoader {
    fn load(
        &mut self,
        path: &str,
        forest: &mut SyntaxForest,
        interner: &StringInterner,
    ) -> Result<Vec<NodeId>, LoadError>;
}

/// Loader for programs without source imports.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSources;

impl SourceLoader for NoSources {
    fn load(
        &mut self,
        path: &str,
        _forest: &mut SyntaxForest,
        _interner: &StringInterner,
    ) -> Result<Vec<NodeId>, LoadError> {
        Err(LoadError::NotFound {
            path: path.to_string(),
        })
    }
}
