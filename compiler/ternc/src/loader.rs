//! In-memory source packages.

use rustc_hash::FxHashMap;
use tern_ir::{NodeId, StringInterner, SyntaxForest};
use tern_types::{LoadError, SourceLoader};

/// Serves `File` roots that were already built into the session's forest,
/// keyed by import path.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    packages: FxHashMap<String, Vec<NodeId>>,
    loads: usize,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `roots` for imports of `path`.
    #[must_use]
    pub fn package(mut self, path: impl Into<String>, roots: &[NodeId]) -> Self {
        self.packages
            .entry(path.into())
            .or_default()
            .extend_from_slice(roots);
        self
    }

    /// Number of successful loads served.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl SourceLoader for MemoryLoader {
    fn load(
        &mut self,
        path: &str,
        _forest: &mut SyntaxForest,
        _interner: &StringInterner,
    ) -> Result<Vec<NodeId>, LoadError> {
        let roots = self
            .packages
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_string(),
            })?;
        self.loads += 1;
        tracing::debug!(path, files = roots.len(), "source package served");
        Ok(roots)
    }
}
