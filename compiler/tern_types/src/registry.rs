//! Native package registry.

use rustc_hash::FxHashMap;
use tern_ir::Name;
use tern_value::Value;

/// Host-provided packages, keyed by import path.
///
/// Exports keep their registration order, so a dot-import binds them
/// deterministically.
#[derive(Clone, Debug, Default)]
pub struct NativeRegistry {
    packages: FxHashMap<Name, Vec<(Name, Value)>>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or extend) the package at `path`.
    pub fn register(&mut self, path: Name, exports: impl IntoIterator<Item = (Name, Value)>) {
        self.packages.entry(path).or_default().extend(exports);
    }

    pub fn get(&self, path: Name) -> Option<&[(Name, Value)]> {
        self.packages.get(&path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: Name) -> bool {
        self.packages.contains_key(&path)
    }

    /// Look up a single export.
    pub fn export(&self, path: Name, name: Name) -> Option<&Value> {
        self.get(path)?
            .iter()
            .find_map(|(n, v)| (*n == name).then_some(v))
    }
}
