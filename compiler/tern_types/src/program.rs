//! Per-session analysis state.

use rustc_hash::{FxHashMap, FxHashSet};
use tern_ir::{Name, NodeId, ScopeId, StringInterner};

use crate::{GtaError, Pool, ScopeTree, SymbolKind};

/// Everything global type analysis produces: the type graph, the scope
/// tree, and the package bookkeeping that makes imports idempotent.
#[derive(Clone, Debug)]
pub struct Program {
    pub pool: Pool,
    pub scopes: ScopeTree,
    packages: FxHashMap<Name, ScopeId>,
    loaded: FxHashSet<Name>,
    pub(crate) loading: Vec<Name>,
    by_path: FxHashMap<Name, ScopeId>,
}

impl Program {
    pub fn new(interner: &StringInterner) -> Self {
        Program {
            pool: Pool::new(),
            scopes: ScopeTree::new(interner),
            packages: FxHashMap::default(),
            loaded: FxHashSet::default(),
            loading: Vec::new(),
            by_path: FxHashMap::default(),
        }
    }

    /// Scope of the package called `name`, if any file declared it.
    pub fn package_scope(&self, name: Name) -> Option<ScopeId> {
        self.packages.get(&name).copied()
    }

    /// Scope of the package loaded from import `path`.
    pub fn package_at_path(&self, path: Name) -> Option<ScopeId> {
        self.by_path.get(&path).copied()
    }

    /// Number of distinct package scopes.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Get or create the scope of package `name`.
    pub(crate) fn ensure_package(&mut self, name: Name) -> ScopeId {
        if let Some(&scope) = self.packages.get(&name) {
            return scope;
        }
        let scope = self.scopes.push(ScopeId::UNIVERSE, Some(name));
        self.packages.insert(name, scope);
        tracing::debug!(scope = ?scope, "package scope created");
        scope
    }

    pub fn is_loaded(&self, path: Name) -> bool {
        self.loaded.contains(&path)
    }

    pub(crate) fn mark_loaded(&mut self, path: Name, scope: Option<ScopeId>) {
        self.loaded.insert(path);
        if let Some(scope) = scope {
            self.by_path.insert(path, scope);
        }
    }

    /// Declaration node of function `func` in package `package`.
    pub fn function(&self, package: Name, func: Name) -> Option<NodeId> {
        let scope = self.package_scope(package)?;
        let sym = self.scopes.lookup_local(scope, func)?;
        match sym.kind {
            SymbolKind::Func => sym.node,
            _ => None,
        }
    }

    /// Check that every declared type is complete.
    ///
    /// Rejects named types whose declaration never arrived and alias
    /// chains that loop. Run once all files have been analyzed.
    pub fn verify(&self, interner: &StringInterner) -> Result<(), GtaError> {
        let mut failures = Vec::new();
        for id in self.scopes.ids() {
            for (&name, sym) in self.scopes.get(id).symbols() {
                if sym.kind != SymbolKind::Type {
                    continue;
                }
                if let Err(source) = self.pool.underlying(sym.typ) {
                    failures.push((interner.lookup(name), source));
                }
            }
        }
        failures.sort_by_key(|(name, _)| *name);
        match failures.into_iter().next() {
            Some((name, source)) => Err(GtaError::Type {
                name: name.to_string(),
                source,
            }),
            None => Ok(()),
        }
    }
}
