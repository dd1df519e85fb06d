//! Symbols and the scope tree.
//!
//! Scopes live in an arena (`ScopeTree`) and point at their parent by
//! `ScopeId`. The root is the universe scope with the predeclared types and
//! builtin functions; every package gets one child scope of the universe.

use rustc_hash::FxHashMap;
use tern_ir::{Name, NodeId, ScopeId, StringInterner, TypeId};
use tern_value::Value;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SymbolKind {
    Var,
    Func,
    Type,
    /// Import of a source or native package.
    Package,
    /// Native value bound by a dot-import.
    Bound,
    /// Predeclared function handled directly by the engine.
    Builtin,
}

/// A named entity in a scope.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub typ: TypeId,
    /// Declared at package level.
    pub global: bool,
    /// Frame slot of a variable.
    pub index: u32,
    /// Bound native value.
    pub val: Option<Value>,
    /// Declaring function node.
    pub node: Option<NodeId>,
    /// Import path of a package symbol.
    pub path: Option<Name>,
    /// Scope of an imported source package.
    pub package: Option<ScopeId>,
}

impl Symbol {
    fn with_kind(kind: SymbolKind, typ: TypeId) -> Self {
        Symbol {
            kind,
            typ,
            global: false,
            index: 0,
            val: None,
            node: None,
            path: None,
            package: None,
        }
    }

    pub fn global_var(typ: TypeId, index: u32) -> Self {
        Symbol {
            global: true,
            index,
            ..Self::with_kind(SymbolKind::Var, typ)
        }
    }

    pub fn func(typ: TypeId, node: NodeId) -> Self {
        Symbol {
            node: Some(node),
            ..Self::with_kind(SymbolKind::Func, typ)
        }
    }

    pub fn type_name(typ: TypeId) -> Self {
        Self::with_kind(SymbolKind::Type, typ)
    }

    pub fn bound(val: Value) -> Self {
        Symbol {
            val: Some(val),
            ..Self::with_kind(SymbolKind::Bound, TypeId::BOUND_VALUE)
        }
    }

    pub fn native_package(path: Name) -> Self {
        Symbol {
            path: Some(path),
            ..Self::with_kind(SymbolKind::Package, TypeId::BOUND_PACKAGE)
        }
    }

    pub fn source_package(path: Name, scope: ScopeId) -> Self {
        Symbol {
            path: Some(path),
            package: Some(scope),
            ..Self::with_kind(SymbolKind::Package, TypeId::SOURCE_PACKAGE)
        }
    }

    fn builtin() -> Self {
        Self::with_kind(SymbolKind::Builtin, TypeId::BOUND_VALUE)
    }
}

/// One lexical namespace.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// Package name, for package scopes.
    pub package: Option<Name>,
    symbols: FxHashMap<Name, Symbol>,
    slots: u32,
}

impl Scope {
    pub fn symbols(&self) -> &FxHashMap<Name, Symbol> {
        &self.symbols
    }

    pub fn get(&self, name: Name) -> Option<&Symbol> {
        self.symbols.get(&name)
    }

    /// Number of variable slots handed out so far.
    pub fn slot_count(&self) -> u32 {
        self.slots
    }
}

/// Arena of scopes rooted at the universe.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Create the tree with a populated universe scope.
    pub fn new(interner: &StringInterner) -> Self {
        let mut universe = Scope::default();
        for (name, typ) in [
            ("int", TypeId::INT),
            ("bool", TypeId::BOOL),
            ("string", TypeId::STRING),
        ] {
            universe
                .symbols
                .insert(interner.intern(name), Symbol::type_name(typ));
        }
        for name in ["println", "print"] {
            universe
                .symbols
                .insert(interner.intern(name), Symbol::builtin());
        }
        ScopeTree {
            scopes: vec![universe],
        }
    }

    /// Create a child of `parent`.
    pub fn push(&mut self, parent: ScopeId, package: Option<Name>) -> ScopeId {
        let index = u32::try_from(self.scopes.len())
            .unwrap_or_else(|_| panic!("scope tree exceeded {} scopes", u32::MAX));
        self.scopes.push(Scope {
            parent: Some(parent),
            package,
            ..Scope::default()
        });
        ScopeId::new(index)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = ScopeId> + '_ {
        (0..self.scopes.len()).filter_map(|i| u32::try_from(i).ok().map(ScopeId::new))
    }

    /// Symbol declared directly in `scope`.
    pub fn lookup_local(&self, scope: ScopeId, name: Name) -> Option<&Symbol> {
        self.get(scope).get(name)
    }

    /// Resolve `name` from `scope` outwards, returning the declaring scope.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<(ScopeId, &Symbol)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.get(id);
            if let Some(sym) = s.get(name) {
                return Some((id, sym));
            }
            current = s.parent;
        }
        None
    }

    /// Declare `name` in `scope`, returning the symbol it replaced.
    pub fn insert(&mut self, scope: ScopeId, name: Name, symbol: Symbol) -> Option<Symbol> {
        self.scopes[scope.index()].symbols.insert(name, symbol)
    }

    /// Hand out the next variable slot of `scope`.
    pub fn next_slot(&mut self, scope: ScopeId) -> u32 {
        let s = &mut self.scopes[scope.index()];
        let slot = s.slots;
        s.slots += 1;
        slot
    }
}
