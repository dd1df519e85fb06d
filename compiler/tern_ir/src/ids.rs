//! Arena handles.
//!
//! Every cross-reference in the runtime is a 32-bit index: nodes into the
//! `SyntaxForest`, scopes into the scope tree, types into the type pool.
//! `TypeId` lives here rather than next to the pool so that syntax nodes can
//! carry their resolved type without `tern_ir` depending on `tern_types`.

use std::fmt;

/// Index of a node in a `SyntaxForest`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a scope in the scope tree.
///
/// `ScopeId::UNIVERSE` is always the root scope.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The universe (root) scope.
    pub const UNIVERSE: ScopeId = ScopeId(0);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ScopeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_universe(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_universe() {
            write!(f, "ScopeId::UNIVERSE")
        } else {
            write!(f, "ScopeId({})", self.0)
        }
    }
}

/// Handle of a type in the type pool.
///
/// Primitive and marker types have fixed indices so that the syntax layer and
/// the interpreter can name them without a pool at hand.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// `int`: 64-bit signed integer.
    pub const INT: TypeId = TypeId(0);
    /// `bool`.
    pub const BOOL: TypeId = TypeId(1);
    /// `string`.
    pub const STRING: TypeId = TypeId(2);
    /// A native value bound into a scope by a dot-import.
    pub const BOUND_VALUE: TypeId = TypeId(3);
    /// A native package imported under a name.
    pub const BOUND_PACKAGE: TypeId = TypeId(4);
    /// A source package imported under a name.
    pub const SOURCE_PACKAGE: TypeId = TypeId(5);

    /// Number of pre-interned types.
    pub const PRIMITIVE_COUNT: u32 = 6;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Name of a pre-interned type, `None` for pool-allocated ones.
    pub const fn primitive_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("int"),
            1 => Some("bool"),
            2 => Some("string"),
            3 => Some("<bound>"),
            4 => Some("<bound package>"),
            5 => Some("<package>"),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => write!(f, "TypeId({name})"),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<NodeId>() == 4);
const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
