//! Type tags.

/// Kind discriminant of a pool item.
///
/// Structural tags (`Pointer`, `Array`, `Struct`, `Function`) are
/// hash-consed: equal structure means equal `TypeId`. Nominal tags
/// (`Named`, `Alias`) get a fresh item on every construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    Int,
    Bool,
    String,
    Pointer,
    Array,
    Struct,
    Function,
    Alias,
    Named,
    BoundValue,
    BoundPackage,
    SourcePackage,
}

impl Tag {
    pub fn is_primitive(self) -> bool {
        matches!(self, Tag::Int | Tag::Bool | Tag::String)
    }

    /// Whether items of this tag are deduplicated by structure.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Tag::Pointer | Tag::Array | Tag::Struct | Tag::Function
        )
    }

    pub fn is_nominal(self) -> bool {
        matches!(self, Tag::Named | Tag::Alias)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Int => "int",
            Tag::Bool => "bool",
            Tag::String => "string",
            Tag::Pointer => "pointer",
            Tag::Array => "array",
            Tag::Struct => "struct",
            Tag::Function => "func",
            Tag::Alias => "alias",
            Tag::Named => "named",
            Tag::BoundValue => "bound value",
            Tag::BoundPackage => "bound package",
            Tag::SourcePackage => "source package",
        }
    }
}
