//! Type representation.

use crate::aggregate::AggregateId;
use crate::quals::Qualifiers;

/// An interned type handle.
///
/// Two `TypeId`s are equal exactly when the types they denote are
/// structurally equal (including qualifiers); see [`crate::TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// The error sentinel. Pre-interned at slot 0 of every table.
    ///
    /// Resolution failures produce this type instead of raising; callers
    /// must check for it before using a resolved type.
    pub const ERROR: TypeId = TypeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_error(self) -> bool {
        self == Self::ERROR
    }
}

/// The unqualified shape of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Error,
    Bool,
    Int32,
    Int64,
    Float64,
    Str,
    Aggregate(AggregateId),
}

impl TypeKind {
    /// Single-character code used in identity keys, mirroring the style of
    /// mangled type signatures.
    pub(crate) fn key_code(self) -> &'static str {
        match self {
            TypeKind::Error => "e",
            TypeKind::Bool => "b",
            TypeKind::Int32 => "i",
            TypeKind::Int64 => "l",
            TypeKind::Float64 => "d",
            TypeKind::Str => "a",
            TypeKind::Aggregate(_) => "",
        }
    }
}

/// An interned type: a kind plus qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeData {
    pub kind: TypeKind,
    pub quals: Qualifiers,
}
