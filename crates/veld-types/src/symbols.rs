//! Member symbols of aggregate declarations.

use crate::quals::ReceiverQual;
use crate::types::TypeId;
use smallvec::SmallVec;
use veld_common::Atom;

/// A handle into the member symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One overload of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSig {
    pub receiver: ReceiverQual,
    /// `None` for an auto-return method whose return type has not been
    /// inferred yet.
    pub ret: Option<TypeId>,
    /// `ref`-returning overloads yield lvalue conversions.
    pub returns_ref: bool,
    /// Property accessors are auto-invoked when referenced as a value.
    pub is_property: bool,
}

impl MethodSig {
    pub fn new(receiver: ReceiverQual, ret: TypeId) -> Self {
        Self {
            receiver,
            ret: Some(ret),
            returns_ref: false,
            is_property: false,
        }
    }

    pub fn with_ref(mut self) -> Self {
        self.returns_ref = true;
        self
    }

    pub fn with_property(mut self) -> Self {
        self.is_property = true;
        self
    }

    pub fn auto(receiver: ReceiverQual) -> Self {
        Self {
            receiver,
            ret: None,
            returns_ref: false,
            is_property: false,
        }
    }
}

/// What a member symbol denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Field {
        ty: TypeId,
    },
    Method {
        overloads: SmallVec<[MethodSig; 2]>,
    },
    /// A method template. `instance` is the overload set produced by
    /// instantiation, or `None` when instantiation fails.
    TemplateMethod {
        instance: Option<SmallVec<[MethodSig; 2]>>,
    },
    EnumConst {
        ty: TypeId,
    },
    /// A compile-time sequence of declarations.
    Tuple {
        elements: Vec<SymbolId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolData {
    pub name: Atom,
    pub kind: SymbolKind,
}
