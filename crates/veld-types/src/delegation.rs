//! Per-aggregate delegate declarations.
//!
//! A delegate marks a member as a forwarding target for implicit conversion
//! of its enclosing aggregate. The list preserves declaration order; the
//! registration pass in `veld-sema` enforces the invariants (at most one
//! tuple delegate, and a tuple delegate excludes every other entry; non-tuple
//! entries resolve to pairwise-distinct target types).

use crate::symbols::SymbolId;
use smallvec::SmallVec;

/// A registered delegate, dispatched by the kind of member it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateSymbol {
    Field(SymbolId),
    Method(SymbolId),
    TemplateMethod(SymbolId),
    EnumConst(SymbolId),
    Tuple(SymbolId),
}

impl DelegateSymbol {
    pub fn symbol(self) -> SymbolId {
        match self {
            DelegateSymbol::Field(s)
            | DelegateSymbol::Method(s)
            | DelegateSymbol::TemplateMethod(s)
            | DelegateSymbol::EnumConst(s)
            | DelegateSymbol::Tuple(s) => s,
        }
    }

    pub fn is_tuple(self) -> bool {
        matches!(self, DelegateSymbol::Tuple(_))
    }
}

/// Ordered set of delegates declared by one aggregate.
#[derive(Debug, Default)]
pub struct DelegationList {
    entries: SmallVec<[DelegateSymbol; 2]>,
}

impl DelegationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delegate: DelegateSymbol) {
        self.entries.push(delegate);
    }

    pub fn iter(&self) -> impl Iterator<Item = DelegateSymbol> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<DelegateSymbol> {
        self.entries.first().copied()
    }

    /// The sole entry, if there is exactly one.
    pub fn sole(&self) -> Option<DelegateSymbol> {
        match self.entries.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }
}
