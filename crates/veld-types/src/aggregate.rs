//! Aggregate (struct / class) declarations.

use crate::delegation::DelegationList;
use crate::symbols::SymbolId;
use crate::types::TypeId;
use veld_common::Atom;

/// A handle into the aggregate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AggregateId(pub(crate) u32);

impl AggregateId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    /// Struct-like: copied by value, no base types.
    Value,
    /// Class-like: reference semantics, may declare base types.
    Reference,
}

#[derive(Debug)]
pub struct AggregateData {
    pub name: Atom,
    pub kind: AggregateKind,
    /// Base types in declaration order. Reference aggregates only.
    pub bases: Vec<TypeId>,
    /// Members in declaration order.
    pub members: Vec<SymbolId>,
    /// Registered delegate declarations. Populated incrementally during
    /// declaration processing, read-only afterwards.
    pub delegation: DelegationList,
    /// Set when this declaration is an error-recovery alias of an earlier
    /// declaration of the same type. Such aggregates share the canonical
    /// declaration's delegation list.
    pub canonical: Option<AggregateId>,
}
