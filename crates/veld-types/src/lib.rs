//! Interned type model for the veld compiler.
//!
//! Types are interned into a [`TypeTable`]: structurally equal types share a
//! `TypeId`, so type equality is an integer comparison and every type has a
//! stable string identity key usable for memoization and logging.
//!
//! The table also owns the aggregate declarations (structs and classes), the
//! member symbol table, and each aggregate's delegation list. Declaration
//! processing populates these through the `add_*` methods; semantic queries
//! read them through the accessor methods and never mutate them.

pub mod aggregate;
pub mod delegation;
pub mod quals;
pub mod symbols;
pub mod table;
pub mod types;

pub use aggregate::{AggregateData, AggregateId, AggregateKind};
pub use delegation::{DelegateSymbol, DelegationList};
pub use quals::{Qualifiers, ReceiverQual};
pub use symbols::{MethodSig, SymbolData, SymbolId, SymbolKind};
pub use table::TypeTable;
pub use types::{TypeData, TypeId, TypeKind};
