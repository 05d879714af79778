//! Delegated-conversion resolution for the veld compiler.
//!
//! An aggregate may designate members as *delegates*: forwarding targets for
//! implicit conversion of the aggregate. This crate implements the semantic
//! analysis around that feature:
//!
//! - [`register_delegate`] validates and records delegate declarations
//!   (declaration time).
//! - [`DelegationSearch`] walks the delegation graph (direct delegates,
//!   then their delegates, then base classes) driving a caller-supplied
//!   probe, with on-stack cycle detection.
//! - [`collect_conversion_targets`] enumerates every type an aggregate
//!   implicitly converts to through delegation.
//! - [`expand_tuple_delegations`] splices tuple-valued delegation targets
//!   into expression lists.
//! - [`implicit_convertible`] is the small convertibility rule set the
//!   above need: identity, const widening, base upcast, and delegation.
//!
//! Resolution failures are represented by `TypeId::ERROR`-typed expressions,
//! never by panics; declaration-time failures surface as diagnostics plus a
//! [`RegistrationError`], and compilation continues.

pub mod compat;
pub mod convert;
pub mod delegation;
pub mod expr;
pub mod search;
pub mod targets;
pub mod tuple_expand;
pub mod visit;

pub use compat::{implicit_convertible, implicit_convertible_barring};
pub use convert::{delegate_target_type, resolve_delegate};
pub use delegation::{RegistrationError, register_delegate};
pub use expr::{Expr, ExprKind};
pub use search::{DelegationSearch, Probe, ProbeOutcome, SearchOutcome};
pub use targets::{ConversionTargets, collect_conversion_targets};
pub use tuple_expand::{expand_tuple_delegations, find_tuple_delegate};
pub use visit::{Visit, VisitGuard};
