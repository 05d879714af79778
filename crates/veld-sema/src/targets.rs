//! Conversion target enumeration.
//!
//! Walks a type's delegation graph and gathers every type it can implicitly
//! convert to through delegates, in discovery order. Used by callers that
//! need the full candidate set up front, for example overload ranking and
//! diagnostics that list the conversions a type offers.

use indexmap::IndexMap;
use veld_types::{AggregateKind, TypeId, TypeTable};

use crate::convert::delegate_target_type;
use crate::visit::{MAX_DELEGATION_DEPTH, Visit, VisitGuard};

/// Ordered set of reachable conversion targets. Each target carries whether
/// the conversion yields an lvalue (a field access or a `ref` return).
#[derive(Debug, Default)]
pub struct ConversionTargets {
    entries: IndexMap<TypeId, bool>,
}

impl ConversionTargets {
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, bool)> + '_ {
        self.entries.iter().map(|(&ty, &lvalue)| (ty, lvalue))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.entries.contains_key(&ty)
    }

    /// Whether converting to `ty` yields an lvalue. `None` if `ty` is not a
    /// reachable target.
    pub fn is_lvalue(&self, ty: TypeId) -> Option<bool> {
        self.entries.get(&ty).copied()
    }
}

/// Collect every type `ty` converts to through its delegation graph,
/// breadth of the graph first in declaration order, then depth through each
/// newly discovered target, then base types.
///
/// The first discovery of a target wins; later paths to the same type do
/// not change its lvalue flag and are not re-entered.
pub fn collect_conversion_targets(table: &mut TypeTable, ty: TypeId) -> ConversionTargets {
    let mut targets = ConversionTargets::default();
    let mut guard = VisitGuard::new(MAX_DELEGATION_DEPTH);
    collect_into(table, ty, &mut guard, &mut targets);
    targets
}

fn collect_into(
    table: &mut TypeTable,
    ty: TypeId,
    guard: &mut VisitGuard<TypeId>,
    out: &mut ConversionTargets,
) {
    let Some(agg) = table.aggregate_of(ty) else {
        return;
    };
    if guard.enter(ty) != Visit::Entered {
        tracing::trace!(ty = %table.display_type(ty), "target collection cycle");
        return;
    }

    let entries: Vec<_> = table.delegation(agg).iter().collect();
    for delegate in entries {
        let Some((target, lvalue)) = delegate_target_type(table, ty, delegate) else {
            continue;
        };
        if target.is_error() || out.contains(target) {
            continue;
        }
        out.entries.insert(target, lvalue);
        collect_into(table, target, guard, out);
    }

    if table.aggregate(agg).kind == AggregateKind::Reference {
        let quals = table.quals(ty);
        let bases = table.aggregate(agg).bases.clone();
        for base in bases {
            let base_ty = table.add_quals(base, quals);
            collect_into(table, base_ty, guard, out);
        }
    }

    guard.leave(ty);
}
