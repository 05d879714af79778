//! Implicit convertibility.
//!
//! The delegation machinery needs exactly four conversion rules: identity,
//! const widening, reference-aggregate base upcast, and conversion through a
//! delegate. Anything subtler (value-range conversions, user-defined
//! conversion ranking) belongs to the full conversion engine elsewhere.

use crate::expr::Expr;
use crate::search::{DelegationSearch, ProbeOutcome};
use veld_types::{AggregateId, AggregateKind, Qualifiers, TypeId, TypeTable};

/// `from` is implicitly convertible to `to`.
pub fn implicit_convertible(table: &mut TypeTable, from: TypeId, to: TypeId) -> bool {
    implicit_convertible_barring(table, from, to, &[])
}

/// Convertibility check with the delegation of every aggregate in `barred`
/// ignored.
///
/// Registration uses this to ask "does the aggregate already convert to the
/// new delegate's target *without* its own delegation". The barred
/// list also grows as the check recurses through delegates, which is what
/// keeps mutually-delegating aggregates from recursing forever.
pub fn implicit_convertible_barring(
    table: &mut TypeTable,
    from: TypeId,
    to: TypeId,
    barred: &[AggregateId],
) -> bool {
    if from == to {
        return true;
    }
    if from.is_error() || to.is_error() {
        return false;
    }
    if table.kind(from) == table.kind(to) && const_widens(table.quals(from), table.quals(to)) {
        return true;
    }

    let Some(agg) = table.aggregate_of(from) else {
        return false;
    };

    if table.aggregate(agg).kind == AggregateKind::Reference && base_reaches(table, agg, to) {
        return true;
    }

    if barred.contains(&agg) {
        return false;
    }
    let mut barred = barred.to_vec();
    barred.push(agg);

    // Delegation rule: does any reachable delegation target convert?
    // Probing is speculative, so candidate diagnostics are discarded.
    let mut scratch = Vec::new();
    let mut search = DelegationSearch::new(table, &mut scratch, true);
    let source = Expr::type_ref(from);
    let outcome = search.search(&source, &mut |table, candidate| {
        if implicit_convertible_barring(table, candidate.ty, to, &barred) {
            ProbeOutcome::matched()
        } else {
            ProbeOutcome::no_match()
        }
    });
    outcome.matched
}

/// Adding `const` is implicit; removing it is not.
fn const_widens(from: Qualifiers, to: Qualifiers) -> bool {
    to.contains(from) && ((to - from) - Qualifiers::CONST).is_empty()
}

/// Whether `to` is among the (transitive) base types of `agg`, modulo const
/// widening.
fn base_reaches(table: &mut TypeTable, agg: AggregateId, to: TypeId) -> bool {
    let bases = table.aggregate(agg).bases.clone();
    for base in bases {
        if base == to
            || (table.kind(base) == table.kind(to)
                && const_widens(table.quals(base), table.quals(to)))
        {
            return true;
        }
        if let Some(base_agg) = table.aggregate_of(base)
            && base_reaches(table, base_agg, to)
        {
            return true;
        }
    }
    false
}
