//! Tuple delegate expansion.
//!
//! An argument whose type delegates to a tuple member stands for several
//! values at once. Expansion rewrites an expression list in place, splicing
//! one member access per tuple element where the original expression stood.
//! The matched expression need not delegate to the tuple directly; a chain
//! of single non-tuple delegates ending in a tuple delegate also counts.

use rustc_hash::FxHashSet;
use veld_types::{DelegateSymbol, SymbolId, SymbolKind, TypeId, TypeTable};

use crate::convert::delegate_target_type;
use crate::expr::Expr;

/// Find the tuple symbol an expression's type ultimately delegates to, or
/// `None` if the type does not forward to a tuple of two or more elements.
///
/// Follows chains of sole non-tuple delegates. A seen-set cuts cyclic
/// chains; a cycle means no tuple is reachable.
pub fn find_tuple_delegate(table: &mut TypeTable, expr: &Expr) -> Option<SymbolId> {
    let mut seen: FxHashSet<TypeId> = FxHashSet::default();
    let mut ty = expr.ty;
    loop {
        let agg = table.aggregate_of(ty)?;
        if !seen.insert(ty) {
            return None;
        }
        let sole = table.delegation(agg).sole()?;
        match sole {
            DelegateSymbol::Tuple(sym) => {
                let SymbolKind::Tuple { elements } = &table.symbol(sym).kind else {
                    return None;
                };
                // A 0- or 1-element tuple gains nothing from expansion.
                return (elements.len() >= 2).then_some(sym);
            }
            other => {
                let (next, _) = delegate_target_type(table, ty, other)?;
                if next.is_error() {
                    return None;
                }
                ty = next;
            }
        }
    }
}

fn element_type(table: &TypeTable, elem: SymbolId) -> TypeId {
    match table.symbol(elem).kind {
        SymbolKind::Field { ty } => ty,
        _ => TypeId::ERROR,
    }
}

/// Expand the first tuple-delegating expression in `exprs` at or after
/// index `from`. The matched expression is replaced by one member access
/// per tuple element, in element order. Returns the index of the expansion
/// so the caller can resume scanning past the spliced elements, or `None`
/// when nothing at or after `from` expands.
pub fn expand_tuple_delegations(
    table: &mut TypeTable,
    exprs: &mut Vec<Expr>,
    from: usize,
) -> Option<usize> {
    for u in from..exprs.len() {
        let Some(tuple_sym) = find_tuple_delegate(table, &exprs[u]) else {
            continue;
        };
        let SymbolKind::Tuple { elements } = &table.symbol(tuple_sym).kind else {
            continue;
        };
        let elements = elements.clone();
        let base = exprs.remove(u);
        tracing::debug!(
            ty = %table.display_type(base.ty),
            count = elements.len(),
            "expanding tuple delegate"
        );
        for (i, elem) in elements.into_iter().enumerate() {
            let ty = element_type(table, elem);
            exprs.insert(u + i, Expr::member(base.clone(), elem, ty));
        }
        return Some(u);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ExprKind;
    use veld_types::{AggregateKind, Qualifiers, TypeKind};

    fn var(table: &mut TypeTable, name: &str, ty: TypeId) -> Expr {
        let atom = table.intern_name(name);
        Expr::var(atom, ty)
    }

    #[test]
    fn non_tuple_delegation_does_not_expand() {
        let mut table = TypeTable::new();
        let int = table.intern(TypeKind::Int32, Qualifiers::empty());
        let s = table.new_aggregate("S", AggregateKind::Value);
        let f = table.add_field(s, "value", int);
        table.delegation_mut(s).push(DelegateSymbol::Field(f));
        let s_ty = table.aggregate_type(s);

        let e = var(&mut table, "s", s_ty);
        assert_eq!(find_tuple_delegate(&mut table, &e), None);
    }

    #[test]
    fn chained_delegation_reaches_the_tuple() {
        let mut table = TypeTable::new();
        let int = table.intern(TypeKind::Int32, Qualifiers::empty());
        let long = table.intern(TypeKind::Int64, Qualifiers::empty());

        let inner = table.new_aggregate("Inner", AggregateKind::Value);
        let tuple = table.add_tuple(inner, "pair", [("a", int), ("b", long)]);
        table.delegation_mut(inner).push(DelegateSymbol::Tuple(tuple));
        let inner_ty = table.aggregate_type(inner);

        let outer = table.new_aggregate("Outer", AggregateKind::Value);
        let f = table.add_field(outer, "inner", inner_ty);
        table.delegation_mut(outer).push(DelegateSymbol::Field(f));
        let outer_ty = table.aggregate_type(outer);

        let e = var(&mut table, "o", outer_ty);
        assert_eq!(find_tuple_delegate(&mut table, &e), Some(tuple));
    }

    #[test]
    fn cyclic_chain_yields_no_tuple() {
        let mut table = TypeTable::new();
        let a = table.new_aggregate("A", AggregateKind::Value);
        let b = table.new_aggregate("B", AggregateKind::Value);
        let a_ty = table.aggregate_type(a);
        let b_ty = table.aggregate_type(b);
        let fa = table.add_field(a, "b", b_ty);
        table.delegation_mut(a).push(DelegateSymbol::Field(fa));
        let fb = table.add_field(b, "a", a_ty);
        table.delegation_mut(b).push(DelegateSymbol::Field(fb));

        let e = var(&mut table, "a", a_ty);
        assert_eq!(find_tuple_delegate(&mut table, &e), None);
    }

    #[test]
    fn expansion_splices_member_accesses_in_place() {
        let mut table = TypeTable::new();
        let int = table.intern(TypeKind::Int32, Qualifiers::empty());
        let long = table.intern(TypeKind::Int64, Qualifiers::empty());
        let s = table.new_aggregate("Pair", AggregateKind::Value);
        let tuple = table.add_tuple(s, "fields", [("a", int), ("b", long)]);
        table.delegation_mut(s).push(DelegateSymbol::Tuple(tuple));
        let s_ty = table.aggregate_type(s);

        let e0 = var(&mut table, "x", int);
        let e1 = var(&mut table, "p", s_ty);
        let e2 = var(&mut table, "y", long);
        let mut exprs = vec![e0, e1, e2];

        assert_eq!(expand_tuple_delegations(&mut table, &mut exprs, 0), Some(1));
        assert_eq!(exprs.len(), 4);
        assert_eq!(exprs[0].ty, int);
        assert!(matches!(exprs[1].kind, ExprKind::Member { .. }));
        assert_eq!(exprs[1].ty, int);
        assert!(matches!(exprs[2].kind, ExprKind::Member { .. }));
        assert_eq!(exprs[2].ty, long);
        assert_eq!(exprs[3].ty, long);

        // Both spliced accesses share the matched expression as their base.
        for spliced in &exprs[1..3] {
            let ExprKind::Member { base, .. } = &spliced.kind else {
                panic!("expected member access");
            };
            assert_eq!(base.ty, s_ty);
        }

        // Resuming past the splice finds nothing more to expand.
        assert_eq!(expand_tuple_delegations(&mut table, &mut exprs, 3), None);
    }

    #[test]
    fn single_element_tuple_is_left_alone() {
        let mut table = TypeTable::new();
        let int = table.intern(TypeKind::Int32, Qualifiers::empty());
        let s = table.new_aggregate("S", AggregateKind::Value);
        let tuple = table.add_tuple(s, "one", [("a", int)]);
        table.delegation_mut(s).push(DelegateSymbol::Tuple(tuple));
        let s_ty = table.aggregate_type(s);

        let e = var(&mut table, "s", s_ty);
        assert_eq!(find_tuple_delegate(&mut table, &e), None);
    }
}
