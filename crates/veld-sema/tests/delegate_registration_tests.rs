//! Declaration-time delegate registration, end to end against the public
//! API: ordering, the singleton tuple rule, masking checks, and recovery
//! state after rejected declarations.

use veld_common::Span;
use veld_common::diagnostics::diagnostic_codes;
use veld_sema::{RegistrationError, collect_conversion_targets, register_delegate};
use veld_types::{AggregateKind, MethodSig, Qualifiers, ReceiverQual, TypeKind, TypeTable};

fn span() -> Span {
    Span::new(0, 0)
}

#[test]
fn declaration_order_drives_collection_order() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());
    let float = table.intern(TypeKind::Float64, Qualifiers::empty());
    let str_ty = table.intern(TypeKind::Str, Qualifiers::empty());
    let s = table.new_aggregate("S", AggregateKind::Value);
    table.add_field(s, "a", int);
    table.add_field(s, "b", float);
    table.add_field(s, "c", str_ty);
    let s_ty = table.aggregate_type(s);

    register_delegate(&mut table, &mut diags, s_ty, "b", span()).unwrap();
    register_delegate(&mut table, &mut diags, s_ty, "c", span()).unwrap();
    register_delegate(&mut table, &mut diags, s_ty, "a", span()).unwrap();
    assert!(diags.is_empty());

    let targets = collect_conversion_targets(&mut table, s_ty);
    let got: Vec<_> = targets.iter().map(|(ty, _)| ty).collect();
    assert_eq!(got, vec![float, str_ty, int]);
}

#[test]
fn delegate_on_a_primitive_is_rejected() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());
    assert_eq!(
        register_delegate(&mut table, &mut diags, int, "anything", span()),
        Err(RegistrationError::NotAnAggregate)
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, diagnostic_codes::DELEGATE_OUTSIDE_AGGREGATE);
}

#[test]
fn field_then_method_with_same_type_is_an_override() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());
    let s = table.new_aggregate("S", AggregateKind::Value);
    table.add_field(s, "value", int);
    table.add_method(s, "get", [MethodSig::new(ReceiverQual::Const, int)]);
    let s_ty = table.aggregate_type(s);

    register_delegate(&mut table, &mut diags, s_ty, "value", span()).unwrap();
    assert_eq!(
        register_delegate(&mut table, &mut diags, s_ty, "get", span()),
        Err(RegistrationError::OverridingDelegate)
    );
    // Error recovery keeps the delegate so later lookups stay consistent.
    assert_eq!(table.delegation(s).len(), 2);
}

#[test]
fn distinct_target_types_coexist() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());
    let float = table.intern(TypeKind::Float64, Qualifiers::empty());
    let s = table.new_aggregate("S", AggregateKind::Value);
    table.add_field(s, "value", int);
    table.add_method(s, "get", [MethodSig::new(ReceiverQual::Const, float)]);
    let s_ty = table.aggregate_type(s);

    register_delegate(&mut table, &mut diags, s_ty, "value", span()).unwrap();
    register_delegate(&mut table, &mut diags, s_ty, "get", span()).unwrap();
    assert!(diags.is_empty());
}

#[test]
fn base_class_conversion_masks_a_delegate() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let base = table.new_aggregate("Base", AggregateKind::Reference);
    let derived = table.new_aggregate("Derived", AggregateKind::Reference);
    let base_ty = table.aggregate_type(base);
    let derived_ty = table.aggregate_type(derived);
    table.add_base(derived, base_ty);
    table.add_field(derived, "owner", base_ty);

    assert_eq!(
        register_delegate(&mut table, &mut diags, derived_ty, "owner", span()),
        Err(RegistrationError::UnreachableDelegate)
    );
    assert_eq!(diags[0].code, diagnostic_codes::UNREACHABLE_DELEGATE);
}

#[test]
fn own_delegation_does_not_mask_itself() {
    // Reachability must judge the aggregate as if it had no delegation of
    // its own; otherwise registering any second delegate whose target is
    // reachable through the first would be impossible to distinguish from
    // genuine masking.
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());
    let mid = table.new_aggregate("Mid", AggregateKind::Value);
    table.add_field(mid, "value", int);
    let mid_ty = table.aggregate_type(mid);
    register_delegate(&mut table, &mut diags, mid_ty, "value", span()).unwrap();

    let s = table.new_aggregate("S", AggregateKind::Value);
    table.add_field(s, "mid", mid_ty);
    table.add_field(s, "direct", int);
    let s_ty = table.aggregate_type(s);

    register_delegate(&mut table, &mut diags, s_ty, "mid", span()).unwrap();
    register_delegate(&mut table, &mut diags, s_ty, "direct", span()).unwrap();
    assert!(diags.is_empty());
}

#[test]
fn tuple_delegate_excludes_everything_else() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());
    let long = table.intern(TypeKind::Int64, Qualifiers::empty());
    let s = table.new_aggregate("S", AggregateKind::Value);
    table.add_tuple(s, "pair", [("a", int), ("b", long)]);
    table.add_field(s, "single", int);
    let s_ty = table.aggregate_type(s);

    register_delegate(&mut table, &mut diags, s_ty, "pair", span()).unwrap();
    assert_eq!(
        register_delegate(&mut table, &mut diags, s_ty, "single", span()),
        Err(RegistrationError::ConflictingTupleDelegate)
    );
    assert_eq!(diags[0].code, diagnostic_codes::CONFLICTING_TUPLE_DELEGATE);
}

#[test]
fn lookup_failures_distinguish_unknown_from_foreign() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());
    let s = table.new_aggregate("S", AggregateKind::Value);
    let t = table.new_aggregate("T", AggregateKind::Value);
    table.add_field(t, "other", int);
    let s_ty = table.aggregate_type(s);

    assert!(matches!(
        register_delegate(&mut table, &mut diags, s_ty, "missing", span()),
        Err(RegistrationError::UnknownMember(_))
    ));
    assert!(matches!(
        register_delegate(&mut table, &mut diags, s_ty, "other", span()),
        Err(RegistrationError::NotAMember(_, _))
    ));
    assert_eq!(diags[0].code, diagnostic_codes::UNDEFINED_IDENTIFIER);
    assert_eq!(diags[1].code, diagnostic_codes::NOT_A_MEMBER);
    assert!(table.delegation(s).is_empty());
}

#[test]
fn stale_redeclaration_reuses_the_canonical_list() {
    let mut table = TypeTable::new();
    let mut diags = Vec::new();
    let int = table.intern(TypeKind::Int32, Qualifiers::empty());

    let canonical = table.new_aggregate("S", AggregateKind::Value);
    table.add_field(canonical, "value", int);
    let canonical_ty = table.aggregate_type(canonical);
    register_delegate(&mut table, &mut diags, canonical_ty, "value", span()).unwrap();

    let stale = table.new_aggregate("S", AggregateKind::Value);
    table.set_canonical(stale, canonical);
    table.add_field(stale, "value", int);
    let stale_ty = table.aggregate_type(stale);
    register_delegate(&mut table, &mut diags, stale_ty, "value", span()).unwrap();

    assert!(diags.is_empty());
    assert_eq!(table.delegation(canonical).len(), 1);
    assert_eq!(table.delegation(stale).len(), 1);

    // The stale type converts through the shared list.
    let targets = collect_conversion_targets(&mut table, stale_ty);
    assert!(targets.contains(int));
}
