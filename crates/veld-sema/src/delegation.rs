//! Delegate registration.
//!
//! Declaration-time processing of a `delegate <member>;` declaration inside
//! an aggregate. Registration enforces the list invariants (singleton tuple
//! rule, pairwise-distinct target types, no delegate masked by an existing
//! conversion) and reports violations as diagnostics. Violations are
//! non-fatal: except for lookup failures the offending delegate is still
//! appended so downstream passes see consistent state.

use crate::compat::implicit_convertible_barring;
use thiserror::Error;
use veld_common::Span;
use veld_common::diagnostics::{Diagnostic, diagnostic_codes, format_message, get_message_template};
use veld_types::{DelegateSymbol, SymbolId, SymbolKind, TypeId, TypeTable};

/// Why a delegate declaration was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("a delegate declaration is only allowed inside an aggregate")]
    NotAnAggregate,
    #[error("undefined identifier `{0}`")]
    UnknownMember(String),
    #[error("`{0}` is not a member of `{1}`")]
    NotAMember(String, String),
    #[error("there can be only one tuple delegate")]
    ConflictingTupleDelegate,
    #[error("delegate target is already reachable through an existing conversion")]
    UnreachableDelegate,
    #[error("delegate overrides another delegate with the same target type")]
    OverridingDelegate,
}

fn emit(diags: &mut Vec<Diagnostic>, span: Span, code: u32, args: &[&str]) {
    let template = get_message_template(code).unwrap_or("{0}");
    diags.push(Diagnostic::error(span, format_message(template, args), code));
}

fn classify(table: &TypeTable, sym: SymbolId) -> DelegateSymbol {
    match table.symbol(sym).kind {
        SymbolKind::Field { .. } => DelegateSymbol::Field(sym),
        SymbolKind::Method { .. } => DelegateSymbol::Method(sym),
        SymbolKind::TemplateMethod { .. } => DelegateSymbol::TemplateMethod(sym),
        SymbolKind::EnumConst { .. } => DelegateSymbol::EnumConst(sym),
        SymbolKind::Tuple { .. } => DelegateSymbol::Tuple(sym),
    }
}

/// The type the registration-time checks compare: a field's declared type or
/// a method's declared return type. Enum constants, templates, tuples, and
/// auto-return methods are exempt from the reachability and duplicate
/// checks, matching how little is known about them at declaration time.
fn registration_type(table: &TypeTable, delegate: DelegateSymbol) -> Option<TypeId> {
    match &table.symbol(delegate.symbol()).kind {
        SymbolKind::Field { ty } => Some(*ty),
        SymbolKind::Method { overloads } => overloads.first().and_then(|sig| sig.ret),
        _ => None,
    }
}

/// Process one delegate declaration: `parent` is the type of the lexically
/// enclosing declaration, `member_name` the declared forwarding member.
///
/// On success the delegate is appended to the aggregate's delegation list in
/// declaration order. All failures push a diagnostic; the recoverable ones
/// (tuple conflict, unreachable, override) still append the delegate.
pub fn register_delegate(
    table: &mut TypeTable,
    diags: &mut Vec<Diagnostic>,
    parent: TypeId,
    member_name: &str,
    span: Span,
) -> Result<(), RegistrationError> {
    let Some(agg) = table.aggregate_of(parent) else {
        let shown = table.display_type(parent);
        emit(diags, span, diagnostic_codes::DELEGATE_OUTSIDE_AGGREGATE, &[&shown]);
        return Err(RegistrationError::NotAnAggregate);
    };

    let Some(sym) = table.find_member(agg, member_name) else {
        return if table.any_symbol_named(member_name) {
            let agg_name = table.aggregate_name(agg).to_string();
            emit(diags, span, diagnostic_codes::NOT_A_MEMBER, &[member_name, &agg_name]);
            Err(RegistrationError::NotAMember(
                member_name.to_string(),
                agg_name,
            ))
        } else {
            emit(diags, span, diagnostic_codes::UNDEFINED_IDENTIFIER, &[member_name]);
            Err(RegistrationError::UnknownMember(member_name.to_string()))
        };
    };

    let delegate = classify(table, sym);
    let mut error = None;

    // Singleton tuple rule: a tuple delegate excludes every other entry.
    let list = table.delegation(agg);
    let conflicts = if delegate.is_tuple() {
        !list.is_empty() && list.sole() != Some(delegate)
    } else {
        list.first().is_some_and(DelegateSymbol::is_tuple)
    };
    if conflicts {
        emit(diags, span, diagnostic_codes::CONFLICTING_TUPLE_DELEGATE, &[]);
        error = Some(RegistrationError::ConflictingTupleDelegate);
    } else if delegate.is_tuple() && list.sole() == Some(delegate) {
        // Re-running semantics over the same declaration is idempotent.
        return Ok(());
    }

    // An error-recovery alias shares the canonical declaration's list; that
    // list was already validated when the canonical aggregate was processed.
    // A tuple conflict found just above still counts.
    if table.canonical_aggregate(agg) != agg {
        tracing::debug!(
            aggregate = table.aggregate_name(agg),
            "delegate registration forwarded to canonical declaration"
        );
        return match error {
            Some(err) => Err(err),
            None => Ok(()),
        };
    }

    if error.is_none()
        && let Some(target) = registration_type(table, delegate)
    {
        // Reachability: the conversion must not already exist without this
        // aggregate's own delegation contributing.
        if implicit_convertible_barring(table, parent, target, &[agg]) {
            let agg_name = table.aggregate_name(agg).to_string();
            let shown = table.display_type(target);
            emit(
                diags,
                span,
                diagnostic_codes::UNREACHABLE_DELEGATE,
                &[member_name, &agg_name, &shown],
            );
            error = Some(RegistrationError::UnreachableDelegate);
        }

        // Pairwise-distinct targets among the existing entries.
        let existing: Vec<DelegateSymbol> = table.delegation(agg).iter().collect();
        for prior in existing {
            if registration_type(table, prior) == Some(target) {
                let shown = table.display_type(target);
                emit(
                    diags,
                    span,
                    diagnostic_codes::OVERRIDING_DELEGATE,
                    &[member_name, &shown],
                );
                error = error.or(Some(RegistrationError::OverridingDelegate));
                break;
            }
        }
    }

    table.delegation_mut(agg).push(delegate);
    match error {
        Some(err) => Err(err),
        None => {
            tracing::debug!(
                aggregate = table.aggregate_name(agg),
                member = member_name,
                "registered delegate"
            );
            Ok(())
        }
    }
}
