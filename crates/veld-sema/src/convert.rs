//! Conversion expression construction.
//!
//! Given a chosen delegate and a source expression, build the forwarding
//! expression (and, on the type-only path, just its target type). Overloaded
//! delegate methods are narrowed to the receiver-qualifier-compatible
//! candidates, preferring an exact qualifier match over a merely compatible
//! one; failures produce a `TypeId::ERROR`-typed expression, never a panic.

use crate::expr::Expr;
use veld_common::Span;
use veld_common::diagnostics::{Diagnostic, diagnostic_codes, format_message, get_message_template};
use veld_types::{DelegateSymbol, MethodSig, Qualifiers, SymbolKind, TypeId, TypeTable};

/// Outcome of receiver-qualifier overload selection.
enum Selection {
    Chosen(MethodSig),
    NoCompatible,
    Ambiguous,
}

/// Pick the overload whose implicit receiver accepts `source` qualifiers.
///
/// A single exact qualifier match beats any number of merely compatible
/// candidates; with no exact match, a unique compatible candidate wins.
fn select_overload(overloads: &[MethodSig], source: Qualifiers) -> Selection {
    let compatible: Vec<MethodSig> = overloads
        .iter()
        .copied()
        .filter(|sig| sig.receiver.accepts(source))
        .collect();
    if compatible.is_empty() {
        return Selection::NoCompatible;
    }
    let exact: Vec<MethodSig> = compatible
        .iter()
        .copied()
        .filter(|sig| sig.receiver.is_exact_for(source))
        .collect();
    match (exact.as_slice(), compatible.as_slice()) {
        ([sig], _) => Selection::Chosen(*sig),
        ([], [sig]) => Selection::Chosen(*sig),
        _ => Selection::Ambiguous,
    }
}

fn emit(diags: &mut Vec<Diagnostic>, code: u32, args: &[&str]) {
    let template = get_message_template(code).unwrap_or("{0}");
    diags.push(Diagnostic::error(
        Span::default(),
        format_message(template, args),
        code,
    ));
}

/// The overload set of a method or instantiated template delegate, or `None`
/// when instantiation fails.
fn method_overloads(table: &TypeTable, delegate: DelegateSymbol) -> Option<Vec<MethodSig>> {
    match &table.symbol(delegate.symbol()).kind {
        SymbolKind::Method { overloads } => Some(overloads.to_vec()),
        SymbolKind::TemplateMethod { instance } => instance.as_ref().map(|sigs| sigs.to_vec()),
        _ => None,
    }
}

/// Build the forwarding expression for `delegate` rooted at `source`.
///
/// The returned expression's type is fully resolved; on overload-selection
/// failure, failed template instantiation, or an undeterminable return type
/// it is the error sentinel and a diagnostic has been pushed onto `diags`
/// (the search discards both under suppression).
pub fn resolve_delegate(
    table: &mut TypeTable,
    diags: &mut Vec<Diagnostic>,
    source: &Expr,
    delegate: DelegateSymbol,
) -> Expr {
    let source_quals = table.quals(source.ty);
    let sym = delegate.symbol();
    match delegate {
        DelegateSymbol::Field(_) => {
            let SymbolKind::Field { ty } = table.symbol(sym).kind else {
                return Expr::error();
            };
            // A field's type absorbs the qualifiers of the source.
            let ty = table.add_quals(ty, source_quals);
            let member = Expr::member(source.clone(), sym, ty);
            if source.in_type_context() {
                // No receiver instance exists; type-check the access inside
                // a typeof-style wrapper.
                Expr::type_only(member)
            } else {
                member
            }
        }
        DelegateSymbol::EnumConst(_) => {
            let SymbolKind::EnumConst { ty } = table.symbol(sym).kind else {
                return Expr::error();
            };
            Expr::member(source.clone(), sym, ty)
        }
        DelegateSymbol::Method(_) | DelegateSymbol::TemplateMethod(_) => {
            resolve_method_delegate(table, diags, source, delegate)
        }
        // A tuple delegate has no single-valued forwarding expression; the
        // tuple expander handles it.
        DelegateSymbol::Tuple(_) => Expr::error(),
    }
}

fn resolve_method_delegate(
    table: &mut TypeTable,
    diags: &mut Vec<Diagnostic>,
    source: &Expr,
    delegate: DelegateSymbol,
) -> Expr {
    let sym = delegate.symbol();
    let name = table.symbol_name(sym).to_string();
    let source_quals = table.quals(source.ty);

    let Some(overloads) = method_overloads(table, delegate) else {
        emit(diags, diagnostic_codes::TEMPLATE_INSTANTIATION_FAILED, &[&name]);
        return Expr::error();
    };
    let sig = match select_overload(&overloads, source_quals) {
        Selection::Chosen(sig) => sig,
        Selection::NoCompatible => {
            emit(
                diags,
                diagnostic_codes::NO_QUALIFIER_COMPATIBLE_OVERLOAD,
                &[&name, source_quals.describe()],
            );
            return Expr::error();
        }
        Selection::Ambiguous => {
            emit(
                diags,
                diagnostic_codes::AMBIGUOUS_RECEIVER_OVERLOAD,
                &[&name, source_quals.describe()],
            );
            return Expr::error();
        }
    };
    let Some(ret) = sig.ret else {
        emit(diags, diagnostic_codes::UNRESOLVED_RETURN_TYPE, &[&name]);
        return Expr::error();
    };
    let ret = table.subst_wild(ret, source_quals);
    let member = Expr::member(source.clone(), sym, ret);

    if source.in_type_context() {
        // Type-only query: no receiver instance exists. Property accessors
        // stay deferred inside the typeof wrapper; a non-property call is
        // resolved eagerly first and only then wrapped.
        if sig.is_property {
            Expr::type_only(member)
        } else {
            Expr::type_only(Expr::call(member, ret))
        }
    } else {
        // Value context: referencing the delegate as a value invokes it.
        Expr::call(member, ret)
    }
}

/// Type-only path: the target type a conversion through `delegate` produces
/// from a source of type `source_ty`, plus whether the conversion yields an
/// lvalue. Returns `None` when the target cannot be resolved (tuple
/// delegates, failed instantiation, incompatible or ambiguous overloads,
/// unknown return type).
pub fn delegate_target_type(
    table: &mut TypeTable,
    source_ty: TypeId,
    delegate: DelegateSymbol,
) -> Option<(TypeId, bool)> {
    let source_quals = table.quals(source_ty);
    let sym = delegate.symbol();
    match delegate {
        DelegateSymbol::Field(_) => {
            let SymbolKind::Field { ty } = table.symbol(sym).kind else {
                return None;
            };
            // A field is always an lvalue.
            Some((table.add_quals(ty, source_quals), true))
        }
        DelegateSymbol::EnumConst(_) => {
            let SymbolKind::EnumConst { ty } = table.symbol(sym).kind else {
                return None;
            };
            Some((ty, false))
        }
        DelegateSymbol::Method(_) | DelegateSymbol::TemplateMethod(_) => {
            let overloads = method_overloads(table, delegate)?;
            let Selection::Chosen(sig) = select_overload(&overloads, source_quals) else {
                return None;
            };
            let ret = sig.ret?;
            let ret = table.subst_wild(ret, source_quals);
            Some((ret, sig.returns_ref))
        }
        DelegateSymbol::Tuple(_) => None,
    }
}
