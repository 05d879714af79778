//! Depth-first search over the delegation graph.
//!
//! `DelegationSearch` visits, in order: the source aggregate's direct
//! delegates, then (for each delegate the probe did not match) that
//! candidate's own delegation graph, then the base types of a reference
//! aggregate in declaration order. The probe decides what "found" means, so
//! the same walk serves implicit-conversion checks, member lookup, and
//! anything else that needs to look through delegation.

use crate::convert::resolve_delegate;
use crate::expr::Expr;
use crate::visit::{MAX_DELEGATION_DEPTH, Visit, VisitGuard};
use veld_common::Diagnostic;
use veld_types::{AggregateKind, DelegateSymbol, TypeTable};

/// What a probe reports for one candidate expression.
///
/// `matched` stops the walk from descending through this candidate (siblings
/// are still visited). `output` may be present even without a match; every
/// output is accumulated into [`SearchOutcome::outputs`].
#[derive(Debug, Default)]
pub struct ProbeOutcome {
    pub matched: bool,
    pub output: Option<Expr>,
}

impl ProbeOutcome {
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn matched() -> Self {
        Self {
            matched: true,
            output: None,
        }
    }

    pub fn matched_with(output: Expr) -> Self {
        Self {
            matched: true,
            output: Some(output),
        }
    }
}

/// Caller-supplied predicate driving the search.
pub type Probe<'p> = dyn FnMut(&mut TypeTable, &Expr) -> ProbeOutcome + 'p;

/// Accumulated result of one search.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub matched: bool,
    pub outputs: Vec<Expr>,
}

/// One top-level delegation-graph walk.
///
/// The walk itself never fails: candidates that cannot be built contribute
/// nothing. With `suppress` set, diagnostics emitted while building a
/// candidate are rolled back and the candidate is skipped, so speculative
/// probing leaves no diagnostic noise behind; without it, the diagnostics
/// stay but error-typed candidates are still skipped.
pub struct DelegationSearch<'a> {
    table: &'a mut TypeTable,
    diags: &'a mut Vec<Diagnostic>,
    suppress: bool,
    guard: VisitGuard<veld_types::TypeId>,
}

impl<'a> DelegationSearch<'a> {
    pub fn new(table: &'a mut TypeTable, diags: &'a mut Vec<Diagnostic>, suppress: bool) -> Self {
        Self {
            table,
            diags,
            suppress,
            guard: VisitGuard::new(MAX_DELEGATION_DEPTH),
        }
    }

    pub fn search(&mut self, source: &Expr, probe: &mut Probe<'_>) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        self.search_inner(source, probe, &mut outcome);
        outcome
    }

    fn search_inner(&mut self, source: &Expr, probe: &mut Probe<'_>, out: &mut SearchOutcome) {
        let Some(agg) = self.table.aggregate_of(source.ty) else {
            return;
        };
        // The qualified type is the node identity: `S` and `const S` walk
        // independently, as their candidate sets differ.
        if self.guard.enter(source.ty) != Visit::Entered {
            tracing::trace!(
                source = self.table.identity_key(source.ty),
                "delegation search cycle"
            );
            return;
        }

        let entries: Vec<DelegateSymbol> = self.table.delegation(agg).iter().collect();
        for delegate in entries {
            let checkpoint = self.diags.len();
            let candidate = resolve_delegate(self.table, self.diags, source, delegate);
            if self.suppress && self.diags.len() > checkpoint {
                self.diags.truncate(checkpoint);
                continue;
            }
            if candidate.is_error() {
                continue;
            }
            let result = probe(self.table, &candidate);
            out.matched |= result.matched;
            if let Some(output) = result.output {
                out.outputs.push(output);
            }
            if !result.matched {
                // Only unmatched candidates are worth descending into; a
                // matched one already terminated productively.
                self.search_inner(&candidate, probe, out);
            }
        }

        let data = self.table.aggregate(agg);
        if data.kind == AggregateKind::Reference {
            let bases = data.bases.clone();
            let source_quals = self.table.quals(source.ty);
            for base in bases {
                let cast_ty = self.table.add_quals(base, source_quals);
                let cast = Expr::base_cast(source.clone(), cast_ty);
                self.search_inner(&cast, probe, out);
            }
        }

        self.guard.leave(source.ty);
    }
}
