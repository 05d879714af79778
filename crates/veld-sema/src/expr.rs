//! Synthesized expressions.
//!
//! The conversion machinery never sees parsed syntax; it synthesizes the
//! forwarding expressions itself. Every expression carries a fully resolved
//! type; `TypeId::ERROR` marks a candidate whose construction failed.

use veld_common::Atom;
use veld_types::{SymbolId, TypeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// A named value, used as the root of a conversion chain.
    Var(Atom),
    /// A type used in expression position: the source of a "what does this
    /// type convert to" query rather than a value conversion.
    TypeRef,
    /// Member access.
    Member { base: Box<Expr>, symbol: SymbolId },
    /// Invocation of the resolved member (property auto-invocation or a
    /// zero-argument delegate method).
    Call { callee: Box<Expr> },
    /// The source cast to one of its base types.
    BaseCast { base: Box<Expr> },
    /// Deferred, typeof-style evaluation: the wrapped expression is
    /// type-checked without requiring a receiver instance.
    TypeOnly { inner: Box<Expr> },
    Error,
}

impl Expr {
    pub fn var(name: Atom, ty: TypeId) -> Self {
        Self {
            kind: ExprKind::Var(name),
            ty,
        }
    }

    pub fn type_ref(ty: TypeId) -> Self {
        Self {
            kind: ExprKind::TypeRef,
            ty,
        }
    }

    pub fn member(base: Expr, symbol: SymbolId, ty: TypeId) -> Self {
        Self {
            kind: ExprKind::Member {
                base: Box::new(base),
                symbol,
            },
            ty,
        }
    }

    pub fn call(callee: Expr, ty: TypeId) -> Self {
        Self {
            kind: ExprKind::Call {
                callee: Box::new(callee),
            },
            ty,
        }
    }

    pub fn base_cast(base: Expr, ty: TypeId) -> Self {
        Self {
            kind: ExprKind::BaseCast {
                base: Box::new(base),
            },
            ty,
        }
    }

    pub fn type_only(inner: Expr) -> Self {
        let ty = inner.ty;
        Self {
            kind: ExprKind::TypeOnly {
                inner: Box::new(inner),
            },
            ty,
        }
    }

    pub fn error() -> Self {
        Self {
            kind: ExprKind::Error,
            ty: TypeId::ERROR,
        }
    }

    pub fn is_error(&self) -> bool {
        self.ty.is_error()
    }

    /// Whether this expression denotes a type rather than a value, so member
    /// resolution must not require a receiver instance.
    pub fn in_type_context(&self) -> bool {
        matches!(self.kind, ExprKind::TypeRef | ExprKind::TypeOnly { .. })
    }

    /// The member symbol this expression resolves, looking through calls and
    /// deferred wrappers.
    pub fn resolved_member(&self) -> Option<SymbolId> {
        match &self.kind {
            ExprKind::Member { symbol, .. } => Some(*symbol),
            ExprKind::Call { callee } => callee.resolved_member(),
            ExprKind::TypeOnly { inner } => inner.resolved_member(),
            _ => None,
        }
    }
}
