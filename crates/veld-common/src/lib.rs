//! Common types and utilities for the veld compiler.
//!
//! This crate provides foundational types used across all veld crates:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};
