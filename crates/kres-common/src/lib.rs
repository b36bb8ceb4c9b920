//! Common types and utilities for the kres compiler frontend.
//!
//! This crate provides foundational types used across all kres crates:
//! - Identifier names and fully qualified names (`Name`, `FqName`)
//! - Source spans (`Span`)
//! - Diagnostics model, codes and message templates
//! - Frontend limits and thresholds

// Names - identifiers and dotted qualified names
pub mod name;
pub use name::{FqName, Name};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

#[cfg(test)]
#[path = "../tests/name_tests.rs"]
mod name_tests;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
