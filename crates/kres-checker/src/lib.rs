//! Overload and redeclaration checking.
//!
//! This crate is organized into several modules:
//! - `context` - the declarations collected for one pass
//! - `grouping` - per-container, per-name groups of callables
//! - `overload` - pairwise overloadability and redeclaration search
//! - `reporter` - conflict diagnostics and container display names
//! - `resolver` - `OverloadResolver`, the pass entry point
//!
//! Conflicts are collected, never fatal: every group is checked even after
//! earlier groups produced diagnostics.

pub mod context;
pub use context::ResolvedDeclarations;

pub mod grouping;
pub mod overload;
pub use overload::{
    ConflictReason, Overloadability, OverloadabilityOracle, Redeclaration,
    SignatureOverloadability, find_redeclarations,
};

pub mod reporter;
pub use reporter::{
    ConflictDiagnostic, ConflictKind, ConflictPayload, ConflictReporter, DiagnosticsCollector,
    RenderingCollector,
};

pub mod resolver;
pub use resolver::{OverloadReport, OverloadResolver, check_overloads};

pub mod diagnostics {
    pub use kres_common::diagnostics::{
        Diagnostic, DiagnosticCategory, diagnostic_codes, diagnostic_messages, format_message,
    };
}

#[cfg(test)]
#[path = "../tests/grouping_tests.rs"]
mod grouping_tests;

#[cfg(test)]
#[path = "../tests/overload_tests.rs"]
mod overload_tests;

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
