//! kres: binding trace and overload conflict detection.
//!
//! The frontend is split into crates, re-exported here:
//! - `common` - names, spans, diagnostics and limits
//! - `descriptors` - declaration handles and resolved descriptors
//! - `trace` - the binding trace and its lazily forcing variant
//! - `checker` - declaration grouping, overload analysis and conflict reporting
//!
//! [`check_file`] runs the overload pass over one file's declarations and
//! returns rendered diagnostics. Set `KRES_LOG` to see what the pass does
//! (see [`tracing_config`]).

pub use kres_checker as checker;
pub use kres_common as common;
pub use kres_descriptors as descriptors;
pub use kres_trace as trace;

pub use kres_checker::{OverloadReport, ResolvedDeclarations, check_overloads};
pub use kres_common::Diagnostic;
pub use kres_trace::{BindingTrace, BindingTraceContext, LazyForcingTrace, TraceError};

pub mod tracing_config;

use kres_checker::RenderingCollector;
use tracing::debug;

/// Check `declarations` of `file` for redeclarations and conflicting
/// overloads.
///
/// # Errors
///
/// Returns the trace error when a declaration's descriptor is missing.
pub fn check_file<T: BindingTrace>(
    trace: &T,
    declarations: &ResolvedDeclarations,
    file: &str,
) -> Result<Vec<Diagnostic>, TraceError> {
    let mut collector = RenderingCollector::new(file);
    let report = check_overloads(trace, declarations, &mut collector)?;
    debug!(
        file,
        groups = report.groups_checked,
        conflicts = report.conflicts_reported,
        "file checked"
    );
    Ok(collector.into_diagnostics())
}

#[cfg(test)]
pub mod test_fixtures;

#[cfg(test)]
#[path = "../tests/overload_compatibility_tests.rs"]
mod overload_compatibility_tests;

#[cfg(test)]
#[path = "../tests/redeclaration_tests.rs"]
mod redeclaration_tests;

#[cfg(test)]
#[path = "../tests/lazy_resolution_tests.rs"]
mod lazy_resolution_tests;

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tracing_config_tests;
