use kres_descriptors::DeclId;
use thiserror::Error;

/// Errors surfaced by trace lookups.
///
/// None of these are user-facing diagnostics: each one means the resolver
/// and its callers disagree about what has been resolved, and the current
/// phase should stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// A value the caller depends on was never recorded and no forcing
    /// policy could produce it.
    #[error("{slice} has no value for {key}: descriptor was not resolved")]
    UnresolvedDescriptor { slice: &'static str, key: String },

    /// Forcing a declaration re-entered forcing of the same declaration.
    #[error("cyclic resolution: {declaration} is already being resolved")]
    ForcingCycle { declaration: String, id: DeclId },

    #[error("resolution of {declaration} exceeds the forcing depth limit of {depth}")]
    ForcingTooDeep { declaration: String, depth: u32 },
}
