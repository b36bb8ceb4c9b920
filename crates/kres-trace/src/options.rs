use kres_common::limits::MAX_FORCING_DEPTH;
use serde::Deserialize;

/// Configuration of a lazily forced trace.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraceOptions {
    /// Maximum number of nested forced resolutions.
    pub max_forcing_depth: u32,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            max_forcing_depth: MAX_FORCING_DEPTH,
        }
    }
}
