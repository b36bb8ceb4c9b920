//! Tracing configuration.
//!
//! Supports three output formats controlled by `KRES_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one level per
//!   nested forcing or per checked group
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Why was this declaration resolved twice?
//! KRES_LOG=kres_trace=debug KRES_LOG_FORMAT=tree my-tool
//!
//! # Every group the overload pass looks at
//! KRES_LOG=kres_checker=trace my-tool
//! ```
//!
//! The subscriber is only initialised when `KRES_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "KRES_LOG";
const LOG_FORMAT_VAR: &str = "KRES_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines.
    #[default]
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively. Unknown names mean `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// Build an `EnvFilter` from `KRES_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_VAR) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `KRES_LOG` nor `RUST_LOG` is set. Output goes
/// to stderr. Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    if std::env::var_os(LOG_VAR).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    // try_init: embedding tools may already have installed a subscriber.
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);

            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
}
