//! Binding trace: the store of semantic facts recorded during resolution.
//!
//! The trace maps `(slice, key)` pairs to values. A [`Slice`] is a typed
//! channel (e.g. "declaration -> function descriptor"); the store is the union
//! of all channels.
//!
//! - `slice` - typed channel definitions
//! - `slices` - well-known channels used by the resolver
//! - `trace` - the [`BindingTrace`] contract and the base [`BindingTraceContext`]
//! - `lazy` - [`LazyForcingTrace`], resolving declarations on first lookup
//! - `guard` - in-progress markers for forced resolutions
//!
//! The trace is single-threaded and owned by one compilation pass.

pub mod error;
pub use error::TraceError;

pub mod options;
pub use options::TraceOptions;

pub mod slice;
pub use slice::{Slice, SliceId, SliceKey, SliceKind, SliceValue};

pub mod slices;

pub mod trace;
pub use trace::{BindingTrace, BindingTraceContext};

mod guard;

pub mod lazy;
pub use lazy::{LazyForcingTrace, NoResolutionSession, ResolutionSession};

#[cfg(test)]
#[path = "../tests/trace_tests.rs"]
mod trace_tests;

#[cfg(test)]
#[path = "../tests/lazy_tests.rs"]
mod lazy_tests;
