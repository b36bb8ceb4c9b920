//! Lazily forced trace.
//!
//! In on-demand modes (tooling that resolves only what it is asked about)
//! a descriptor may be looked up before anything has resolved its
//! declaration. [`LazyForcingTrace`] closes that gap: a miss on a derivable
//! slice asks the [`ResolutionSession`] to resolve the declaration, and the
//! session records the descriptor into this same trace before the lookup
//! falls through to the base store. Every later lookup is a plain hit.
//!
//! The same trace also drops the scope caches (`RESOLUTION_SCOPE`,
//! `TYPE_RESOLUTION_SCOPE`): a batch compile never reads them back, and
//! keeping one scope per expression for a whole program is pure memory cost.

use crate::error::TraceError;
use crate::guard::ForcingStack;
use crate::options::TraceOptions;
use crate::slice::{Slice, SliceKey, SliceValue};
use crate::slices::SCOPE_CACHE_SLICES;
use crate::trace::{BindingTrace, BindingTraceContext};
use kres_descriptors::Declaration;
use std::cell::Cell;
use tracing::{debug, trace};

/// Resolver entry point used to complete a missing descriptor.
pub trait ResolutionSession {
    /// Resolve `declaration` and record its descriptor into `trace`.
    ///
    /// Must be idempotent: resolving an already resolved declaration is a
    /// no-op. Never called for local declarations.
    fn resolve_to_descriptor<T: BindingTrace>(&self, trace: &T, declaration: &Declaration);
}

/// Session for batch modes where everything is resolved eagerly.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoResolutionSession;

impl ResolutionSession for NoResolutionSession {
    fn resolve_to_descriptor<T: BindingTrace>(&self, _trace: &T, _declaration: &Declaration) {}
}

pub struct LazyForcingTrace<S = NoResolutionSession> {
    base: BindingTraceContext,
    session: Option<S>,
    forcing: ForcingStack,
    forced: Cell<u32>,
}

impl LazyForcingTrace<NoResolutionSession> {
    /// Trace that drops scope caches but never forces.
    pub fn without_session(base: BindingTraceContext, options: &TraceOptions) -> Self {
        Self::new(base, None, options)
    }
}

impl<S: ResolutionSession> LazyForcingTrace<S> {
    pub fn new(base: BindingTraceContext, session: Option<S>, options: &TraceOptions) -> Self {
        Self {
            base,
            session,
            forcing: ForcingStack::new(options.max_forcing_depth),
            forced: Cell::new(0),
        }
    }

    pub fn with_session(base: BindingTraceContext, session: S, options: &TraceOptions) -> Self {
        Self::new(base, Some(session), options)
    }

    pub fn session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    pub fn base(&self) -> &BindingTraceContext {
        &self.base
    }

    /// Release the base store, e.g. to hand recorded results to a later phase.
    pub fn into_inner(self) -> BindingTraceContext {
        self.base
    }

    /// Number of times the session was asked to resolve a declaration.
    pub fn forced_count(&self) -> u32 {
        self.forced.get()
    }

    /// Resolve-or-fetch.
    ///
    /// Same as [`BindingTrace::get`], but reports forcing cycles and runaway
    /// forcing depth as errors instead of panicking.
    pub fn try_get<K: SliceKey, V: SliceValue>(
        &self,
        slice: Slice<K, V>,
        key: &K,
    ) -> Result<Option<V>, TraceError> {
        if let Some(session) = &self.session
            && slice.is_derivable()
            && !self.base.contains(slice, key)
            && let Some(declaration) = key.as_declaration()
            && !declaration.is_local()
        {
            self.force(session, slice.name(), declaration)?;
        }
        Ok(self.base.get(slice, key))
    }

    fn force(
        &self,
        session: &S,
        slice: &'static str,
        declaration: &Declaration,
    ) -> Result<(), TraceError> {
        let _guard = self.forcing.enter(declaration)?;
        debug!(
            slice,
            declaration = ?declaration,
            depth = self.forcing.depth(),
            "forcing resolution"
        );
        self.forced.set(self.forced.get().saturating_add(1));
        session.resolve_to_descriptor(self, declaration);
        Ok(())
    }
}

impl<S: ResolutionSession> BindingTrace for LazyForcingTrace<S> {
    fn record<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>, key: K, value: V) {
        if SCOPE_CACHE_SLICES.contains(&slice.id()) {
            trace!(slice = slice.name(), "scope cache write dropped");
            return;
        }
        self.base.record(slice, key, value);
    }

    /// # Panics
    ///
    /// Panics when forcing detects a resolution cycle or exceeds the forcing
    /// depth limit; both are resolver bugs. Use
    /// [`try_get`](LazyForcingTrace::try_get) to handle them.
    fn get<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>, key: &K) -> Option<V> {
        match self.try_get(slice, key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    fn require<K: SliceKey, V: SliceValue>(
        &self,
        slice: Slice<K, V>,
        key: &K,
    ) -> Result<V, TraceError> {
        self.try_get(slice, key)?
            .ok_or_else(|| TraceError::UnresolvedDescriptor {
                slice: slice.name(),
                key: format!("{key:?}"),
            })
    }
}
