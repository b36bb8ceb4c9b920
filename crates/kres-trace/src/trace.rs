//! The binding trace contract and its base in-memory implementation.

use crate::error::TraceError;
use crate::slice::{Slice, SliceId, SliceKey, SliceValue};
use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::any::Any;
use std::cell::RefCell;
use tracing::{trace, warn};

/// Store of resolution results, keyed by `(slice, key)`.
///
/// Both operations take `&self`: resolving one declaration routinely looks up
/// (and records) others while an outer lookup is still on the stack, so
/// implementations use interior mutability and must never hold a borrow
/// across a call that may re-enter the trace.
pub trait BindingTrace {
    /// Store `value` under `(slice, key)`.
    ///
    /// Recording an identical value twice has no further effect.
    /// Implementations may drop writes to designated slices without telling
    /// the caller.
    fn record<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>, key: K, value: V);

    /// Value recorded under `(slice, key)`, or `None`.
    ///
    /// Absence is a normal outcome, not an error.
    fn get<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>, key: &K) -> Option<V>;

    /// Like [`get`](Self::get), for callers that cannot proceed without the value.
    fn require<K: SliceKey, V: SliceValue>(
        &self,
        slice: Slice<K, V>,
        key: &K,
    ) -> Result<V, TraceError> {
        self.get(slice, key)
            .ok_or_else(|| TraceError::UnresolvedDescriptor {
                slice: slice.name(),
                key: format!("{key:?}"),
            })
    }
}

type SliceMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Type-erased per-slice map.
trait ErasedSliceMap {
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<K: SliceKey, V: SliceValue> ErasedSliceMap for SliceMap<K, V> {
    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Base trace: records everything, forces nothing.
///
/// Each slice gets its own insertion-ordered map. Within a pass the store only
/// grows, and the first value recorded for a pair is kept: a later `record`
/// of the same pair is ignored.
#[derive(Default)]
pub struct BindingTraceContext {
    slices: RefCell<FxHashMap<SliceId, Box<dyn ErasedSliceMap>>>,
}

impl BindingTraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>, key: &K) -> bool {
        let slices = self.slices.borrow();
        slices
            .get(&slice.id())
            .and_then(|map| map.as_any().downcast_ref::<SliceMap<K, V>>())
            .is_some_and(|map| map.contains_key(key))
    }

    /// Keys recorded in `slice`, in recording order.
    pub fn keys<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>) -> Vec<K> {
        let slices = self.slices.borrow();
        slices
            .get(&slice.id())
            .and_then(|map| map.as_any().downcast_ref::<SliceMap<K, V>>())
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of recorded pairs across all slices.
    pub fn len(&self) -> usize {
        self.slices.borrow().values().map(|map| map.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BindingTrace for BindingTraceContext {
    fn record<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>, key: K, value: V) {
        let mut slices = self.slices.borrow_mut();
        let map = slices
            .entry(slice.id())
            .or_insert_with(|| Box::new(SliceMap::<K, V>::default()) as Box<dyn ErasedSliceMap>);
        let Some(map) = map.as_any_mut().downcast_mut::<SliceMap<K, V>>() else {
            warn!(
                slice = slice.name(),
                "slice id is shared by slices of different types; write dropped"
            );
            return;
        };
        match map.entry(key) {
            Entry::Occupied(entry) => {
                trace!(slice = slice.name(), key = ?entry.key(), "keeping first recorded value");
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    fn get<K: SliceKey, V: SliceValue>(&self, slice: Slice<K, V>, key: &K) -> Option<V> {
        let slices = self.slices.borrow();
        let map = slices.get(&slice.id())?;
        let Some(map) = map.as_any().downcast_ref::<SliceMap<K, V>>() else {
            warn!(
                slice = slice.name(),
                "slice id is shared by slices of different types; read ignored"
            );
            return None;
        };
        map.get(key).cloned()
    }
}

impl std::fmt::Debug for BindingTraceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingTraceContext")
            .field("slices", &self.slices.borrow().len())
            .field("entries", &self.len())
            .finish()
    }
}
