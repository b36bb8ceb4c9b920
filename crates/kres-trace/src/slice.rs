//! Typed channels of the binding trace.

use kres_descriptors::{Declaration, ElementId};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Stable identifier of a slice. Two slices with the same id are the same
/// channel and must agree on key and value types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SliceId(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SliceKind {
    /// Plain recorded channel: absence means "not set".
    Recorded,
    /// Absence means "not computed yet": a lazy trace may compute the value
    /// on read.
    Derivable,
}

/// Key type of a slice.
///
/// Keys that are declaration handles expose themselves through
/// [`as_declaration`](SliceKey::as_declaration) so that a forcing trace can
/// ask the resolver for them.
pub trait SliceKey: Hash + Eq + Clone + fmt::Debug + 'static {
    fn as_declaration(&self) -> Option<&Declaration> {
        None
    }
}

impl SliceKey for Declaration {
    fn as_declaration(&self) -> Option<&Declaration> {
        Some(self)
    }
}

impl SliceKey for ElementId {}

/// Value type of a slice. Values are cloned out on read, so they should be
/// cheap to clone (`Arc`, ids, small `Copy` data).
pub trait SliceValue: Clone + 'static {}

impl<T: Clone + 'static> SliceValue for T {}

/// A named, typed channel from `K` to `V`.
pub struct Slice<K, V> {
    id: SliceId,
    name: &'static str,
    kind: SliceKind,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> Slice<K, V> {
    pub const fn new(id: u16, name: &'static str, kind: SliceKind) -> Self {
        Self {
            id: SliceId(id),
            name,
            kind,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn id(&self) -> SliceId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> SliceKind {
        self.kind
    }

    #[inline]
    pub const fn is_derivable(&self) -> bool {
        matches!(self.kind, SliceKind::Derivable)
    }
}

impl<K, V> Clone for Slice<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Slice<K, V> {}

impl<K, V> fmt::Debug for Slice<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slice({} #{})", self.name, self.id.0)
    }
}

impl<K, V> PartialEq for Slice<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K, V> Eq for Slice<K, V> {}
