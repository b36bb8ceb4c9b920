//! Well-known slices recorded by the resolver.
//!
//! | Slice | Key | Value | Kind |
//! |-------|-----|-------|------|
//! | `CLASS` | class declaration | `ClassDescriptor` | recorded |
//! | `FUNCTION` | function declaration | `FunctionDescriptor` | derivable |
//! | `VARIABLE` | property declaration | `PropertyDescriptor` | derivable |
//! | `CONSTRUCTOR` | constructor declaration | `ConstructorDescriptor` | recorded |
//! | `RESOLUTION_SCOPE` | syntax element | scope | recorded (scope cache) |
//! | `TYPE_RESOLUTION_SCOPE` | type reference | scope | recorded (scope cache) |

use crate::slice::{Slice, SliceId, SliceKind};
use kres_descriptors::{
    ClassDescriptor, ConstructorDescriptor, Declaration, ElementId, FunctionDescriptor,
    PropertyDescriptor,
};
use std::sync::Arc;

/// Opaque handle to a name-resolution scope owned by the resolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeRef(pub u32);

pub const CLASS: Slice<Declaration, Arc<ClassDescriptor>> =
    Slice::new(1, "CLASS", SliceKind::Recorded);

pub const FUNCTION: Slice<Declaration, Arc<FunctionDescriptor>> =
    Slice::new(2, "FUNCTION", SliceKind::Derivable);

pub const VARIABLE: Slice<Declaration, Arc<PropertyDescriptor>> =
    Slice::new(3, "VARIABLE", SliceKind::Derivable);

pub const CONSTRUCTOR: Slice<Declaration, Arc<ConstructorDescriptor>> =
    Slice::new(4, "CONSTRUCTOR", SliceKind::Recorded);

/// Scope an expression was resolved in.
pub const RESOLUTION_SCOPE: Slice<ElementId, ScopeRef> =
    Slice::new(5, "RESOLUTION_SCOPE", SliceKind::Recorded);

/// Scope a type reference was resolved in.
pub const TYPE_RESOLUTION_SCOPE: Slice<ElementId, ScopeRef> =
    Slice::new(6, "TYPE_RESOLUTION_SCOPE", SliceKind::Recorded);

/// Scope caches: cheap to recompute, expensive to keep for a whole program.
pub const SCOPE_CACHE_SLICES: [SliceId; 2] = [RESOLUTION_SCOPE.id(), TYPE_RESOLUTION_SCOPE.id()];

/// First id free for slices defined outside this module.
pub const FIRST_CUSTOM_SLICE_ID: u16 = 64;
