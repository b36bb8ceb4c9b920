//! In-progress markers for forced resolutions.
//!
//! Forcing is reentrant: resolving `a` may look up `b`, which forces `b`, and
//! so on. The stack records which declarations are currently being forced so
//! that a resolver which re-enters a declaration it is already resolving
//! fails with a `TraceError` instead of recursing until the stack overflows.

use crate::error::TraceError;
use kres_descriptors::{DeclId, Declaration};
use rustc_hash::FxHashSet;
use std::cell::RefCell;

pub(crate) struct ForcingStack {
    active: RefCell<FxHashSet<DeclId>>,
    max_depth: u32,
}

impl ForcingStack {
    pub(crate) fn new(max_depth: u32) -> Self {
        Self {
            active: RefCell::new(FxHashSet::default()),
            max_depth,
        }
    }

    /// Mark `declaration` as being forced until the returned guard drops.
    pub(crate) fn enter(&self, declaration: &Declaration) -> Result<ForcingGuard<'_>, TraceError> {
        let mut active = self.active.borrow_mut();
        if active.contains(&declaration.id()) {
            return Err(TraceError::ForcingCycle {
                declaration: format!("{declaration:?}"),
                id: declaration.id(),
            });
        }
        if active.len() as u32 >= self.max_depth {
            return Err(TraceError::ForcingTooDeep {
                declaration: format!("{declaration:?}"),
                depth: self.max_depth,
            });
        }
        active.insert(declaration.id());
        Ok(ForcingGuard {
            stack: self,
            id: declaration.id(),
        })
    }

    pub(crate) fn depth(&self) -> usize {
        self.active.borrow().len()
    }
}

#[must_use]
pub(crate) struct ForcingGuard<'a> {
    stack: &'a ForcingStack,
    id: DeclId,
}

impl Drop for ForcingGuard<'_> {
    fn drop(&mut self) {
        let was_active = self.stack.active.borrow_mut().remove(&self.id);
        debug_assert!(was_active, "forcing guard left a declaration it never entered");
    }
}
