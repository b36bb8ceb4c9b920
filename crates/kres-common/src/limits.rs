//! Centralized limits and thresholds for the resolution core.
//!
//! Recursion limits live here rather than at each call site so that the
//! binding trace and its callers agree on the same values.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum number of nested on-demand resolutions.
///
/// Looking up the descriptor of a declaration that has not been resolved yet
/// asks the resolution session to resolve it, and resolving it usually looks
/// up further declarations. Each level adds frames to the call stack; past
/// this depth the lazy trace refuses to force and reports
/// `TraceError::ForcingTooDeep` instead of overflowing the stack.
///
/// # Example
///
/// ```text
/// fun a() = b()   // forcing `a` forces `b`
/// fun b() = c()   // ... which forces `c`
/// fun c() = d()   // ... and so on, 512 levels deep
/// ```
pub const MAX_FORCING_DEPTH: u32 = 512;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Initial capacity of the per-container name groups built by the overload
/// checker. Most classes and packages declare fewer callables than this.
pub const INITIAL_NAME_GROUP_CAPACITY: usize = 16;
