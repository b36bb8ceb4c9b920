//! Pairwise overload compatibility.
//!
//! Two same-named callables may coexist when call sites can tell them
//! apart. The default rule compares, in order: kind (property vs. callable
//! with parentheses), receiver, type-parameter arity, value-parameter arity
//! and each value parameter's type. The first difference makes the pair
//! overloadable. Return types never distinguish overloads.

use indexmap::IndexSet;
use kres_descriptors::{CallableMember, Declaration};
use rustc_hash::FxBuildHasher;
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConflictReason {
    /// Two properties with the same receiver.
    SameProperty,
    /// Callables with identical receivers, arities and parameter types.
    SameParameters,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Overloadability {
    Compatible,
    Conflicting { reason: ConflictReason },
}

impl Overloadability {
    #[inline]
    pub fn is_compatible(self) -> bool {
        matches!(self, Self::Compatible)
    }
}

/// Decides whether two same-named callables may coexist.
///
/// Implementations must be symmetric: `check(a, b)` and `check(b, a)` agree
/// on compatibility.
pub trait OverloadabilityOracle {
    fn check(&self, a: &CallableMember, b: &CallableMember) -> Overloadability;
}

impl<O: OverloadabilityOracle + ?Sized> OverloadabilityOracle for &O {
    fn check(&self, a: &CallableMember, b: &CallableMember) -> Overloadability {
        (**self).check(a, b)
    }
}

/// Signature-based overload rule.
#[derive(Copy, Clone, Debug, Default)]
pub struct SignatureOverloadability;

impl OverloadabilityOracle for SignatureOverloadability {
    fn check(&self, a: &CallableMember, b: &CallableMember) -> Overloadability {
        if a.is_property() != b.is_property() {
            return Overloadability::Compatible;
        }

        let (left, right) = (a.signature(), b.signature());
        if left.receiver != right.receiver
            || left.type_parameter_count != right.type_parameter_count
            || left.value_parameters.len() != right.value_parameters.len()
        {
            return Overloadability::Compatible;
        }

        let distinguishable = left
            .value_parameters
            .iter()
            .zip(&right.value_parameters)
            .any(|(x, y)| x.effective_type() != y.effective_type());
        if distinguishable {
            return Overloadability::Compatible;
        }

        let reason = if a.is_property() {
            ConflictReason::SameProperty
        } else {
            ConflictReason::SameParameters
        };
        Overloadability::Conflicting { reason }
    }
}

/// A source declaration whose descriptor conflicts with another member of
/// its group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Redeclaration {
    pub declaration: Declaration,
    pub member: CallableMember,
}

pub type Redeclarations = IndexSet<Redeclaration, FxBuildHasher>;

/// Find every member of `members` that conflicts with some other member.
///
/// Only members written in source are reported: synthesized members and
/// members without a source declaration may still be the *other* side of a
/// conflict. The result has no duplicates; its order follows `members`.
pub fn find_redeclarations<O: OverloadabilityOracle + ?Sized>(
    members: &[CallableMember],
    oracle: &O,
) -> Redeclarations {
    let mut redeclarations = Redeclarations::default();
    if members.len() < 2 {
        return redeclarations;
    }

    for member in members {
        if member.is_synthesized() {
            continue;
        }
        let Some(declaration) = member.source() else {
            continue;
        };
        let conflict = members
            .iter()
            .filter(|other| *other != member)
            .find_map(|other| match oracle.check(member, other) {
                Overloadability::Conflicting { reason } => Some((other, reason)),
                Overloadability::Compatible => None,
            });
        if let Some((other, reason)) = conflict {
            trace!(%member, %other, ?reason, "conflicting declarations");
            redeclarations.insert(Redeclaration {
                declaration: declaration.clone(),
                member: member.clone(),
            });
        }
    }
    redeclarations
}
