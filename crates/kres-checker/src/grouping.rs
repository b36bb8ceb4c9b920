//! Declaration grouping.
//!
//! Overload conflicts can only occur between callables that share a name
//! within one container. This module builds those groups:
//!
//! - for each class, its declared functions and properties plus the
//!   constructors of classes nested directly inside it (a nested class `B`
//!   is invoked as `B(...)`, exactly like a function named `B`);
//! - for each package, its top-level functions and properties plus the
//!   constructors of its top-level classes.
//!
//! Singleton classes (`object`, class objects) have no callable
//! constructors and never contribute one.

use indexmap::IndexMap;
use kres_common::limits::INITIAL_NAME_GROUP_CAPACITY;
use kres_common::{FqName, Name};
use kres_descriptors::{
    CallableMember, ClassDescriptor, ConstructorDescriptor, ContainingDeclaration, DescriptorId,
    FunctionDescriptor, PropertyDescriptor,
};
use rustc_hash::FxBuildHasher;
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

/// Callables grouped by a key, in first-seen order.
pub type MemberGroups<K> = IndexMap<K, Vec<CallableMember>, FxBuildHasher>;

pub type ConstructorGroups<K> = IndexMap<K, Vec<Arc<ConstructorDescriptor>>, FxBuildHasher>;

/// Constructors of non-singleton classes, split by where they are visible.
#[derive(Clone, Debug, Default)]
pub struct GroupedConstructors {
    /// Constructors of nested classes, keyed by the enclosing class.
    pub in_classes: ConstructorGroups<DescriptorId>,
    /// Constructors of top-level classes, keyed by the class's qualified name.
    pub in_packages: ConstructorGroups<FqName>,
}

impl GroupedConstructors {
    /// Nested-class constructors visible inside `class`.
    pub fn nested_in(&self, class: &ClassDescriptor) -> &[Arc<ConstructorDescriptor>] {
        self.in_classes
            .get(&class.id)
            .map_or(&[][..], Vec::as_slice)
    }
}

/// Split the constructors of `classes` into class-level and package-level sets.
///
/// Classes declared inside a function body are local and never grouped.
/// Classes declared at the top level of a script are skipped as well: they
/// are not checked against script-level functions.
pub fn group_constructors(classes: &[Arc<ClassDescriptor>]) -> GroupedConstructors {
    let mut grouped = GroupedConstructors::default();
    for class in classes {
        if class.kind.is_singleton() {
            trace!(class = %class.fq_name, "singleton has no callable constructors");
            continue;
        }
        match &class.container {
            ContainingDeclaration::Class(outer) => grouped
                .in_classes
                .entry(outer.id)
                .or_default()
                .extend(class.constructors.iter().cloned()),
            ContainingDeclaration::Package(_) => grouped
                .in_packages
                .entry(class.fq_name.clone())
                .or_default()
                .extend(class.constructors.iter().cloned()),
            ContainingDeclaration::Script(_) | ContainingDeclaration::Function(_) => {
                trace!(class = %class.fq_name, "constructors not grouped");
            }
        }
    }
    grouped
}

/// Name groups of one class: declared members and nested-class constructors.
pub fn class_member_groups(
    class: &ClassDescriptor,
    nested_constructors: &[Arc<ConstructorDescriptor>],
) -> MemberGroups<Name> {
    let mut groups = new_groups();
    for member in &class.declared_members {
        push(&mut groups, member.name().clone(), member.clone());
    }
    for constructor in nested_constructors {
        push(
            &mut groups,
            constructor.name().clone(),
            CallableMember::Constructor(Arc::clone(constructor)),
        );
    }
    groups
}

/// Name groups of all packages, keyed by fully qualified name.
///
/// Only functions and properties whose container is a package take part;
/// class members and locals are ignored here.
pub fn package_member_groups(
    functions: &[Arc<FunctionDescriptor>],
    properties: &[Arc<PropertyDescriptor>],
    in_packages: &ConstructorGroups<FqName>,
) -> MemberGroups<FqName> {
    let mut groups = new_groups();
    for function in functions {
        if let Some(package) = function.container.package_fq_name() {
            push(
                &mut groups,
                package.child(&function.name),
                CallableMember::Function(Arc::clone(function)),
            );
        }
    }
    for property in properties {
        if let Some(package) = property.container.package_fq_name() {
            push(
                &mut groups,
                package.child(&property.name),
                CallableMember::Property(Arc::clone(property)),
            );
        }
    }
    for (fq_name, constructors) in in_packages {
        for constructor in constructors {
            push(
                &mut groups,
                fq_name.clone(),
                CallableMember::Constructor(Arc::clone(constructor)),
            );
        }
    }
    groups
}

fn new_groups<K: Hash + Eq>() -> MemberGroups<K> {
    IndexMap::with_capacity_and_hasher(INITIAL_NAME_GROUP_CAPACITY, FxBuildHasher)
}

fn push<K: Hash + Eq>(groups: &mut MemberGroups<K>, key: K, member: CallableMember) {
    groups.entry(key).or_default().push(member);
}
