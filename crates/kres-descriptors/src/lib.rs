//! Declaration handles and resolved descriptors.
//!
//! Declarations are the syntactic side (produced by the parser, read-only
//! here); descriptors are the semantic side produced by the resolver and
//! recorded in the binding trace.
//!
//! - `declaration` - `Declaration`, `DeclId`, `DeclarationKind`, `ElementId`
//! - `descriptors` - class/function/property/constructor descriptors and the
//!   `CallableMember` sum type
//! - `signature` - parameter lists, receivers and type references

pub mod declaration;
pub use declaration::{DeclId, Declaration, DeclarationFactory, DeclarationKind, ElementId};

pub mod signature;
pub use signature::{Signature, TypeRef, ValueParameter};

pub mod descriptors;
pub use descriptors::{
    CallableMember, ClassDescriptor, ClassKind, ClassRef, ConstructorDescriptor,
    ContainingDeclaration, DescriptorId, FunctionDescriptor, FunctionRef, MemberKind,
    PropertyDescriptor,
};

#[cfg(test)]
#[path = "../tests/descriptor_tests.rs"]
mod descriptor_tests;
