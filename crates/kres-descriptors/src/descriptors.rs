//! Resolved descriptors.
//!
//! Every descriptor carries a process-unique `DescriptorId`; identity
//! comparisons (is this the same member?) go through it rather than through
//! structural equality, since two distinct declarations may well produce
//! structurally identical descriptors.
//!
//! ## Kinds at a glance
//!
//! | Descriptor | Callable name | Container |
//! |------------|---------------|-----------|
//! | `ClassDescriptor` | - | class, package, function (local), script |
//! | `FunctionDescriptor` | own name | class, package, function (local) |
//! | `PropertyDescriptor` | own name | class, package, function (local) |
//! | `ConstructorDescriptor` | owning class name | owning class |

use crate::declaration::Declaration;
use crate::signature::{Signature, TypeRef};
use kres_common::{FqName, Name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DESCRIPTOR_ID: AtomicU32 = AtomicU32::new(1);

// =============================================================================
// DescriptorId
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(pub u32);

impl DescriptorId {
    /// Allocate an id no other descriptor in this process has.
    pub fn fresh() -> Self {
        Self(NEXT_DESCRIPTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// =============================================================================
// Containers
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    /// `object Foo`: a singleton with one implicit instance.
    Object,
    /// `class object` nested in (and associated with) its enclosing class.
    ClassObject,
}

impl ClassKind {
    /// Singletons have no caller-invocable constructor.
    #[inline]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::Object | Self::ClassObject)
    }
}

/// Lightweight reference to a class, used as a container.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassRef {
    pub id: DescriptorId,
    pub name: Name,
    pub kind: ClassKind,
}

/// Lightweight reference to a function, the container of local declarations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    pub id: DescriptorId,
    pub name: Name,
}

/// What a descriptor is declared directly inside of.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainingDeclaration {
    Class(ClassRef),
    Package(FqName),
    /// A function body or other local scope.
    Function(FunctionRef),
    Script(FqName),
}

impl ContainingDeclaration {
    pub fn package(fq_name: &str) -> Self {
        Self::Package(FqName::parse(fq_name))
    }

    /// Simple name of the container; `None` for the root package.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::Class(class) => Some(&class.name),
            Self::Function(function) => Some(&function.name),
            Self::Package(fq_name) | Self::Script(fq_name) => fq_name.short_name(),
        }
    }

    pub fn package_fq_name(&self) -> Option<&FqName> {
        match self {
            Self::Package(fq_name) => Some(fq_name),
            _ => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Function(_))
    }
}

// =============================================================================
// Callable descriptors
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Written by the user.
    Declaration,
    /// Generated by the compiler, e.g. data-class `componentN`/`copy`.
    Synthesized,
}

impl MemberKind {
    #[inline]
    pub const fn is_synthesized(self) -> bool {
        matches!(self, Self::Synthesized)
    }
}

#[derive(Clone, Debug)]
pub struct FunctionDescriptor {
    pub id: DescriptorId,
    pub name: Name,
    pub container: ContainingDeclaration,
    pub kind: MemberKind,
    pub signature: Signature,
    pub source: Option<Declaration>,
}

impl FunctionDescriptor {
    pub fn new(name: &str, container: ContainingDeclaration, signature: Signature) -> Self {
        Self {
            id: DescriptorId::fresh(),
            name: Name::new(name),
            container,
            kind: MemberKind::Declaration,
            signature,
            source: None,
        }
    }

    pub fn with_source(mut self, source: Declaration) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn as_function_ref(&self) -> FunctionRef {
        FunctionRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    pub id: DescriptorId,
    pub name: Name,
    pub container: ContainingDeclaration,
    pub kind: MemberKind,
    /// Receiver and type parameters; properties never have value parameters.
    pub signature: Signature,
    pub ty: TypeRef,
    pub is_var: bool,
    pub source: Option<Declaration>,
}

impl PropertyDescriptor {
    pub fn new(name: &str, container: ContainingDeclaration, ty: TypeRef) -> Self {
        Self {
            id: DescriptorId::fresh(),
            name: Name::new(name),
            container,
            kind: MemberKind::Declaration,
            signature: Signature::property(),
            ty,
            is_var: false,
            source: None,
        }
    }

    pub fn with_source(mut self, source: Declaration) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    /// Extension property: `val Int.p`.
    pub fn with_receiver(mut self, receiver: TypeRef) -> Self {
        self.signature.receiver = Some(receiver);
        self
    }

    pub fn mutable(mut self) -> Self {
        self.is_var = true;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ConstructorDescriptor {
    pub id: DescriptorId,
    /// Owning class. A constructor belongs to exactly one class.
    pub class: ClassRef,
    pub kind: MemberKind,
    pub signature: Signature,
    pub source: Option<Declaration>,
}

impl ConstructorDescriptor {
    pub fn new(class: ClassRef, signature: Signature) -> Self {
        Self {
            id: DescriptorId::fresh(),
            class,
            kind: MemberKind::Declaration,
            signature,
            source: None,
        }
    }

    pub fn with_source(mut self, source: Declaration) -> Self {
        self.source = Some(source);
        self
    }

    /// A constructor call reads like a call of the class name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.class.name
    }
}

/// Any member that can be called (or referenced) by name.
///
/// Equality and hashing use descriptor identity.
#[derive(Clone, Debug)]
pub enum CallableMember {
    Function(Arc<FunctionDescriptor>),
    Property(Arc<PropertyDescriptor>),
    Constructor(Arc<ConstructorDescriptor>),
}

impl CallableMember {
    pub fn id(&self) -> DescriptorId {
        match self {
            Self::Function(function) => function.id,
            Self::Property(property) => property.id,
            Self::Constructor(constructor) => constructor.id,
        }
    }

    pub fn name(&self) -> &Name {
        match self {
            Self::Function(function) => &function.name,
            Self::Property(property) => &property.name,
            Self::Constructor(constructor) => constructor.name(),
        }
    }

    pub fn container(&self) -> ContainingDeclaration {
        match self {
            Self::Function(function) => function.container.clone(),
            Self::Property(property) => property.container.clone(),
            Self::Constructor(constructor) => ContainingDeclaration::Class(constructor.class.clone()),
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Function(function) => function.kind,
            Self::Property(property) => property.kind,
            Self::Constructor(constructor) => constructor.kind,
        }
    }

    pub fn signature(&self) -> &Signature {
        match self {
            Self::Function(function) => &function.signature,
            Self::Property(property) => &property.signature,
            Self::Constructor(constructor) => &constructor.signature,
        }
    }

    /// Syntax this member was resolved from; `None` for purely generated members.
    pub fn source(&self) -> Option<&Declaration> {
        match self {
            Self::Function(function) => function.source.as_ref(),
            Self::Property(property) => property.source.as_ref(),
            Self::Constructor(constructor) => constructor.source.as_ref(),
        }
    }

    #[inline]
    pub fn is_property(&self) -> bool {
        matches!(self, Self::Property(_))
    }

    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.kind().is_synthesized()
    }
}

impl PartialEq for CallableMember {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for CallableMember {}

impl Hash for CallableMember {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<FunctionDescriptor> for CallableMember {
    fn from(function: FunctionDescriptor) -> Self {
        Self::Function(Arc::new(function))
    }
}

impl From<PropertyDescriptor> for CallableMember {
    fn from(property: PropertyDescriptor) -> Self {
        Self::Property(Arc::new(property))
    }
}

impl From<ConstructorDescriptor> for CallableMember {
    fn from(constructor: ConstructorDescriptor) -> Self {
        Self::Constructor(Arc::new(constructor))
    }
}

impl fmt::Display for CallableMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(function) => {
                f.write_str("fun ")?;
                if let Some(receiver) = &function.signature.receiver {
                    write!(f, "{receiver}.")?;
                }
                write!(f, "{}{}", function.name, function.signature)
            }
            Self::Property(property) => {
                f.write_str(if property.is_var { "var " } else { "val " })?;
                if let Some(receiver) = &property.signature.receiver {
                    write!(f, "{receiver}.")?;
                }
                write!(f, "{}: {}", property.name, property.ty)
            }
            Self::Constructor(constructor) => {
                write!(f, "constructor {}{}", constructor.name(), constructor.signature)
            }
        }
    }
}

// =============================================================================
// ClassDescriptor
// =============================================================================

#[derive(Clone, Debug)]
pub struct ClassDescriptor {
    pub id: DescriptorId,
    pub name: Name,
    pub fq_name: FqName,
    pub kind: ClassKind,
    pub container: ContainingDeclaration,
    pub constructors: Vec<Arc<ConstructorDescriptor>>,
    /// Functions and properties declared directly in the class body.
    pub declared_members: Vec<CallableMember>,
    pub source: Option<Declaration>,
}

impl ClassDescriptor {
    /// Create a class inside `container`. The fully qualified name is derived
    /// from the container: package path for top-level classes, the enclosing
    /// class path for nested ones (given as `outer_fq_name`).
    pub fn new(
        name: &str,
        kind: ClassKind,
        container: ContainingDeclaration,
        outer_fq_name: &FqName,
    ) -> Self {
        let name = Name::new(name);
        Self {
            id: DescriptorId::fresh(),
            fq_name: outer_fq_name.child(&name),
            name,
            kind,
            container,
            constructors: Vec::new(),
            declared_members: Vec::new(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: Declaration) -> Self {
        self.source = Some(source);
        self
    }

    pub fn as_class_ref(&self) -> ClassRef {
        ClassRef {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
        }
    }

    /// Container to use for members and nested classes of this class.
    pub fn as_container(&self) -> ContainingDeclaration {
        ContainingDeclaration::Class(self.as_class_ref())
    }

    pub fn add_constructor(&mut self, constructor: ConstructorDescriptor) -> Arc<ConstructorDescriptor> {
        debug_assert_eq!(constructor.class.id, self.id, "constructor of another class");
        let constructor = Arc::new(constructor);
        self.constructors.push(Arc::clone(&constructor));
        constructor
    }

    pub fn add_member(&mut self, member: impl Into<CallableMember>) -> CallableMember {
        let member = member.into();
        self.declared_members.push(member.clone());
        member
    }
}
