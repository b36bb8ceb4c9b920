//! Shared test fixtures: programs built without a parser.
//!
//! [`ProgramBuilder`] allocates declarations, builds their descriptors and
//! either records everything into a [`BindingTraceContext`] up front
//! ([`ProgramBuilder::finish`]) or leaves functions and properties to a
//! [`DescriptorTable`] session that a lazy trace forces on demand
//! ([`ProgramBuilder::finish_lazy`]).

use kres_checker::ResolvedDeclarations;
use kres_common::FqName;
use kres_descriptors::{
    CallableMember, ClassDescriptor, ClassKind, ConstructorDescriptor, ContainingDeclaration,
    DeclId, Declaration, DeclarationFactory, DeclarationKind, FunctionDescriptor,
    PropertyDescriptor, Signature, TypeRef, ValueParameter,
};
use kres_trace::{
    BindingTrace, BindingTraceContext, LazyForcingTrace, ResolutionSession, TraceOptions, slices,
};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::sync::Arc;

pub const TEST_FILE_NAME: &str = "test.kt";

pub fn int() -> TypeRef {
    TypeRef::class("kotlin.Int")
}

pub fn string() -> TypeRef {
    TypeRef::class("kotlin.String")
}

/// Signature with one value parameter per type, named `p0`, `p1`, ...
pub fn params(types: &[TypeRef]) -> Signature {
    Signature::new(
        types
            .iter()
            .enumerate()
            .map(|(i, ty)| ValueParameter::new(&format!("p{i}"), ty.clone())),
    )
}

#[derive(Default)]
pub struct ProgramBuilder {
    declarations: DeclarationFactory,
    classes: Vec<(Declaration, Arc<ClassDescriptor>)>,
    functions: Vec<(Declaration, Arc<FunctionDescriptor>)>,
    properties: Vec<(Declaration, Arc<PropertyDescriptor>)>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, kind: DeclarationKind, name: &str) -> Declaration {
        self.declarations.declare(kind, name)
    }

    /// Start a class at the top level of `package` ("" for the root package).
    pub fn class(&mut self, package: &str, name: &str, kind: ClassKind) -> ClassBuilder<'_> {
        let container = ContainingDeclaration::Package(FqName::parse(package));
        ClassBuilder::new(self, name, kind, container, &FqName::parse(package))
    }

    /// Start a class nested directly in `outer`.
    pub fn nested_class(
        &mut self,
        outer: &ClassDescriptor,
        name: &str,
        kind: ClassKind,
    ) -> ClassBuilder<'_> {
        ClassBuilder::new(self, name, kind, outer.as_container(), &outer.fq_name)
    }

    /// Start a class declared in the body of `function`.
    pub fn local_class(
        &mut self,
        function: &FunctionDescriptor,
        name: &str,
        kind: ClassKind,
    ) -> ClassBuilder<'_> {
        let container = ContainingDeclaration::Function(function.as_function_ref());
        let scope = FqName::root().child(&function.name);
        ClassBuilder::new(self, name, kind, container, &scope)
    }

    /// Start a class in a script file.
    pub fn script_class(&mut self, script: &str, name: &str, kind: ClassKind) -> ClassBuilder<'_> {
        let container = ContainingDeclaration::Script(FqName::parse(script));
        ClassBuilder::new(self, name, kind, container, &FqName::parse(script))
    }

    /// Top-level function in `package`.
    pub fn function(
        &mut self,
        package: &str,
        name: &str,
        signature: Signature,
    ) -> Arc<FunctionDescriptor> {
        self.function_in(ContainingDeclaration::package(package), name, signature)
    }

    /// Function in an arbitrary container; local when the container is a function.
    pub fn function_in(
        &mut self,
        container: ContainingDeclaration,
        name: &str,
        signature: Signature,
    ) -> Arc<FunctionDescriptor> {
        let mut declaration = self.declare(DeclarationKind::Function, name);
        if container.is_local() {
            declaration = declaration.local();
        }
        let descriptor = FunctionDescriptor::new(name, container, signature)
            .with_source(declaration.clone());
        self.add_function(declaration, descriptor)
    }

    /// Register a function descriptor for `declaration`.
    pub fn add_function(
        &mut self,
        declaration: Declaration,
        descriptor: FunctionDescriptor,
    ) -> Arc<FunctionDescriptor> {
        let descriptor = Arc::new(descriptor);
        self.functions.push((declaration, Arc::clone(&descriptor)));
        descriptor
    }

    /// Top-level property in `package`.
    pub fn property(&mut self, package: &str, name: &str, ty: TypeRef) -> Arc<PropertyDescriptor> {
        let declaration = self.declare(DeclarationKind::Property, name);
        let descriptor = PropertyDescriptor::new(name, ContainingDeclaration::package(package), ty)
            .with_source(declaration.clone());
        self.add_property(declaration, descriptor)
    }

    pub fn add_property(
        &mut self,
        declaration: Declaration,
        descriptor: PropertyDescriptor,
    ) -> Arc<PropertyDescriptor> {
        let descriptor = Arc::new(descriptor);
        self.properties.push((declaration, Arc::clone(&descriptor)));
        descriptor
    }

    fn resolved(&self) -> ResolvedDeclarations {
        ResolvedDeclarations {
            classes: self.classes.iter().map(|(d, _)| d.clone()).collect(),
            functions: self.functions.iter().map(|(d, _)| d.clone()).collect(),
            properties: self.properties.iter().map(|(d, _)| d.clone()).collect(),
        }
    }

    /// Record every descriptor eagerly.
    pub fn finish(self) -> (BindingTraceContext, ResolvedDeclarations) {
        let trace = BindingTraceContext::new();
        let resolved = self.resolved();
        for (declaration, class) in self.classes {
            record_constructors(&trace, &class);
            trace.record(slices::CLASS, declaration, class);
        }
        for (declaration, function) in self.functions {
            trace.record(slices::FUNCTION, declaration, function);
        }
        for (declaration, property) in self.properties {
            trace.record(slices::VARIABLE, declaration, property);
        }
        (trace, resolved)
    }

    /// Record classes only; functions and properties are forced on demand.
    pub fn finish_lazy(self) -> (LazyForcingTrace<DescriptorTable>, ResolvedDeclarations) {
        let resolved = self.resolved();
        let base = BindingTraceContext::new();
        for (declaration, class) in self.classes {
            record_constructors(&base, &class);
            base.record(slices::CLASS, declaration, class);
        }
        // Locals are resolved together with their enclosing body, never forced.
        let mut table = DescriptorTable::default();
        for (declaration, function) in self.functions {
            if declaration.is_local() {
                base.record(slices::FUNCTION, declaration, function);
            } else {
                table.functions.insert(declaration.id(), function);
            }
        }
        for (declaration, property) in self.properties {
            if declaration.is_local() {
                base.record(slices::VARIABLE, declaration, property);
            } else {
                table.properties.insert(declaration.id(), property);
            }
        }
        let trace = LazyForcingTrace::with_session(base, table, &TraceOptions::default());
        (trace, resolved)
    }
}

pub struct ClassBuilder<'p> {
    program: &'p mut ProgramBuilder,
    declaration: Declaration,
    class: ClassDescriptor,
}

impl<'p> ClassBuilder<'p> {
    fn new(
        program: &'p mut ProgramBuilder,
        name: &str,
        kind: ClassKind,
        container: ContainingDeclaration,
        outer_fq_name: &FqName,
    ) -> Self {
        let mut declaration = program.declare(DeclarationKind::Class, name);
        if container.is_local() {
            declaration = declaration.local();
        }
        let class = ClassDescriptor::new(name, kind, container, outer_fq_name)
            .with_source(declaration.clone());
        Self {
            program,
            declaration,
            class,
        }
    }

    pub fn container(&self) -> ContainingDeclaration {
        self.class.as_container()
    }

    pub fn constructor(mut self, signature: Signature) -> Self {
        let declaration = self
            .program
            .declare(DeclarationKind::Constructor, self.class.name.as_str());
        let constructor =
            ConstructorDescriptor::new(self.class.as_class_ref(), signature).with_source(declaration);
        self.class.add_constructor(constructor);
        self
    }

    pub fn function(self, name: &str, signature: Signature) -> Self {
        self.function_with(name, signature, |f| f)
    }

    /// Declared member function, customized by `configure` (kind, return type, ...).
    pub fn function_with(
        mut self,
        name: &str,
        signature: Signature,
        configure: impl FnOnce(FunctionDescriptor) -> FunctionDescriptor,
    ) -> Self {
        let declaration = self
            .program
            .declare(DeclarationKind::Function, name)
            .with_parent(self.declaration.id());
        let descriptor = configure(
            FunctionDescriptor::new(name, self.container(), signature)
                .with_source(declaration.clone()),
        );
        let descriptor = self.program.add_function(declaration, descriptor);
        self.class.add_member(CallableMember::Function(descriptor));
        self
    }

    pub fn property(mut self, name: &str, ty: TypeRef) -> Self {
        let declaration = self
            .program
            .declare(DeclarationKind::Property, name)
            .with_parent(self.declaration.id());
        let descriptor = PropertyDescriptor::new(name, self.container(), ty)
            .with_source(declaration.clone());
        let descriptor = self.program.add_property(declaration, descriptor);
        self.class.add_member(CallableMember::Property(descriptor));
        self
    }

    /// Add a member with no syntax of its own (e.g. a generated one).
    pub fn member(mut self, member: impl Into<CallableMember>) -> Self {
        self.class.add_member(member);
        self
    }

    pub fn build(self) -> Arc<ClassDescriptor> {
        let class = Arc::new(self.class);
        self.program
            .classes
            .push((self.declaration, Arc::clone(&class)));
        class
    }
}

fn record_constructors(trace: &BindingTraceContext, class: &ClassDescriptor) {
    for constructor in &class.constructors {
        if let Some(source) = &constructor.source {
            trace.record(slices::CONSTRUCTOR, source.clone(), Arc::clone(constructor));
        }
    }
}

/// Resolution session backed by prebuilt descriptors.
#[derive(Default)]
pub struct DescriptorTable {
    pub functions: FxHashMap<DeclId, Arc<FunctionDescriptor>>,
    pub properties: FxHashMap<DeclId, Arc<PropertyDescriptor>>,
    pub resolved: RefCell<Vec<DeclId>>,
}

impl ResolutionSession for DescriptorTable {
    fn resolve_to_descriptor<T: BindingTrace>(&self, trace: &T, declaration: &Declaration) {
        self.resolved.borrow_mut().push(declaration.id());
        if let Some(function) = self.functions.get(&declaration.id()) {
            trace.record(slices::FUNCTION, declaration.clone(), Arc::clone(function));
        }
        if let Some(property) = self.properties.get(&declaration.id()) {
            trace.record(slices::VARIABLE, declaration.clone(), Arc::clone(property));
        }
    }
}
