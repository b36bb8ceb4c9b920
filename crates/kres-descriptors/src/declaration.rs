//! Syntactic declaration handles.
//!
//! A `Declaration` stands in for a node of the external syntax tree. The
//! resolution core only reads its identity, kind, name, enclosing
//! declaration, locality and location; it never mutates one.

use kres_common::{Name, Span};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a declaration node in the syntax tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

/// Identity of an arbitrary syntax element (expressions, type references).
///
/// Used as the key of the scope-caching slices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `class`, `object`, `class object` and other classifier declarations.
    Class,
    Function,
    Property,
    /// Secondary constructor or primary constructor parameter list.
    Constructor,
}

/// Handle to a declaration in the syntax tree.
///
/// Equality and hashing use `id` only: two handles with the same id refer
/// to the same syntax node.
#[derive(Clone)]
pub struct Declaration {
    id: DeclId,
    kind: DeclarationKind,
    name: Name,
    parent: Option<DeclId>,
    is_local: bool,
    span: Span,
}

impl Declaration {
    pub fn new(id: DeclId, kind: DeclarationKind, name: Name, span: Span) -> Self {
        Self {
            id,
            kind,
            name,
            parent: None,
            is_local: false,
            span,
        }
    }

    /// Set the enclosing declaration.
    pub fn with_parent(mut self, parent: DeclId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Mark as declared inside a function body or other local scope.
    pub fn local(mut self) -> Self {
        self.is_local = true;
        self
    }

    #[inline]
    pub fn id(&self) -> DeclId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<DeclId> {
        self.parent
    }

    /// Local declarations are resolved together with their enclosing body
    /// and are never resolved on their own.
    #[inline]
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Declaration {}

impl Hash for Declaration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} #{}{}",
            self.kind,
            self.name,
            self.id.0,
            if self.is_local { " (local)" } else { "" }
        )
    }
}

/// Allocates declaration ids and non-overlapping spans.
///
/// Stands in for the parser when declarations are created programmatically.
#[derive(Debug, Default)]
pub struct DeclarationFactory {
    next_id: u32,
    next_offset: u32,
}

impl DeclarationFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, kind: DeclarationKind, name: &str) -> Declaration {
        let id = DeclId(self.next_id);
        self.next_id += 1;
        let length = u32::try_from(name.len()).unwrap_or(u32::MAX);
        let span = Span::at(self.next_offset, length);
        // One separator byte between declarations.
        self.next_offset = span.end.saturating_add(1);
        Declaration::new(id, kind, Name::new(name), span)
    }
}
