//! Identifier names and fully qualified names.
//!
//! `Name` is a cheap-to-clone identifier. `FqName` is a dotted path of names
//! (`a.b.C`); the empty path is the root package.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A simple (unqualified) identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", &self.0)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Fully qualified name: a sequence of simple names.
///
/// The root package has no segments. Unlike a checked qualified name, the
/// segments are not validated, so `FqName` can name packages, classes and
/// top-level callables alike.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FqName {
    segments: Vec<Name>,
}

impl FqName {
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a dotted path. The empty string is the root.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        Self {
            segments: text.split('.').map(Name::new).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// Last segment, or `None` for the root.
    pub fn short_name(&self) -> Option<&Name> {
        self.segments.last()
    }

    pub fn child(&self, name: &Name) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.clone());
        Self { segments }
    }

    /// Enclosing path. The parent of the root is the root.
    pub fn parent(&self) -> Self {
        match self.segments.split_last() {
            Some((_, rest)) => Self {
                segments: rest.to_vec(),
            },
            None => Self::root(),
        }
    }

    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Debug for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("FqName(<root>)")
        } else {
            write!(f, "FqName({self})")
        }
    }
}

impl Serialize for FqName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
