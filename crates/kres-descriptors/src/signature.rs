//! Resolved callable signatures.
//!
//! Signatures arrive here already inferred; this module only represents them
//! so that two members can be compared parameter by parameter.

use kres_common::{FqName, Name};
use smallvec::SmallVec;
use std::fmt;

/// A resolved type as it appears in a signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Class {
        fq_name: FqName,
        arguments: Vec<TypeRef>,
        nullable: bool,
    },
    /// Reference to the owning callable's type parameter, by position.
    ///
    /// Positional so that `fun <T> f(t: T)` and `fun <R> f(r: R)` compare equal.
    TypeParameter { index: u32, nullable: bool },
}

impl TypeRef {
    pub fn class(fq_name: &str) -> Self {
        Self::Class {
            fq_name: FqName::parse(fq_name),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn generic(fq_name: &str, arguments: Vec<TypeRef>) -> Self {
        Self::Class {
            fq_name: FqName::parse(fq_name),
            arguments,
            nullable: false,
        }
    }

    pub fn type_parameter(index: u32) -> Self {
        Self::TypeParameter {
            index,
            nullable: false,
        }
    }

    pub fn nullable(self) -> Self {
        match self {
            Self::Class {
                fq_name, arguments, ..
            } => Self::Class {
                fq_name,
                arguments,
                nullable: true,
            },
            Self::TypeParameter { index, .. } => Self::TypeParameter {
                index,
                nullable: true,
            },
        }
    }

    /// `kotlin.Array<self>`, the type a vararg parameter has inside the body.
    pub fn array_of(&self) -> Self {
        Self::Class {
            fq_name: FqName::parse("kotlin.Array"),
            arguments: vec![self.clone()],
            nullable: false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nullable = match self {
            Self::Class {
                fq_name,
                arguments,
                nullable,
            } => {
                match fq_name.short_name() {
                    Some(name) => f.write_str(name.as_str())?,
                    None => f.write_str("<root>")?,
                }
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                *nullable
            }
            Self::TypeParameter { index, nullable } => {
                write!(f, "T{index}")?;
                *nullable
            }
        };
        if nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueParameter {
    pub name: Name,
    /// Declared type. For a vararg parameter this is the element type.
    pub ty: TypeRef,
    pub is_vararg: bool,
}

impl ValueParameter {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: Name::new(name),
            ty,
            is_vararg: false,
        }
    }

    pub fn vararg(name: &str, element: TypeRef) -> Self {
        Self {
            name: Name::new(name),
            ty: element,
            is_vararg: true,
        }
    }

    /// Type of the parameter as seen by overload comparison.
    pub fn effective_type(&self) -> TypeRef {
        if self.is_vararg {
            self.ty.array_of()
        } else {
            self.ty.clone()
        }
    }
}

/// Shape of a callable: receiver, value parameters and type-parameter arity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    pub receiver: Option<TypeRef>,
    pub value_parameters: SmallVec<[ValueParameter; 4]>,
    pub type_parameter_count: u32,
}

impl Signature {
    pub fn new(value_parameters: impl IntoIterator<Item = ValueParameter>) -> Self {
        Self {
            receiver: None,
            value_parameters: value_parameters.into_iter().collect(),
            type_parameter_count: 0,
        }
    }

    /// Signature of a property: no value parameters.
    pub fn property() -> Self {
        Self::default()
    }

    pub fn with_receiver(mut self, receiver: TypeRef) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_type_parameters(mut self, count: u32) -> Self {
        self.type_parameter_count = count;
        self
    }

    pub fn has_vararg(&self) -> bool {
        self.value_parameters
            .last()
            .is_some_and(|parameter| parameter.is_vararg)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, parameter) in self.value_parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if parameter.is_vararg {
                f.write_str("vararg ")?;
            }
            write!(f, "{}", parameter.ty)?;
        }
        f.write_str(")")
    }
}
