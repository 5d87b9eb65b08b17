//! Declared types of the host type system.
//!
//! `DeclaredType` is the type as written in a declaration, after the
//! front-end resolved every name to a `DeclId`. It knows nothing about
//! bindings or legality; the model builder classifies it.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{DeclGraph, DeclId};

/// Type-variable substitution: variable name -> actual type.
pub type Bindings = FxHashMap<String, DeclaredType>;

/// Host primitive types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Char,
    ];

    /// Keyword spelling of the primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type as written in a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Void,
    Primitive(Primitive),
    /// A class, interface or enum reference with its type arguments.
    Class {
        decl: DeclId,
        args: Vec<DeclaredType>,
    },
    /// A type variable together with its declared upper bounds.
    TypeVar {
        name: String,
        bounds: Vec<DeclaredType>,
    },
    Array(Box<DeclaredType>),
    /// Unbounded wildcard argument (`?`).
    Wildcard,
}

impl DeclaredType {
    /// Non-generic reference to `decl`.
    pub fn class(decl: DeclId) -> Self {
        DeclaredType::Class {
            decl,
            args: Vec::new(),
        }
    }

    /// Parameterized reference `decl<args...>`.
    pub fn generic(decl: DeclId, args: Vec<DeclaredType>) -> Self {
        DeclaredType::Class { decl, args }
    }

    /// Unbounded type variable.
    pub fn var(name: impl Into<String>) -> Self {
        DeclaredType::TypeVar {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Type variable with explicit upper bounds.
    pub fn bounded_var(name: impl Into<String>, bounds: Vec<DeclaredType>) -> Self {
        DeclaredType::TypeVar {
            name: name.into(),
            bounds,
        }
    }

    /// The declaration this type erases to, if it is a class reference.
    pub fn erased_decl(&self) -> Option<DeclId> {
        match self {
            DeclaredType::Class { decl, .. } => Some(*decl),
            _ => None,
        }
    }

    /// Type arguments of a class reference (empty for everything else).
    pub fn type_args(&self) -> &[DeclaredType] {
        match self {
            DeclaredType::Class { args, .. } => args,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, DeclaredType::Void)
    }

    /// Replace bound type variables, leaving unbound ones untouched.
    #[must_use]
    pub fn substitute(&self, bindings: &Bindings) -> DeclaredType {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            DeclaredType::TypeVar { name, .. } => match bindings.get(name) {
                Some(actual) => actual.clone(),
                None => self.clone(),
            },
            DeclaredType::Class { decl, args } => DeclaredType::Class {
                decl: *decl,
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            },
            DeclaredType::Array(elem) => DeclaredType::Array(Box::new(elem.substitute(bindings))),
            DeclaredType::Void | DeclaredType::Primitive(_) | DeclaredType::Wildcard => {
                self.clone()
            }
        }
    }

    /// Render this type with names resolved through `graph`.
    pub fn display<'a, G: DeclGraph + ?Sized>(&'a self, graph: &'a G) -> DisplayType<'a, G> {
        DisplayType { ty: self, graph }
    }
}

/// Display adapter returned by [`DeclaredType::display`].
pub struct DisplayType<'a, G: ?Sized> {
    ty: &'a DeclaredType,
    graph: &'a G,
}

impl<G: DeclGraph + ?Sized> fmt::Display for DisplayType<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            DeclaredType::Void => f.write_str("void"),
            DeclaredType::Primitive(p) => write!(f, "{p}"),
            DeclaredType::Class { decl, args } => {
                f.write_str(&self.graph.type_decl(*decl).qualified_name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{}", arg.display(self.graph))?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            DeclaredType::TypeVar { name, .. } => f.write_str(name),
            DeclaredType::Array(elem) => write!(f, "{}[]", elem.display(self.graph)),
            DeclaredType::Wildcard => f.write_str("?"),
        }
    }
}
