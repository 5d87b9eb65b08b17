//! Language-neutral type categories.
//!
//! Every declared type the builder encounters is classified into exactly
//! one [`TypeKind`]. Renderers switch on the kind; they never see the host
//! type system.

use std::fmt;

use apigen_ir::{Primitive, TypeDecl};

use crate::well_known::boxed_simple_name;

/// A named declaration as the model exposes it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassRef {
    /// Fully-qualified name. Ordering and equality follow it.
    pub qualified_name: String,
    pub simple_name: String,
    pub package: String,
}

impl ClassRef {
    pub fn of(decl: &TypeDecl) -> Self {
        ClassRef {
            qualified_name: decl.qualified_name.clone(),
            simple_name: decl.name.clone(),
            package: decl.package.clone(),
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

/// Classification of a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Void,
    /// A primitive, or its boxed wrapper when `boxed` is set.
    Basic {
        primitive: Primitive,
        boxed: bool,
    },
    String,
    JsonObject,
    JsonArray,
    Enum(ClassRef),
    /// A generation-target interface with its (classified) type arguments.
    ApiInterface {
        class: ClassRef,
        args: Vec<TypeKind>,
        concrete: bool,
    },
    DataObject(ClassRef),
    /// Single-argument callback over the element kind.
    Callback(Box<TypeKind>),
    /// Success-or-failure wrapper over the value kind.
    AsyncResult(Box<TypeKind>),
    List(Box<TypeKind>),
    Set(Box<TypeKind>),
    /// Map with the given key and value kinds. The key is always `String`.
    Map(Box<TypeKind>, Box<TypeKind>),
    /// A type variable; `bounds_ok` is false when it carries a bound other
    /// than the universal top type.
    TypeVariable {
        name: String,
        bounds_ok: bool,
    },
    Throwable,
    /// The universal top type.
    Object,
    /// Anything else, described by its host spelling.
    Other(String),
}

impl TypeKind {
    /// Primitive, boxed primitive or string.
    pub fn is_basic(&self) -> bool {
        matches!(self, TypeKind::Basic { .. } | TypeKind::String)
    }

    pub fn is_json(&self) -> bool {
        matches!(self, TypeKind::JsonObject | TypeKind::JsonArray)
    }

    pub fn is_api(&self) -> bool {
        matches!(self, TypeKind::ApiInterface { .. })
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeKind::Void)
    }

    /// Whether this kind may sit inside a list, set or map value.
    pub fn is_container_element(&self) -> bool {
        self.is_basic() || self.is_json() || self.is_api()
    }

    /// The declaration named by this kind itself (not its arguments).
    pub fn class_ref(&self) -> Option<&ClassRef> {
        match self {
            TypeKind::Enum(class)
            | TypeKind::DataObject(class)
            | TypeKind::ApiInterface { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Visit this kind and every kind nested inside it, outermost first.
    pub fn walk(&self, f: &mut impl FnMut(&TypeKind)) {
        f(self);
        match self {
            TypeKind::ApiInterface { args, .. } => {
                for arg in args {
                    arg.walk(f);
                }
            }
            TypeKind::Callback(inner)
            | TypeKind::AsyncResult(inner)
            | TypeKind::List(inner)
            | TypeKind::Set(inner) => inner.walk(f),
            TypeKind::Map(key, value) => {
                key.walk(f);
                value.walk(f);
            }
            TypeKind::Void
            | TypeKind::Basic { .. }
            | TypeKind::String
            | TypeKind::JsonObject
            | TypeKind::JsonArray
            | TypeKind::Enum(_)
            | TypeKind::DataObject(_)
            | TypeKind::TypeVariable { .. }
            | TypeKind::Throwable
            | TypeKind::Object
            | TypeKind::Other(_) => {}
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Void => f.write_str("void"),
            TypeKind::Basic {
                primitive,
                boxed: false,
            } => write!(f, "{primitive}"),
            TypeKind::Basic {
                primitive,
                boxed: true,
            } => f.write_str(boxed_simple_name(*primitive)),
            TypeKind::String => f.write_str("String"),
            TypeKind::JsonObject => f.write_str("JsonObject"),
            TypeKind::JsonArray => f.write_str("JsonArray"),
            TypeKind::Enum(class) | TypeKind::DataObject(class) => write!(f, "{class}"),
            TypeKind::ApiInterface { class, args, .. } => {
                write!(f, "{class}")?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeKind::Callback(element) => write!(f, "Handler<{element}>"),
            TypeKind::AsyncResult(value) => write!(f, "AsyncResult<{value}>"),
            TypeKind::List(element) => write!(f, "List<{element}>"),
            TypeKind::Set(element) => write!(f, "Set<{element}>"),
            TypeKind::Map(key, value) => write!(f, "Map<{key},{value}>"),
            TypeKind::TypeVariable { name, .. } => f.write_str(name),
            TypeKind::Throwable => f.write_str("Throwable"),
            TypeKind::Object => f.write_str("Object"),
            TypeKind::Other(spelling) => f.write_str(spelling),
        }
    }
}
