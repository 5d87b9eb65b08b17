//! Type and method declarations.
//!
//! Declarations are stored flat in a [`DeclArena`](crate::DeclArena) and
//! refer to one another through `DeclId` / `MethodId` indices.

use std::fmt;

use crate::{DeclaredType, MethodMarkers, Modifiers, Span, TypeMarkers};

/// Index of a type declaration in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    /// Create a new `DeclId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        DeclId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

/// Index of a method declaration in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct MethodId(u32);

impl MethodId {
    /// Create a new `MethodId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        MethodId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({})", self.0)
    }
}

/// What sort of type a declaration introduces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    Interface,
    Class,
    Enum,
}

/// A declared type parameter, e.g. `T` in `interface Foo<T>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParam {
    pub name: String,
    /// Explicit upper bounds. Empty means bounded by the universal top type.
    pub bounds: Vec<DeclaredType>,
}

impl TypeParam {
    /// Unbounded type parameter.
    pub fn new(name: impl Into<String>) -> Self {
        TypeParam {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Type parameter with explicit bounds.
    pub fn bounded(name: impl Into<String>, bounds: Vec<DeclaredType>) -> Self {
        TypeParam {
            name: name.into(),
            bounds,
        }
    }

    /// The type variable this parameter introduces.
    pub fn as_type(&self) -> DeclaredType {
        DeclaredType::bounded_var(self.name.clone(), self.bounds.clone())
    }
}

/// A class, interface or enum declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    /// Simple name, e.g. `Greeter`.
    pub name: String,
    /// Fully-qualified name, e.g. `com.acme.Greeter`.
    pub qualified_name: String,
    /// Enclosing package, e.g. `com.acme`.
    pub package: String,
    pub kind: DeclKind,
    pub markers: TypeMarkers,
    pub type_params: Vec<TypeParam>,
    /// Direct supertypes, in declaration order.
    pub supertypes: Vec<DeclaredType>,
    /// Enclosed member methods, filled in by the arena.
    pub members: Vec<MethodId>,
    /// Nested type declarations.
    pub nested: Vec<DeclId>,
    pub doc: Option<String>,
    pub span: Span,
}

impl TypeDecl {
    fn new(qualified_name: &str, kind: DeclKind) -> Self {
        let (package, name) = match qualified_name.rfind('.') {
            Some(dot) => (&qualified_name[..dot], &qualified_name[dot + 1..]),
            None => ("", qualified_name),
        };
        TypeDecl {
            name: name.to_owned(),
            qualified_name: qualified_name.to_owned(),
            package: package.to_owned(),
            kind,
            markers: TypeMarkers::empty(),
            type_params: Vec::new(),
            supertypes: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            doc: None,
            span: Span::DUMMY,
        }
    }

    /// Interface declaration named by its qualified name.
    pub fn interface(qualified_name: &str) -> Self {
        Self::new(qualified_name, DeclKind::Interface)
    }

    /// Class declaration named by its qualified name.
    pub fn class(qualified_name: &str) -> Self {
        Self::new(qualified_name, DeclKind::Class)
    }

    /// Enum declaration named by its qualified name.
    pub fn enumeration(qualified_name: &str) -> Self {
        Self::new(qualified_name, DeclKind::Enum)
    }

    #[must_use]
    pub fn with_markers(mut self, markers: TypeMarkers) -> Self {
        self.markers |= markers;
        self
    }

    #[must_use]
    pub fn with_type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: DeclaredType) -> Self {
        self.supertypes.push(supertype);
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Whether this declaration is a generation target.
    #[inline]
    pub fn is_gen(&self) -> bool {
        self.markers.contains(TypeMarkers::GEN)
    }

    /// Whether this generation target denotes a single implementation.
    #[inline]
    pub fn is_concrete(&self) -> bool {
        self.markers.contains(TypeMarkers::GEN | TypeMarkers::CONCRETE)
    }

    #[inline]
    pub fn is_data_object(&self) -> bool {
        self.markers.contains(TypeMarkers::DATA_OBJECT)
    }
}

/// A method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: DeclaredType,
    pub span: Span,
}

/// A method declaration (instance, static or extension).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    /// Declaring type. Set by the arena when the method is added.
    pub owner: DeclId,
    pub modifiers: Modifiers,
    pub markers: MethodMarkers,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<ParamDecl>,
    pub return_type: DeclaredType,
    pub doc: Option<String>,
    pub span: Span,
}

impl MethodDecl {
    /// Public method with no parameters.
    pub fn new(name: impl Into<String>, return_type: DeclaredType) -> Self {
        MethodDecl {
            name: name.into(),
            owner: DeclId::new(0),
            modifiers: Modifiers::PUBLIC,
            markers: MethodMarkers::empty(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_type,
            doc: None,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: DeclaredType) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            ty,
            span: Span::DUMMY,
        });
        self
    }

    #[must_use]
    pub fn with_type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: MethodMarkers) -> Self {
        self.markers |= markers;
        self
    }

    /// Replace the modifier set.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.modifiers.contains(Modifiers::PUBLIC)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    #[inline]
    pub fn has_marker(&self, marker: MethodMarkers) -> bool {
        self.markers.contains(marker)
    }
}
