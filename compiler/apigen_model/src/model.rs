//! The immutable interface model handed to renderers.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;

use crate::{ClassRef, MethodKind, TypeKind};

bitflags! {
    /// Variances a type parameter is compatible with.
    ///
    /// `INVARIANT` is always present.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Variance: u8 {
        const COVARIANT = 1 << 0;
        const CONTRAVARIANT = 1 << 1;
        const INVARIANT = 1 << 2;
    }
}

/// A type parameter of the interface with its site variance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamModel {
    pub name: String,
    pub variance: Variance,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamModel {
    pub name: String,
    pub ty: TypeKind,
}

/// One method as renderers see it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodModel {
    pub name: String,
    pub kind: MethodKind,
    pub return_type: TypeKind,
    pub params: Vec<ParamModel>,
    pub is_static: bool,
    pub is_fluent: bool,
    pub is_cacheable: bool,
    /// Every declaration this method is inherited from or grafted onto.
    pub owner_types: BTreeSet<ClassRef>,
    /// Method-level type parameters that remain after extension aliasing.
    pub type_params: Vec<String>,
    pub doc: Option<String>,
    /// Native override bodies keyed by language tag.
    pub native_bodies: BTreeMap<String, String>,
    /// Utility type that implements an extension method.
    pub invoker: Option<ClassRef>,
}

impl MethodModel {
    /// Same name and pairwise-equal parameter types. Parameter names and
    /// return types do not take part.
    pub fn same_signature(&self, other: &MethodModel) -> bool {
        self.name == other.name
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.ty == b.ty)
    }

    pub fn is_native(&self) -> bool {
        !self.native_bodies.is_empty()
    }

    /// Native body for `lang`, if any.
    pub fn native_body(&self, lang: &str) -> Option<&str> {
        self.native_bodies.get(lang).map(String::as_str)
    }
}

/// Methods sharing a name, ordered by ascending parameter count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodGroup {
    pub name: String,
    /// Indices into [`InterfaceModel::methods`].
    pub methods: Vec<usize>,
}

/// Everything a renderer needs to emit bindings for one interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceModel {
    /// Target-language tag the model was built for.
    pub lang: String,
    pub simple_name: String,
    pub qualified_name: String,
    pub package: String,
    pub doc: Option<String>,
    pub concrete: bool,
    /// The interface's own type, classified.
    pub ty: TypeKind,
    pub type_params: Vec<TypeParamModel>,
    /// Generation-target supertypes, in declaration order.
    pub super_types: Vec<TypeKind>,
    pub concrete_super_types: Vec<TypeKind>,
    pub abstract_super_types: Vec<TypeKind>,
    /// Methods in first-encounter order.
    pub methods: Vec<MethodModel>,
    /// Overload groups in first-encounter order of their name.
    pub method_groups: Vec<MethodGroup>,
    /// API interfaces the signatures mention, without the interface itself.
    pub referenced_types: BTreeSet<ClassRef>,
    pub referenced_data_object_types: BTreeSet<ClassRef>,
    /// Declarations a renderer must import: everything named outside the
    /// interface's own package.
    pub imported_types: BTreeSet<ClassRef>,
}

impl InterfaceModel {
    /// Methods named `name`, ordered by parameter count.
    pub fn methods_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MethodModel> + 'a {
        self.method_groups
            .iter()
            .find(|group| group.name == name)
            .into_iter()
            .flat_map(|group| group.methods.iter().map(|&i| &self.methods[i]))
    }

    /// Groups paired with their methods.
    pub fn methods_by_name(&self) -> Vec<(&str, Vec<&MethodModel>)> {
        self.method_groups
            .iter()
            .map(|group| {
                (
                    group.name.as_str(),
                    group.methods.iter().map(|&i| &self.methods[i]).collect(),
                )
            })
            .collect()
    }

    pub fn method(&self, name: &str) -> Option<&MethodModel> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn type_param(&self, name: &str) -> Option<&TypeParamModel> {
        self.type_params.iter().find(|tp| tp.name == name)
    }
}
