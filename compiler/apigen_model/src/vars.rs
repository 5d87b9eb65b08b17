//! Flattened template view of a model.
//!
//! Template-driven renderers look values up by name. The keys are stable;
//! renderers depend on their spelling.

use std::collections::BTreeMap;

use crate::{ClassRef, InterfaceModel, MethodModel, TypeKind, TypeParamModel};

/// One value in the template view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Var<'a> {
    Bool(bool),
    Str(&'a str),
    OptStr(Option<&'a str>),
    Type(&'a TypeKind),
    Types(&'a [TypeKind]),
    Classes(Vec<&'a ClassRef>),
    Methods(&'a [MethodModel]),
    MethodsByName(Vec<(&'a str, Vec<&'a MethodModel>)>),
    TypeParams(&'a [TypeParamModel]),
}

impl InterfaceModel {
    /// Every model field under its template key.
    pub fn vars(&self) -> BTreeMap<&'static str, Var<'_>> {
        BTreeMap::from([
            ("importedTypes", Var::Classes(self.imported_types.iter().collect())),
            ("concrete", Var::Bool(self.concrete)),
            ("type", Var::Type(&self.ty)),
            ("ifacePackageName", Var::Str(&self.package)),
            ("ifaceSimpleName", Var::Str(&self.simple_name)),
            ("ifaceFQCN", Var::Str(&self.qualified_name)),
            ("ifaceComment", Var::OptStr(self.doc.as_deref())),
            ("methods", Var::Methods(&self.methods)),
            (
                "referencedTypes",
                Var::Classes(self.referenced_types.iter().collect()),
            ),
            (
                "referencedDataObjectTypes",
                Var::Classes(self.referenced_data_object_types.iter().collect()),
            ),
            ("superTypes", Var::Types(&self.super_types)),
            ("concreteSuperTypes", Var::Types(&self.concrete_super_types)),
            ("abstractSuperTypes", Var::Types(&self.abstract_super_types)),
            ("methodsByName", Var::MethodsByName(self.methods_by_name())),
            ("typeParams", Var::TypeParams(&self.type_params)),
        ])
    }
}
