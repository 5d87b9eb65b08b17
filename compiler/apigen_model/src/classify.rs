//! Type classification.
//!
//! Maps a [`DeclaredType`] to its [`TypeKind`]. Classification is pure and
//! total: every input yields exactly one kind, and types outside the
//! recognized categories land in `TypeKind::Other`. Rules apply in priority
//! order, so a boxed primitive is `Basic` even though it is also a class.

use apigen_ir::{DeclGraph, DeclId, DeclKind, DeclaredType};

use crate::{ClassRef, TypeKind, WellKnownTypes};

/// Classifies declared types against one declaration graph.
pub struct TypeClassifier<'a, G: ?Sized> {
    graph: &'a G,
    well_known: &'a WellKnownTypes,
}

impl<'a, G: DeclGraph + ?Sized> TypeClassifier<'a, G> {
    pub fn new(graph: &'a G, well_known: &'a WellKnownTypes) -> Self {
        TypeClassifier { graph, well_known }
    }

    pub fn classify(&self, ty: &DeclaredType) -> TypeKind {
        match ty {
            DeclaredType::Void => TypeKind::Void,
            DeclaredType::Primitive(primitive) => TypeKind::Basic {
                primitive: *primitive,
                boxed: false,
            },
            DeclaredType::Class { decl, args } => self.classify_class(*decl, args, ty),
            DeclaredType::TypeVar { name, bounds } => TypeKind::TypeVariable {
                name: name.clone(),
                bounds_ok: self.bounds_ok(bounds),
            },
            DeclaredType::Array(_) | DeclaredType::Wildcard => self.other(ty),
        }
    }

    /// Whether every bound is the universal top type.
    pub fn bounds_ok(&self, bounds: &[DeclaredType]) -> bool {
        bounds.iter().all(|bound| self.is_object(bound))
    }

    pub fn is_object(&self, ty: &DeclaredType) -> bool {
        ty.erased_decl()
            .is_some_and(|id| self.graph.type_decl(id).qualified_name == self.well_known.object)
    }

    fn classify_class(&self, id: DeclId, args: &[DeclaredType], ty: &DeclaredType) -> TypeKind {
        let wk = self.well_known;
        let decl = self.graph.type_decl(id);
        let name = decl.qualified_name.as_str();

        if name == wk.string {
            return TypeKind::String;
        }
        if let Some(primitive) = wk.unboxed(name) {
            return TypeKind::Basic {
                primitive,
                boxed: true,
            };
        }
        if name == wk.json_object {
            return TypeKind::JsonObject;
        }
        if name == wk.json_array {
            return TypeKind::JsonArray;
        }
        if decl.kind == DeclKind::Enum {
            return TypeKind::Enum(ClassRef::of(decl));
        }
        if decl.is_data_object() {
            return TypeKind::DataObject(ClassRef::of(decl));
        }
        if decl.is_gen() {
            return TypeKind::ApiInterface {
                class: ClassRef::of(decl),
                args: args.iter().map(|arg| self.classify(arg)).collect(),
                concrete: decl.is_concrete(),
            };
        }

        match args {
            [arg] if name == wk.callback => {
                return TypeKind::Callback(Box::new(self.classify(arg)));
            }
            [arg] if name == wk.async_result => {
                return TypeKind::AsyncResult(Box::new(self.classify(arg)));
            }
            [arg] if name == wk.list || name == wk.set => {
                let element = self.classify(arg);
                if element.is_container_element() {
                    return if name == wk.list {
                        TypeKind::List(Box::new(element))
                    } else {
                        TypeKind::Set(Box::new(element))
                    };
                }
            }
            [key, value] if name == wk.map => {
                let key = self.classify(key);
                let value = self.classify(value);
                if key == TypeKind::String && value.is_container_element() {
                    return TypeKind::Map(Box::new(key), Box::new(value));
                }
            }
            _ => {}
        }

        if name == wk.object {
            return TypeKind::Object;
        }
        if name == wk.throwable {
            return TypeKind::Throwable;
        }
        self.other(ty)
    }

    fn other(&self, ty: &DeclaredType) -> TypeKind {
        TypeKind::Other(ty.display(self.graph).to_string())
    }
}

#[cfg(test)]
mod tests;
