//! Host platform declarations.
//!
//! Front-ends that do not load the host library themselves (and tests)
//! register the well-known types into their arena through [`Platform`] and
//! use its constructors to spell declared types.

use apigen_ir::{DeclArena, DeclId, DeclaredType, Primitive, TypeDecl, TypeMarkers, TypeParam};

use crate::WellKnownTypes;

/// Ids of the well-known declarations inside one arena.
#[derive(Clone, Debug)]
pub struct Platform {
    pub object: DeclId,
    pub string: DeclId,
    pub throwable: DeclId,
    pub json_object: DeclId,
    pub json_array: DeclId,
    pub callback: DeclId,
    pub async_result: DeclId,
    pub list: DeclId,
    pub set: DeclId,
    pub map: DeclId,
    boxed: Vec<(Primitive, DeclId)>,
}

impl Platform {
    /// Register every well-known declaration named by `well_known`.
    ///
    /// The root platform interface is not registered; it carries members of
    /// its own, see [`Platform::register_root`].
    pub fn register(arena: &mut DeclArena, well_known: &WellKnownTypes) -> Self {
        let object = arena.add_type(TypeDecl::class(&well_known.object));
        let string = arena.add_type(TypeDecl::class(&well_known.string));
        let throwable = arena.add_type(TypeDecl::class(&well_known.throwable));
        let json_object = arena.add_type(TypeDecl::class(&well_known.json_object));
        let json_array = arena.add_type(TypeDecl::class(&well_known.json_array));
        let callback = arena.add_type(
            TypeDecl::interface(&well_known.callback).with_type_param(TypeParam::new("E")),
        );
        let async_result = arena.add_type(
            TypeDecl::interface(&well_known.async_result).with_type_param(TypeParam::new("T")),
        );
        let list = arena
            .add_type(TypeDecl::interface(&well_known.list).with_type_param(TypeParam::new("E")));
        let set = arena
            .add_type(TypeDecl::interface(&well_known.set).with_type_param(TypeParam::new("E")));
        let map = arena.add_type(
            TypeDecl::interface(&well_known.map)
                .with_type_param(TypeParam::new("K"))
                .with_type_param(TypeParam::new("V")),
        );
        let boxed = well_known
            .boxed
            .iter()
            .map(|(p, name)| (*p, arena.add_type(TypeDecl::class(name))))
            .collect();

        Platform {
            object,
            string,
            throwable,
            json_object,
            json_array,
            callback,
            async_result,
            list,
            set,
            map,
            boxed,
        }
    }

    /// Register the root platform interface as a concrete generation target.
    pub fn register_root(arena: &mut DeclArena, well_known: &WellKnownTypes) -> DeclId {
        arena.add_type(
            TypeDecl::interface(&well_known.root_platform)
                .with_markers(TypeMarkers::GEN | TypeMarkers::CONCRETE),
        )
    }

    pub fn object(&self) -> DeclaredType {
        DeclaredType::class(self.object)
    }

    pub fn string(&self) -> DeclaredType {
        DeclaredType::class(self.string)
    }

    pub fn throwable(&self) -> DeclaredType {
        DeclaredType::class(self.throwable)
    }

    pub fn json_object(&self) -> DeclaredType {
        DeclaredType::class(self.json_object)
    }

    pub fn json_array(&self) -> DeclaredType {
        DeclaredType::class(self.json_array)
    }

    /// Boxed form of `primitive`, falling back to the primitive itself when
    /// the host names no wrapper for it.
    pub fn boxed(&self, primitive: Primitive) -> DeclaredType {
        self.boxed
            .iter()
            .find(|(p, _)| *p == primitive)
            .map_or(DeclaredType::Primitive(primitive), |(_, id)| {
                DeclaredType::class(*id)
            })
    }

    /// `Handler<element>`.
    pub fn callback(&self, element: DeclaredType) -> DeclaredType {
        DeclaredType::generic(self.callback, vec![element])
    }

    /// `AsyncResult<value>`.
    pub fn async_result(&self, value: DeclaredType) -> DeclaredType {
        DeclaredType::generic(self.async_result, vec![value])
    }

    /// `Handler<AsyncResult<value>>`, the shape of a completion callback.
    pub fn completion(&self, value: DeclaredType) -> DeclaredType {
        self.callback(self.async_result(value))
    }

    pub fn list(&self, element: DeclaredType) -> DeclaredType {
        DeclaredType::generic(self.list, vec![element])
    }

    pub fn set(&self, element: DeclaredType) -> DeclaredType {
        DeclaredType::generic(self.set, vec![element])
    }

    pub fn map(&self, key: DeclaredType, value: DeclaredType) -> DeclaredType {
        DeclaredType::generic(self.map, vec![key, value])
    }
}
