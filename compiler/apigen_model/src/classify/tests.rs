use apigen_ir::{DeclArena, Primitive, TypeDecl, TypeMarkers, TypeParam};
use pretty_assertions::assert_eq;

use super::*;
use crate::Platform;

struct Fixture {
    arena: DeclArena,
    platform: Platform,
    well_known: WellKnownTypes,
    api: DeclId,
    options: DeclId,
    color: DeclId,
    locale: DeclId,
}

fn fixture() -> Fixture {
    let well_known = WellKnownTypes::default();
    let mut arena = DeclArena::new();
    let platform = Platform::register(&mut arena, &well_known);
    let api = arena.add_type(
        TypeDecl::interface("com.acme.Buffer")
            .with_markers(TypeMarkers::GEN)
            .with_type_param(TypeParam::new("T")),
    );
    let options = arena.add_type(
        TypeDecl::class("com.acme.Options").with_markers(TypeMarkers::DATA_OBJECT),
    );
    let color = arena.add_type(TypeDecl::enumeration("com.acme.Color"));
    let locale = arena.add_type(TypeDecl::class("java.util.Locale"));
    Fixture {
        arena,
        platform,
        well_known,
        api,
        options,
        color,
        locale,
    }
}

impl Fixture {
    fn classify(&self, ty: &DeclaredType) -> TypeKind {
        TypeClassifier::new(&self.arena, &self.well_known).classify(ty)
    }
}

#[test]
fn primitives_and_boxed_are_basic() {
    let f = fixture();
    assert_eq!(
        f.classify(&DeclaredType::Primitive(Primitive::Long)),
        TypeKind::Basic {
            primitive: Primitive::Long,
            boxed: false
        }
    );
    assert_eq!(
        f.classify(&f.platform.boxed(Primitive::Double)),
        TypeKind::Basic {
            primitive: Primitive::Double,
            boxed: true
        }
    );
    assert_eq!(f.classify(&f.platform.string()), TypeKind::String);
}

#[test]
fn json_enum_and_data_object() {
    let f = fixture();
    assert_eq!(f.classify(&f.platform.json_object()), TypeKind::JsonObject);
    assert_eq!(f.classify(&f.platform.json_array()), TypeKind::JsonArray);
    assert!(matches!(
        f.classify(&DeclaredType::class(f.color)),
        TypeKind::Enum(ref c) if c.simple_name == "Color"
    ));
    assert!(matches!(
        f.classify(&DeclaredType::class(f.options)),
        TypeKind::DataObject(ref c) if c.qualified_name == "com.acme.Options"
    ));
}

#[test]
fn api_interface_carries_classified_args() {
    let f = fixture();
    let ty = DeclaredType::generic(f.api, vec![f.platform.string()]);
    match f.classify(&ty) {
        TypeKind::ApiInterface {
            class,
            args,
            concrete,
        } => {
            assert_eq!(class.simple_name, "Buffer");
            assert_eq!(args, vec![TypeKind::String]);
            assert!(!concrete);
        }
        other => panic!("expected api interface, got {other:?}"),
    }
}

#[test]
fn completion_callback_nests_async_result() {
    let f = fixture();
    let ty = f.platform.completion(f.platform.string());
    assert_eq!(
        f.classify(&ty),
        TypeKind::Callback(Box::new(TypeKind::AsyncResult(Box::new(TypeKind::String))))
    );
}

#[test]
fn containers_require_recognized_elements() {
    let f = fixture();
    assert_eq!(
        f.classify(&f.platform.list(f.platform.json_object())),
        TypeKind::List(Box::new(TypeKind::JsonObject))
    );
    assert_eq!(
        f.classify(&f.platform.set(DeclaredType::class(f.locale))),
        TypeKind::Other("java.util.Set<java.util.Locale>".to_owned())
    );
    assert_eq!(
        f.classify(&f.platform.map(f.platform.string(), f.platform.boxed(Primitive::Int))),
        TypeKind::Map(
            Box::new(TypeKind::String),
            Box::new(TypeKind::Basic {
                primitive: Primitive::Int,
                boxed: true
            })
        )
    );
}

#[test]
fn map_with_non_string_key_is_other() {
    let f = fixture();
    let ty = f.platform.map(f.platform.object(), f.platform.string());
    assert_eq!(
        f.classify(&ty),
        TypeKind::Other("java.util.Map<java.lang.Object,java.lang.String>".to_owned())
    );
}

#[test]
fn raw_containers_are_other() {
    let f = fixture();
    assert_eq!(
        f.classify(&DeclaredType::class(f.platform.map)),
        TypeKind::Other("java.util.Map".to_owned())
    );
}

#[test]
fn type_variable_bounds() {
    let f = fixture();
    assert_eq!(
        f.classify(&DeclaredType::var("T")),
        TypeKind::TypeVariable {
            name: "T".to_owned(),
            bounds_ok: true
        }
    );
    assert_eq!(
        f.classify(&DeclaredType::bounded_var("T", vec![f.platform.object()])),
        TypeKind::TypeVariable {
            name: "T".to_owned(),
            bounds_ok: true
        }
    );
    assert_eq!(
        f.classify(&DeclaredType::bounded_var("T", vec![f.platform.string()])),
        TypeKind::TypeVariable {
            name: "T".to_owned(),
            bounds_ok: false
        }
    );
}

#[test]
fn object_throwable_and_leftovers() {
    let f = fixture();
    assert_eq!(f.classify(&f.platform.object()), TypeKind::Object);
    assert_eq!(f.classify(&f.platform.throwable()), TypeKind::Throwable);
    assert_eq!(
        f.classify(&DeclaredType::class(f.locale)),
        TypeKind::Other("java.util.Locale".to_owned())
    );
    assert_eq!(
        f.classify(&DeclaredType::Array(Box::new(DeclaredType::Primitive(
            Primitive::Byte
        )))),
        TypeKind::Other("byte[]".to_owned())
    );
    assert_eq!(
        f.classify(&DeclaredType::Wildcard),
        TypeKind::Other("?".to_owned())
    );
}
