use apigen_diagnostic::ErrorCode;
use apigen_ir::{
    DeclArena, DeclId, DeclaredType, MethodDecl, MethodMarkers, Modifiers, Primitive, TypeDecl,
    TypeMarkers, TypeParam,
};
use pretty_assertions::assert_eq;

use super::{build_interface, BuildOutput};
use crate::{
    BuildOptions, Extensions, MethodKind, ModelError, ModelErrorKind, Platform, TypeKind,
    WellKnownTypes,
};

struct Fixture {
    arena: DeclArena,
    platform: Platform,
}

impl Fixture {
    fn new() -> Self {
        let mut arena = DeclArena::new();
        let platform = Platform::register(&mut arena, &WellKnownTypes::default());
        Fixture { arena, platform }
    }

    fn api(&mut self, name: &str) -> DeclId {
        self.arena
            .add_type(TypeDecl::interface(name).with_markers(TypeMarkers::GEN))
    }

    fn concrete(&mut self, name: &str) -> DeclId {
        self.arena.add_type(
            TypeDecl::interface(name).with_markers(TypeMarkers::GEN | TypeMarkers::CONCRETE),
        )
    }

    fn add(&mut self, owner: DeclId, method: MethodDecl) {
        self.arena.add_method(owner, method);
    }

    fn extend(&mut self, sub: DeclId, sup: DeclId) {
        self.arena.add_supertype(sub, DeclaredType::class(sup));
    }

    fn build(&self, id: DeclId) -> Result<BuildOutput, ModelError> {
        self.build_for(id, "java")
    }

    fn build_for(&self, id: DeclId, lang: &str) -> Result<BuildOutput, ModelError> {
        build_interface(&self.arena, id, &Extensions::empty(), &BuildOptions::new(lang))
    }

    fn built(&self, id: DeclId) -> BuildOutput {
        match self.build(id) {
            Ok(output) => output,
            Err(err) => panic!("unexpected build failure: {err}"),
        }
    }

    fn error(&self, id: DeclId) -> ModelError {
        match self.build(id) {
            Ok(_) => panic!("expected a build failure"),
            Err(err) => err,
        }
    }
}

fn void(name: &str) -> MethodDecl {
    MethodDecl::new(name, DeclaredType::Void)
}

fn names(output: &BuildOutput) -> Vec<&str> {
    output.model.methods.iter().map(|m| m.name.as_str()).collect()
}

// Admissibility

#[test]
fn marker_on_a_class_is_rejected() {
    let mut f = Fixture::new();
    let id = f
        .arena
        .add_type(TypeDecl::class("com.acme.Impl").with_markers(TypeMarkers::GEN));
    let err = f.error(id);
    assert_eq!(err.code, ErrorCode::E0001);
    assert_eq!(err.kind, ModelErrorKind::Admissibility);
}

#[test]
fn nested_types_are_rejected() {
    let mut f = Fixture::new();
    let outer = f.api("com.acme.Outer");
    f.add(outer, void("run"));
    let inner = f.arena.add_type(TypeDecl::class("com.acme.Outer.Inner"));
    f.arena.add_nested(outer, inner);
    assert_eq!(f.error(outer).code, ErrorCode::E0002);
}

#[test]
fn bounded_interface_type_params_are_rejected() {
    let mut f = Fixture::new();
    let string = f.platform.string();
    let object = f.platform.object();
    let bad = f.arena.add_type(
        TypeDecl::interface("com.acme.Bad")
            .with_markers(TypeMarkers::GEN)
            .with_type_param(TypeParam::bounded("T", vec![string])),
    );
    f.add(bad, void("run"));
    assert_eq!(f.error(bad).code, ErrorCode::E0003);

    let ok = f.arena.add_type(
        TypeDecl::interface("com.acme.Ok")
            .with_markers(TypeMarkers::GEN)
            .with_type_param(TypeParam::bounded("T", vec![object])),
    );
    f.add(ok, void("run"));
    assert!(f.build(ok).is_ok());
}

// Supertypes

#[test]
fn concrete_interface_with_two_concrete_supers_is_rejected() {
    let mut f = Fixture::new();
    let a = f.concrete("com.acme.A");
    let b = f.concrete("com.acme.B");
    let c = f.concrete("com.acme.C");
    f.extend(c, a);
    f.extend(c, b);
    let err = f.error(c);
    assert_eq!(err.code, ErrorCode::E0101);
    assert_eq!(err.kind, ModelErrorKind::SupertypeShape);
}

#[test]
fn abstract_interface_with_concrete_super_is_rejected() {
    let mut f = Fixture::new();
    let a = f.concrete("com.acme.A");
    let b = f.api("com.acme.B");
    f.extend(b, a);
    assert_eq!(f.error(b).code, ErrorCode::E0102);
}

#[test]
fn supertypes_are_partitioned() {
    let mut f = Fixture::new();
    let base = f.concrete("com.acme.Base");
    let mixin = f.api("com.acme.Mixin");
    let plain = f.arena.add_type(TypeDecl::interface("java.io.Closeable"));
    let leaf = f.concrete("com.acme.Leaf");
    let object = f.platform.object();
    f.arena.add_supertype(leaf, object);
    f.extend(leaf, base);
    f.extend(leaf, mixin);
    f.extend(leaf, plain);

    let output = f.built(leaf);
    let model = &output.model;
    let simple = |kinds: &[TypeKind]| -> Vec<String> {
        kinds
            .iter()
            .filter_map(|k| k.class_ref().map(|c| c.simple_name.clone()))
            .collect()
    };
    assert_eq!(simple(&model.super_types), vec!["Base", "Mixin"]);
    assert_eq!(simple(&model.concrete_super_types), vec!["Base"]);
    assert_eq!(simple(&model.abstract_super_types), vec!["Mixin"]);
    assert!(model
        .imported_types
        .iter()
        .any(|c| c.qualified_name == "java.io.Closeable"));
    assert!(!model
        .imported_types
        .iter()
        .any(|c| c.qualified_name == "java.lang.Object"));
}

// Member enumeration

#[test]
fn member_filters() {
    let mut f = Fixture::new();
    let parent = f.api("com.acme.Parent");
    let frozen = f.concrete("com.acme.Frozen");
    let child = f.concrete("com.acme.Child");
    f.add(parent, void("inherited"));
    f.add(
        parent,
        void("factory").with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC),
    );
    f.add(frozen, void("fromConcrete"));
    f.add(child, void("own"));
    f.add(child, void("skipped").with_markers(MethodMarkers::IGNORE));
    f.add(child, void("hidden").with_modifiers(Modifiers::empty()));
    f.add(
        child,
        void("defaulted").with_modifiers(Modifiers::PUBLIC | Modifiers::DEFAULT),
    );
    f.add(
        child,
        void("create").with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC),
    );
    f.extend(child, parent);
    f.extend(child, frozen);

    let output = f.built(child);
    assert_eq!(names(&output), vec!["own", "create", "inherited"]);
    assert!(output.model.methods[1].is_static);
}

#[test]
fn inherited_members_see_bound_type_arguments() {
    let mut f = Fixture::new();
    let stream = f.arena.add_type(
        TypeDecl::interface("com.acme.ReadStream")
            .with_markers(TypeMarkers::GEN)
            .with_type_param(TypeParam::new("T")),
    );
    let handler = f.platform.callback(DeclaredType::var("T"));
    f.add(stream, void("handler").with_param("handler", handler));

    let lines = f.api("com.acme.Lines");
    let string = f.platform.string();
    f.arena
        .add_supertype(lines, DeclaredType::generic(stream, vec![string]));

    let output = f.built(lines);
    let method = &output.model.methods[0];
    assert_eq!(
        method.params[0].ty,
        TypeKind::Callback(Box::new(TypeKind::String))
    );
    assert_eq!(method.kind, MethodKind::Handler);
}

#[test]
fn diamond_of_abstract_ancestors_merges_owner_types() {
    let mut f = Fixture::new();
    let root = f.api("com.acme.Root");
    let left = f.api("com.acme.Left");
    let right = f.api("com.acme.Right");
    let leaf = f.api("com.acme.Leaf");
    f.add(root, void("ping"));
    f.add(left, void("close"));
    f.add(right, void("close"));
    f.extend(left, root);
    f.extend(right, root);
    f.extend(leaf, left);
    f.extend(leaf, right);

    let output = f.built(leaf);
    assert_eq!(names(&output), vec!["close", "ping"]);
    let owners: Vec<_> = output.model.methods[0]
        .owner_types
        .iter()
        .map(|c| c.simple_name.as_str())
        .collect();
    assert_eq!(owners, vec!["Left", "Right"]);
    assert_eq!(output.model.methods[1].owner_types.len(), 1);
}

// Per-method checks

#[test]
fn fluent_method_must_return_a_subtype() {
    let mut f = Fixture::new();
    let base = f.api("com.acme.Base");
    let builder = f.api("com.acme.Builder");
    f.extend(builder, base);
    let narrow = f.api("com.acme.SubBuilder");
    f.extend(narrow, builder);
    f.add(
        builder,
        MethodDecl::new("self_", DeclaredType::class(builder)).with_markers(MethodMarkers::FLUENT),
    );
    f.add(
        builder,
        MethodDecl::new("narrow", DeclaredType::class(narrow)).with_markers(MethodMarkers::FLUENT),
    );
    assert!(f.build(builder).is_ok());

    f.add(
        builder,
        MethodDecl::new("base", DeclaredType::class(base)).with_markers(MethodMarkers::FLUENT),
    );
    let err = f.error(builder);
    assert_eq!(err.code, ErrorCode::E0503);
    assert_eq!(err.subject, "com.acme.Builder#base");
}

#[test]
fn fluent_method_returning_a_non_interface_is_rejected() {
    let mut f = Fixture::new();
    let builder = f.api("com.acme.Builder");
    let string = f.platform.string();
    f.add(
        builder,
        MethodDecl::new("name", string).with_markers(MethodMarkers::FLUENT),
    );
    assert_eq!(f.error(builder).code, ErrorCode::E0503);
}

#[test]
fn inherited_fluent_without_redeclaration_warns() {
    let mut f = Fixture::new();
    let base = f.api("com.acme.Base");
    f.add(
        base,
        MethodDecl::new("pause", DeclaredType::class(base)).with_markers(MethodMarkers::FLUENT),
    );
    let quiet = f.api("com.acme.Quiet");
    f.extend(quiet, base);
    f.add(
        quiet,
        MethodDecl::new("pause", DeclaredType::class(quiet)).with_markers(MethodMarkers::FLUENT),
    );
    let loud = f.api("com.acme.Loud");
    f.extend(loud, base);

    assert!(f.built(quiet).warnings.is_empty());

    let output = f.built(loud);
    let codes: Vec<_> = output.warnings.iter().map(|w| w.code).collect();
    assert_eq!(codes, vec![ErrorCode::W0001]);
}

#[test]
fn cacheable_void_is_rejected() {
    let mut f = Fixture::new();
    let id = f.api("com.acme.Cached");
    f.add(id, void("reset").with_markers(MethodMarkers::CACHE_RETURN));
    let err = f.error(id);
    assert_eq!(err.code, ErrorCode::E0502);
    assert_eq!(err.kind, ModelErrorKind::MethodShape);
}

#[test]
fn index_getter_without_int_is_rejected() {
    let mut f = Fixture::new();
    let id = f.api("com.acme.Indexed");
    let string = f.platform.string();
    f.add(
        id,
        MethodDecl::new("at", string.clone())
            .with_param("key", string)
            .with_markers(MethodMarkers::INDEX_GETTER),
    );
    assert_eq!(f.error(id).code, ErrorCode::E0501);
}

#[test]
fn illegal_param_names_the_parameter() {
    let mut f = Fixture::new();
    let id = f.api("com.acme.Sink");
    let list = f.platform.list(f.platform.string());
    f.add(id, void("write").with_param("lines", list));
    let err = f.error(id);
    assert_eq!(err.code, ErrorCode::E0201);
    assert_eq!(err.subject, "com.acme.Sink#write(lines)");
    assert_eq!(
        err.message,
        "type List<String> is not legal for use for a parameter in code generation"
    );
}

#[test]
fn data_objects_cannot_flow_through_callbacks() {
    let mut f = Fixture::new();
    let options = f
        .arena
        .add_type(TypeDecl::class("com.acme.Options").with_markers(TypeMarkers::DATA_OBJECT));

    let plain = f.api("com.acme.Watcher");
    let handler = f.platform.callback(DeclaredType::class(options));
    f.add(plain, void("onOptions").with_param("handler", handler));
    let err = f.error(plain);
    assert_eq!(err.code, ErrorCode::E0201);
    assert_eq!(err.kind, ModelErrorKind::IllegalTypeShape);
    assert_eq!(err.subject, "com.acme.Watcher#onOptions(handler)");

    let future = f.api("com.acme.Loader");
    let completion = f.platform.completion(DeclaredType::class(options));
    f.add(future, void("load").with_param("done", completion));
    assert_eq!(f.error(future).code, ErrorCode::E0201);

    // Still fine as a plain parameter.
    let direct = f.api("com.acme.Config");
    f.add(direct, void("apply").with_param("options", DeclaredType::class(options)));
    assert!(f.build(direct).is_ok());
}

#[test]
fn bounded_method_type_params_are_rejected() {
    let mut f = Fixture::new();
    let id = f.api("com.acme.Generic");
    let string = f.platform.string();
    f.add(
        id,
        void("take")
            .with_type_param(TypeParam::bounded("U", vec![string]))
            .with_param("value", DeclaredType::var("U")),
    );
    assert_eq!(f.error(id).code, ErrorCode::E0003);
}

#[test]
fn native_methods_depend_on_language() {
    let mut f = Fixture::new();
    let id = f.api("com.acme.Native");
    f.add(id, void("run"));
    f.add(
        id,
        MethodDecl::new("locale", DeclaredType::Primitive(Primitive::Int))
            .with_markers(MethodMarkers::NATIVE)
            .with_param("raw", DeclaredType::Wildcard)
            .with_doc("Raw access.\n<native:js>\nreturn this.raw;\n</native:js>"),
    );

    let java = match f.build_for(id, "java") {
        Ok(output) => output,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(names(&java), vec!["run"]);
    assert_eq!(java.warnings[0].code, ErrorCode::W0002);

    let js = match f.build_for(id, "js") {
        Ok(output) => output,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(names(&js), vec!["run", "locale"]);
    assert_eq!(js.model.methods[1].native_body("js"), Some("return this.raw;"));
    assert!(js.warnings.is_empty());
}

#[test]
fn overloads_with_divergent_returns_are_rejected() {
    let mut f = Fixture::new();
    let id = f.api("com.acme.Sizes");
    let string = f.platform.string();
    f.add(id, MethodDecl::new("size", DeclaredType::Primitive(Primitive::Int)));
    f.add(
        id,
        MethodDecl::new("size", DeclaredType::Primitive(Primitive::Long))
            .with_param("unit", string),
    );
    let err = f.error(id);
    assert_eq!(err.code, ErrorCode::E0301);
    assert_eq!(err.kind, ModelErrorKind::OverloadConflict);
}

// Closure

#[test]
fn empty_interface_is_rejected() {
    let mut f = Fixture::new();
    let id = f.api("com.acme.Empty");
    let err = f.error(id);
    assert_eq!(err.code, ErrorCode::E0401);
    assert_eq!(err.kind, ModelErrorKind::EmptyModel);
}

#[test]
fn interface_with_only_a_supertype_is_accepted() {
    let mut f = Fixture::new();
    let base = f.api("com.acme.Base");
    f.add(base, void("run"));
    let marker = f.concrete("com.acme.Marker");
    f.extend(marker, base);
    let output = f.built(marker);
    assert_eq!(names(&output), vec!["run"]);
}

#[test]
fn references_and_imports() {
    let mut f = Fixture::new();
    let vertx = Platform::register_root(&mut f.arena, &WellKnownTypes::default());
    let options = f.arena.add_type(
        TypeDecl::class("com.acme.options.ServerOptions").with_markers(TypeMarkers::DATA_OBJECT),
    );
    let request = f.api("com.acme.http.Request");
    let sibling = f.api("com.acme.Sibling");
    let server = f.api("com.acme.Server");

    let on_request = f.platform.callback(DeclaredType::class(request));
    f.add(server, void("requestHandler").with_param("handler", on_request));
    f.add(
        server,
        void("configure").with_param("options", DeclaredType::class(options)),
    );
    f.add(server, MethodDecl::new("owner", DeclaredType::class(vertx)));
    f.add(server, MethodDecl::new("sibling", DeclaredType::class(sibling)));
    f.add(
        server,
        MethodDecl::new("listen", DeclaredType::class(server)).with_markers(MethodMarkers::FLUENT),
    );

    let output = f.built(server);
    let model = &output.model;
    let referenced: Vec<_> = model
        .referenced_types
        .iter()
        .map(|c| c.qualified_name.as_str())
        .collect();
    assert_eq!(referenced, vec!["com.acme.Sibling", "com.acme.http.Request"]);
    let data_objects: Vec<_> = model
        .referenced_data_object_types
        .iter()
        .map(|c| c.simple_name.as_str())
        .collect();
    assert_eq!(data_objects, vec!["ServerOptions"]);
    let imported: Vec<_> = model
        .imported_types
        .iter()
        .map(|c| c.qualified_name.as_str())
        .collect();
    assert_eq!(
        imported,
        vec![
            "com.acme.http.Request",
            "com.acme.options.ServerOptions",
            "io.vertx.core.Vertx"
        ]
    );
}

#[test]
fn type_param_variance_is_resolved() {
    let mut f = Fixture::new();
    let source = f.arena.add_type(
        TypeDecl::interface("com.acme.Source")
            .with_markers(TypeMarkers::GEN)
            .with_type_param(TypeParam::new("T"))
            .with_type_param(TypeParam::new("U")),
    );
    let completion = f.platform.completion(DeclaredType::var("T"));
    f.add(source, void("next").with_param("handler", completion));
    f.add(source, void("accept").with_param("value", DeclaredType::var("U")));

    let output = f.built(source);
    let t = output.model.type_param("T").map(|tp| tp.variance);
    let u = output.model.type_param("U").map(|tp| tp.variance);
    assert_eq!(t, Some(crate::Variance::COVARIANT | crate::Variance::INVARIANT));
    assert_eq!(
        u,
        Some(crate::Variance::CONTRAVARIANT | crate::Variance::INVARIANT)
    );
}

#[test]
fn variance_only_counts_declared_members() {
    let mut f = Fixture::new();
    let sink = f.arena.add_type(
        TypeDecl::interface("com.acme.Sink")
            .with_markers(TypeMarkers::GEN)
            .with_type_param(TypeParam::new("T")),
    );
    f.add(sink, void("accept").with_param("value", DeclaredType::var("T")));
    let pipe = f.arena.add_type(
        TypeDecl::interface("com.acme.Pipe")
            .with_markers(TypeMarkers::GEN)
            .with_type_param(TypeParam::new("T")),
    );
    f.arena.add_supertype(
        pipe,
        DeclaredType::generic(sink, vec![DeclaredType::var("T")]),
    );
    f.add(pipe, MethodDecl::new("peek", DeclaredType::var("T")));

    let output = f.built(pipe);
    assert!(output.model.method("accept").is_some());
    assert_eq!(
        output.model.type_param("T").map(|tp| tp.variance),
        Some(crate::Variance::COVARIANT | crate::Variance::INVARIANT)
    );
}
