//! Interface model construction.
//!
//! Building one interface runs in fixed steps:
//! 1. Admissibility of the declaration itself
//! 2. Supertype collection and concreteness rules
//! 3. Ancestor bindings (how the interface sees every ancestor's type vars)
//! 4. Member enumeration and per-method checks (`members`)
//! 5. Extension grafting (`extension`)
//! 6. Overload merging, done as each method is added (`overload`)
//! 7. Closure: empty-model check, self-reference pruning, variance
//!
//! The first fatal error aborts the build; warnings accumulate in the
//! output.

mod extension;
mod members;
mod overload;

use std::collections::{BTreeMap, BTreeSet};

use apigen_diagnostic::{Diagnostic, ErrorCode};
use apigen_ir::{
    Bindings, DeclGraph, DeclId, DeclKind, MethodDecl, MethodMarkers, ParamDecl, Span, TypeDecl,
    TypeParam,
};

use self::members::Ancestors;
use self::overload::{Added, MethodTable};
use crate::legality::{is_legal, Position};
use crate::method_kind::classify_method;
use crate::native::native_bodies;
use crate::variance::resolve_variance;
use crate::{
    BuildOptions, ClassRef, Extensions, InterfaceModel, MethodModel, ModelError, ParamModel,
    TypeClassifier, TypeKind,
};

/// A built model together with the warnings raised while building it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOutput {
    pub model: InterfaceModel,
    pub warnings: Vec<Diagnostic>,
}

/// Build the model of the interface `decl` for `options.lang`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(interface = %graph.type_decl(decl).qualified_name, lang = %options.lang)
)]
pub fn build_interface<G: DeclGraph + ?Sized>(
    graph: &G,
    decl: DeclId,
    extensions: &Extensions,
    options: &BuildOptions,
) -> Result<BuildOutput, ModelError> {
    ModelBuilder::new(graph, decl, extensions, options).build()
}

/// How a method came to be fluent-checked.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Origin {
    /// Declared by the interface being built.
    Target,
    /// Inherited from an abstract ancestor.
    Inherited { redeclared: bool },
    /// Grafted from a utility type.
    Extension,
}

/// One method ready for classification, whatever its origin.
struct MethodInput<'m> {
    decl: &'m MethodDecl,
    params: &'m [ParamDecl],
    /// Substitution from the declaring type's variables to the interface's.
    bindings: Bindings,
    /// Method-level type parameters that stay generic.
    type_params: Vec<String>,
    owner: ClassRef,
    invoker: Option<ClassRef>,
    is_static: bool,
    origin: Origin,
    subject: String,
}

struct ModelBuilder<'a, G: ?Sized> {
    graph: &'a G,
    target: DeclId,
    decl: &'a TypeDecl,
    extensions: &'a Extensions,
    options: &'a BuildOptions,
    classifier: TypeClassifier<'a, G>,
    ancestors: Ancestors,
    table: MethodTable,
    super_types: Vec<TypeKind>,
    concrete_super_types: Vec<TypeKind>,
    abstract_super_types: Vec<TypeKind>,
    referenced: BTreeSet<ClassRef>,
    referenced_data_objects: BTreeSet<ClassRef>,
    imported: BTreeSet<ClassRef>,
    warnings: Vec<Diagnostic>,
}

impl<'a, G: DeclGraph + ?Sized> ModelBuilder<'a, G> {
    fn new(
        graph: &'a G,
        target: DeclId,
        extensions: &'a Extensions,
        options: &'a BuildOptions,
    ) -> Self {
        ModelBuilder {
            graph,
            target,
            decl: graph.type_decl(target),
            extensions,
            options,
            classifier: TypeClassifier::new(graph, &options.well_known),
            ancestors: Ancestors::default(),
            table: MethodTable::default(),
            super_types: Vec::new(),
            concrete_super_types: Vec::new(),
            abstract_super_types: Vec::new(),
            referenced: BTreeSet::new(),
            referenced_data_objects: BTreeSet::new(),
            imported: BTreeSet::new(),
            warnings: Vec::new(),
        }
    }

    fn build(mut self) -> Result<BuildOutput, ModelError> {
        self.check_admissibility()?;
        let ty = self
            .classifier
            .classify(&self.graph.declared_type(self.target));
        self.collect_supertypes()?;
        self.ancestors = Ancestors::compute(self.graph, self.target, |st| {
            self.classifier.is_object(st)
        });
        self.collect_members()?;
        self.graft_extensions()?;
        self.finish(ty)
    }

    fn check_admissibility(&self) -> Result<(), ModelError> {
        let decl = self.decl;
        let name = &decl.qualified_name;

        if decl.kind != DeclKind::Interface {
            return Err(ModelError::admissibility(
                ErrorCode::E0001,
                name,
                decl.span,
                format!("generation marker can only be used with interfaces, `{name}` is not one"),
            ));
        }
        if !decl.is_gen() {
            return Err(ModelError::admissibility(
                ErrorCode::E0001,
                name,
                decl.span,
                format!("`{name}` is not marked as a generation target"),
            ));
        }
        if let Some(&nested) = decl.nested.first() {
            let nested = self.graph.type_decl(nested);
            return Err(ModelError::admissibility(
                ErrorCode::E0002,
                name,
                nested.span,
                format!(
                    "interface `{name}` declares nested type `{}`, nested types are not supported",
                    nested.name
                ),
            ));
        }
        self.check_type_param_bounds(&decl.type_params, name, decl.span)
    }

    /// Type parameters may only be bounded by the universal top type.
    fn check_type_param_bounds(
        &self,
        params: &[TypeParam],
        subject: &str,
        span: Span,
    ) -> Result<(), ModelError> {
        match params
            .iter()
            .find(|tp| !self.classifier.bounds_ok(&tp.bounds))
        {
            Some(tp) => Err(ModelError::admissibility(
                ErrorCode::E0003,
                subject,
                span,
                format!(
                    "type parameter `{}` of `{subject}` declares a bound, only the top type is allowed",
                    tp.name
                ),
            )),
            None => Ok(()),
        }
    }

    fn collect_supertypes(&mut self) -> Result<(), ModelError> {
        let graph = self.graph;
        for supertype in graph.direct_supertypes(self.target) {
            let Some(id) = supertype.erased_decl() else {
                continue;
            };
            if self.classifier.is_object(supertype) {
                continue;
            }
            let decl = graph.type_decl(id);
            let kind = self.classifier.classify(supertype);
            self.imported.insert(ClassRef::of(decl));
            self.collect_imports(&kind);

            if decl.is_gen() {
                self.record_references(&kind);
                if decl.is_concrete() {
                    self.concrete_super_types.push(kind.clone());
                } else {
                    self.abstract_super_types.push(kind.clone());
                }
                self.super_types.push(kind);
            }
        }

        let name = &self.decl.qualified_name;
        if self.decl.is_concrete() {
            if self.concrete_super_types.len() > 1 {
                let list = self
                    .concrete_super_types
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ModelError::supertype_shape(
                    ErrorCode::E0101,
                    name,
                    self.decl.span,
                    format!(
                        "concrete interface `{name}` cannot extend more than one concrete interface: {list}"
                    ),
                ));
            }
        } else if let Some(concrete) = self.concrete_super_types.first() {
            return Err(ModelError::supertype_shape(
                ErrorCode::E0102,
                name,
                self.decl.span,
                format!("abstract interface `{name}` cannot extend concrete interface `{concrete}`"),
            ));
        }
        Ok(())
    }

    /// Classify, check and add one method.
    fn add_method(&mut self, input: MethodInput<'_>) -> Result<(), ModelError> {
        let method = input.decl;
        let subject = input.subject;
        let lang = self.options.lang.as_str();

        let bodies = method.doc.as_deref().map(native_bodies).unwrap_or_default();
        let native = method.has_marker(MethodMarkers::NATIVE);
        if native && !bodies.contains_key(lang) {
            tracing::debug!(method = %subject, lang, "no native body, method dropped");
            self.warnings.push(
                Diagnostic::warning(ErrorCode::W0002)
                    .with_message(format!(
                        "native method `{}` has no `{lang}` body and is skipped",
                        method.name
                    ))
                    .with_label(method.span, format!("in `{subject}`")),
            );
            return Ok(());
        }

        self.check_type_param_bounds(&method.type_params, &subject, method.span)?;

        let fluent = method.has_marker(MethodMarkers::FLUENT);
        if fluent {
            self.check_fluent(method, input.origin, &input.owner, &subject)?;
        }

        let mut bindings = input.bindings;
        for shadowed in &input.type_params {
            bindings.remove(shadowed);
        }

        let mut param_kinds = Vec::with_capacity(input.params.len());
        for param in input.params {
            let kind = self.classifier.classify(&param.ty.substitute(&bindings));
            if !is_legal(&kind, Position::Param, native) {
                return Err(ModelError::illegal_type(
                    ErrorCode::E0201,
                    format!("{subject}({})", param.name),
                    param.span,
                    format!(
                        "type {kind} is not legal for use for {} in code generation",
                        Position::Param.describe()
                    ),
                ));
            }
            param_kinds.push(kind);
        }

        let cacheable = method.has_marker(MethodMarkers::CACHE_RETURN);
        let return_type = self
            .classifier
            .classify(&method.return_type.substitute(&bindings));
        if cacheable && return_type.is_void() {
            return Err(ModelError::method_shape(
                ErrorCode::E0502,
                &subject,
                method.span,
                format!("void method `{}` cannot be marked as cacheable", method.name),
            ));
        }
        if !fluent && !is_legal(&return_type, Position::Return, native) {
            return Err(ModelError::illegal_type(
                ErrorCode::E0202,
                &subject,
                method.span,
                format!(
                    "type {return_type} is not legal for use for {} in code generation",
                    Position::Return.describe()
                ),
            ));
        }

        let kind = classify_method(
            &method.name,
            &param_kinds,
            &return_type,
            fluent,
            method.markers,
        )
        .map_err(|missing| {
            ModelError::method_shape(
                ErrorCode::E0501,
                &subject,
                method.span,
                format!(
                    "{} `{}` must declare an `int` parameter",
                    missing.marker, method.name
                ),
            )
        })?;

        for kind in param_kinds.iter().chain(std::iter::once(&return_type)) {
            self.record_references(kind);
            self.collect_imports(kind);
        }

        let params = input
            .params
            .iter()
            .zip(param_kinds)
            .map(|(param, ty)| ParamModel {
                name: param.name.clone(),
                ty,
            })
            .collect();
        let model = MethodModel {
            name: method.name.clone(),
            kind,
            return_type,
            params,
            is_static: input.is_static,
            is_fluent: fluent,
            is_cacheable: cacheable,
            owner_types: BTreeSet::from([input.owner]),
            type_params: input.type_params,
            doc: method.doc.clone(),
            native_bodies: if native { bodies } else { BTreeMap::new() },
            invoker: input.invoker,
        };

        match self.table.add(model) {
            Ok(Added::New) => Ok(()),
            Ok(Added::Merged) => {
                tracing::trace!(method = %subject, "merged into existing signature");
                Ok(())
            }
            Err(conflict) => Err(ModelError::overload_conflict(
                &subject,
                method.span,
                format!(
                    "overloaded method `{}` must have the same return type: found `{}` and `{}`",
                    method.name, conflict.existing, conflict.found
                ),
            )),
        }
    }

    fn check_fluent(
        &mut self,
        method: &MethodDecl,
        origin: Origin,
        owner: &ClassRef,
        subject: &str,
    ) -> Result<(), ModelError> {
        match origin {
            Origin::Target => {
                let returns_subtype = method
                    .return_type
                    .erased_decl()
                    .is_some_and(|ret| self.graph.is_subtype_decl(ret, self.target));
                if !returns_subtype {
                    return Err(ModelError::method_shape(
                        ErrorCode::E0503,
                        subject,
                        method.span,
                        format!(
                            "fluent method `{}` must return a subtype of `{}`, found `{}`",
                            method.name,
                            self.decl.qualified_name,
                            method.return_type.display(self.graph)
                        ),
                    ));
                }
            }
            Origin::Inherited { redeclared: false } => {
                self.warnings.push(
                    Diagnostic::warning(ErrorCode::W0001)
                        .with_message(format!(
                            "fluent method `{}` is inherited from `{owner}` without being redeclared in `{}`",
                            method.name, self.decl.qualified_name
                        ))
                        .with_label(self.decl.span, format!("in `{}`", self.decl.qualified_name))
                        .with_secondary_label(method.span, format!("declared by `{owner}`"))
                        .with_note("redeclare it so the returned type is the inheriting interface"),
                );
            }
            Origin::Inherited { redeclared: true } | Origin::Extension => {}
        }
        Ok(())
    }

    /// Record API interfaces and data objects mentioned anywhere in `kind`.
    fn record_references(&mut self, kind: &TypeKind) {
        let root = self.options.well_known.root_platform.as_str();
        let referenced = &mut self.referenced;
        let data_objects = &mut self.referenced_data_objects;
        kind.walk(&mut |k| match k {
            TypeKind::ApiInterface { class, .. } if class.qualified_name != root => {
                referenced.insert(class.clone());
            }
            TypeKind::DataObject(class) => {
                data_objects.insert(class.clone());
            }
            _ => {}
        });
    }

    fn collect_imports(&mut self, kind: &TypeKind) {
        let imported = &mut self.imported;
        kind.walk(&mut |k| {
            if let Some(class) = k.class_ref() {
                imported.insert(class.clone());
            }
        });
    }

    fn finish(self, ty: TypeKind) -> Result<BuildOutput, ModelError> {
        let decl = self.decl;
        if self.table.is_empty() && self.super_types.is_empty() {
            return Err(ModelError::empty_model(&decl.qualified_name, decl.span));
        }

        let mut referenced = self.referenced;
        referenced.retain(|class| class.qualified_name != decl.qualified_name);
        let mut imported = self.imported;
        imported.retain(|class| class.package != decl.package);

        let (methods, method_groups) = self.table.finish();
        let param_names: Vec<String> = decl.type_params.iter().map(|tp| tp.name.clone()).collect();
        let own = ClassRef::of(decl);
        let declared = methods
            .iter()
            .filter(|m| m.invoker.is_none() && m.owner_types.contains(&own));
        let type_params = resolve_variance(&param_names, declared);

        tracing::debug!(
            methods = methods.len(),
            warnings = self.warnings.len(),
            "model built"
        );

        Ok(BuildOutput {
            model: InterfaceModel {
                lang: self.options.lang.clone(),
                simple_name: decl.name.clone(),
                qualified_name: decl.qualified_name.clone(),
                package: decl.package.clone(),
                doc: decl.doc.clone(),
                concrete: decl.is_concrete(),
                ty,
                type_params,
                super_types: self.super_types,
                concrete_super_types: self.concrete_super_types,
                abstract_super_types: self.abstract_super_types,
                methods,
                method_groups,
                referenced_types: referenced,
                referenced_data_object_types: self.referenced_data_objects,
                imported_types: imported,
            },
            warnings: self.warnings,
        })
    }
}

#[cfg(test)]
mod tests;
