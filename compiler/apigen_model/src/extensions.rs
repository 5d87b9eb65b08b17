//! Extension methods, indexed by receiver.
//!
//! Collection is a separate phase: every extension is registered through an
//! [`ExtensionCollector`] and frozen into [`Extensions`] before the first
//! model is built, so no model can miss an extension registered later.

use apigen_diagnostic::ErrorCode;
use apigen_ir::{DeclGraph, DeclId, MethodId, MethodMarkers};
use rustc_hash::FxHashMap;

use crate::ModelError;

/// Frozen extension methods keyed by the receiver's declaration.
#[derive(Clone, Debug, Default)]
pub struct Extensions {
    by_receiver: FxHashMap<DeclId, Vec<MethodId>>,
    len: usize,
}

impl Extensions {
    /// No extensions at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extensions whose receiver erases to `receiver`, in registration order.
    pub fn for_receiver(&self, receiver: DeclId) -> &[MethodId] {
        self.by_receiver.get(&receiver).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Registration phase for extension methods.
#[derive(Debug, Default)]
pub struct ExtensionCollector {
    extensions: Extensions,
}

impl ExtensionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one extension method after checking its shape: public,
    /// static, and taking a declared type as its first parameter.
    pub fn register<G: DeclGraph + ?Sized>(
        &mut self,
        graph: &G,
        id: MethodId,
    ) -> Result<(), ModelError> {
        let method = graph.method(id);
        let subject = format!(
            "{}#{}",
            graph.type_decl(method.owner).qualified_name,
            method.name
        );

        if !method.is_public() {
            return Err(ModelError::method_shape(
                ErrorCode::E0504,
                subject,
                method.span,
                format!("extension method `{}` must be public", method.name),
            ));
        }
        if !method.is_static() {
            return Err(ModelError::method_shape(
                ErrorCode::E0505,
                subject,
                method.span,
                format!("extension method `{}` must be static", method.name),
            ));
        }
        let Some(receiver) = method
            .params
            .first()
            .and_then(|param| param.ty.erased_decl())
        else {
            return Err(ModelError::method_shape(
                ErrorCode::E0506,
                subject,
                method.span,
                format!(
                    "extension method `{}` must take the extended type as its first parameter",
                    method.name
                ),
            ));
        };

        tracing::trace!(method = %subject, receiver = %graph.type_decl(receiver).qualified_name, "extension registered");
        self.extensions
            .by_receiver
            .entry(receiver)
            .or_default()
            .push(id);
        self.extensions.len += 1;
        Ok(())
    }

    /// Register every extension-marked method in `graph`.
    ///
    /// Malformed extensions are returned, not registered; the rest of the
    /// collection proceeds.
    pub fn collect_marked<G: DeclGraph + ?Sized>(&mut self, graph: &G) -> Vec<ModelError> {
        let mut errors = Vec::new();
        for decl in graph.type_decl_ids() {
            for &id in graph.enclosed_members(decl) {
                if graph.method(id).has_marker(MethodMarkers::EXTENSION) {
                    if let Err(err) = self.register(graph, id) {
                        errors.push(err);
                    }
                }
            }
        }
        errors
    }

    /// End the registration phase.
    pub fn freeze(self) -> Extensions {
        self.extensions
    }
}
