//! Extension method grafting.
//!
//! A static utility method `<T> void f(Container<T> self, T value)` is
//! grafted onto every model whose interface is (or inherits from) the
//! receiver's declaration. The receiver parameter disappears; each method
//! type variable tied to a receiver type argument is replaced by what that
//! argument resolves to in the interface being built. Untied type variables
//! stay generic on the grafted method.

use apigen_ir::{Bindings, DeclGraph, DeclId, DeclaredType, MethodDecl};

use super::{MethodInput, ModelBuilder, Origin};
use crate::{ClassRef, ModelError};

impl<G: DeclGraph + ?Sized> ModelBuilder<'_, G> {
    pub(super) fn graft_extensions(&mut self) -> Result<(), ModelError> {
        let graph = self.graph;
        let extensions = self.extensions;
        let receivers = self.ancestors.order().to_vec();
        for receiver in receivers {
            if !self.contributes(receiver) {
                continue;
            }
            for &id in extensions.for_receiver(receiver) {
                self.graft(receiver, graph.method(id))?;
            }
        }
        Ok(())
    }

    fn graft(&mut self, receiver: DeclId, method: &MethodDecl) -> Result<(), ModelError> {
        let graph = self.graph;
        let Some((receiver_param, params)) = method.params.split_first() else {
            return Ok(());
        };

        let seen_as = self.ancestors.bindings(receiver).cloned().unwrap_or_default();
        let receiver_params = graph.type_parameters(receiver);
        let mut aliases = Bindings::default();
        let mut type_params = Vec::new();

        for tp in &method.type_params {
            let tied = receiver_param
                .ty
                .type_args()
                .iter()
                .zip(receiver_params)
                .find_map(|(arg, param)| match arg {
                    DeclaredType::TypeVar { name, .. } if *name == tp.name => Some(param),
                    _ => None,
                });
            match tied {
                Some(param) => {
                    let resolved = seen_as
                        .get(&param.name)
                        .cloned()
                        .unwrap_or_else(|| param.as_type());
                    tracing::trace!(var = %tp.name, to = %resolved.display(graph), "extension alias");
                    aliases.insert(tp.name.clone(), resolved);
                }
                None => type_params.push(tp.name.clone()),
            }
        }

        let invoker = graph.type_decl(method.owner);
        self.add_method(MethodInput {
            decl: method,
            params,
            bindings: aliases,
            type_params,
            owner: ClassRef::of(graph.type_decl(receiver)),
            invoker: Some(ClassRef::of(invoker)),
            is_static: false,
            origin: Origin::Extension,
            subject: format!("{}#{}", invoker.qualified_name, method.name),
        })
    }
}
