//! Ancestor bindings and member enumeration.

use std::collections::VecDeque;

use apigen_ir::{Bindings, DeclGraph, DeclId, DeclaredType, MethodDecl, MethodMarkers, Modifiers};
use rustc_hash::FxHashMap;

use super::{MethodInput, ModelBuilder, Origin};
use crate::{ClassRef, ModelError};

/// The interface and its ancestors, each with the substitution that maps
/// the ancestor's type variables onto the interface's view of them.
///
/// `interface StringContainer extends Container<String>` yields
/// `Container: {T -> String}`. Diamonds keep the first path found.
#[derive(Debug, Default)]
pub(super) struct Ancestors {
    order: Vec<DeclId>,
    bindings: FxHashMap<DeclId, Bindings>,
}

impl Ancestors {
    /// Breadth-first walk from `target`, skipping the top type.
    pub(super) fn compute<G: DeclGraph + ?Sized>(
        graph: &G,
        target: DeclId,
        is_top: impl Fn(&DeclaredType) -> bool,
    ) -> Self {
        let identity: Bindings = graph
            .type_parameters(target)
            .iter()
            .map(|tp| (tp.name.clone(), tp.as_type()))
            .collect();
        let mut ancestors = Ancestors {
            order: vec![target],
            bindings: FxHashMap::default(),
        };
        ancestors.bindings.insert(target, identity);

        let mut queue = VecDeque::from([target]);
        while let Some(current) = queue.pop_front() {
            let current_bindings = ancestors.bindings.get(&current).cloned().unwrap_or_default();
            for supertype in graph.direct_supertypes(current) {
                let Some(id) = supertype.erased_decl() else {
                    continue;
                };
                if is_top(supertype) || ancestors.bindings.contains_key(&id) {
                    continue;
                }
                let bindings: Bindings = graph
                    .type_parameters(id)
                    .iter()
                    .zip(supertype.type_args())
                    .map(|(tp, arg)| (tp.name.clone(), arg.substitute(&current_bindings)))
                    .collect();
                ancestors.bindings.insert(id, bindings);
                ancestors.order.push(id);
                queue.push_back(id);
            }
        }
        ancestors
    }

    /// The interface first, then ancestors nearest-first.
    pub(super) fn order(&self) -> &[DeclId] {
        &self.order
    }

    pub(super) fn bindings(&self, id: DeclId) -> Option<&Bindings> {
        self.bindings.get(&id)
    }
}

impl<G: DeclGraph + ?Sized> ModelBuilder<'_, G> {
    /// Whether members and extensions of `owner` belong to this model:
    /// the interface itself or an abstract generation-target ancestor.
    pub(super) fn contributes(&self, owner: DeclId) -> bool {
        if owner == self.target {
            return true;
        }
        let decl = self.graph.type_decl(owner);
        decl.is_gen() && !decl.is_concrete()
    }

    pub(super) fn collect_members(&mut self) -> Result<(), ModelError> {
        let graph = self.graph;
        let owners = self.ancestors.order().to_vec();
        for owner in owners {
            if !self.contributes(owner) {
                continue;
            }
            let owner_decl = graph.type_decl(owner);
            let bindings = self.ancestors.bindings(owner).cloned().unwrap_or_default();
            for &id in graph.enclosed_members(owner) {
                let method = graph.method(id);
                if !self.is_visible(owner, method) {
                    continue;
                }
                let origin = if owner == self.target {
                    Origin::Target
                } else {
                    Origin::Inherited {
                        redeclared: self.redeclares(method, &bindings),
                    }
                };
                self.add_method(MethodInput {
                    decl: method,
                    params: &method.params,
                    bindings: bindings.clone(),
                    type_params: method.type_params.iter().map(|tp| tp.name.clone()).collect(),
                    owner: ClassRef::of(owner_decl),
                    invoker: None,
                    is_static: method.is_static(),
                    origin,
                    subject: format!("{}#{}", owner_decl.qualified_name, method.name),
                })?;
            }
        }
        Ok(())
    }

    fn is_visible(&self, owner: DeclId, method: &MethodDecl) -> bool {
        if method.has_marker(MethodMarkers::IGNORE) || method.has_marker(MethodMarkers::EXTENSION)
        {
            return false;
        }
        if !method.is_public() || method.modifiers.contains(Modifiers::DEFAULT) {
            return false;
        }
        // Static members are not inherited.
        owner == self.target || !method.is_static()
    }

    /// Whether the interface itself declares `inherited` with the same
    /// parameter types (after substitution).
    fn redeclares(&self, inherited: &MethodDecl, bindings: &Bindings) -> bool {
        self.graph
            .enclosed_members(self.target)
            .iter()
            .map(|&id| self.graph.method(id))
            .any(|own| {
                own.name == inherited.name
                    && own.params.len() == inherited.params.len()
                    && own
                        .params
                        .iter()
                        .zip(&inherited.params)
                        .all(|(a, b)| a.ty == b.ty.substitute(bindings))
            })
    }
}
