//! The declaration graph capability and its in-memory arena.
//!
//! The model builder never sees a front-end directly. It asks a
//! [`DeclGraph`] for a declaration's type, its direct supertypes, its
//! enclosed members and its type parameters; everything else is derived.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{DeclId, DeclaredType, MethodDecl, MethodId, TypeDecl, TypeParam};

/// Read-only access to an elaborated declaration graph.
///
/// Implementations must be immutable for the duration of a generation run;
/// models built from the graph are cached by qualified name.
pub trait DeclGraph {
    /// The type declaration behind `id`.
    fn type_decl(&self, id: DeclId) -> &TypeDecl;

    /// The method declaration behind `id`.
    fn method(&self, id: MethodId) -> &MethodDecl;

    /// Resolve a fully-qualified name.
    fn lookup(&self, qualified_name: &str) -> Option<DeclId>;

    /// Every type declaration in the graph, in insertion order.
    fn type_decl_ids(&self) -> Vec<DeclId>;

    /// The declaration's own type: `Decl<T1, .., Tn>` over its type variables.
    fn declared_type(&self, id: DeclId) -> DeclaredType {
        let args = self
            .type_decl(id)
            .type_params
            .iter()
            .map(TypeParam::as_type)
            .collect();
        DeclaredType::generic(id, args)
    }

    fn direct_supertypes(&self, id: DeclId) -> &[DeclaredType] {
        &self.type_decl(id).supertypes
    }

    fn enclosed_members(&self, id: DeclId) -> &[MethodId] {
        &self.type_decl(id).members
    }

    fn type_parameters(&self, id: DeclId) -> &[TypeParam] {
        &self.type_decl(id).type_params
    }

    /// Reflexive, transitive subtype check over declarations.
    ///
    /// Tolerates cyclic supertype edges in malformed graphs.
    fn is_subtype_decl(&self, sub: DeclId, sup: DeclId) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![sub];
        while let Some(current) = stack.pop() {
            if current == sup {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(
                self.direct_supertypes(current)
                    .iter()
                    .filter_map(DeclaredType::erased_decl),
            );
        }
        false
    }
}

/// In-memory declaration graph.
///
/// Front-ends populate it once, then hand out shared references.
#[derive(Clone, Debug, Default)]
pub struct DeclArena {
    types: Vec<TypeDecl>,
    methods: Vec<MethodDecl>,
    by_name: FxHashMap<String, DeclId>,
}

impl DeclArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type declaration, registering it under its qualified name.
    ///
    /// A later declaration with the same qualified name shadows the earlier
    /// one for [`DeclGraph::lookup`].
    pub fn add_type(&mut self, decl: TypeDecl) -> DeclId {
        let id = DeclId::new(Self::next_index(self.types.len()));
        self.by_name.insert(decl.qualified_name.clone(), id);
        self.types.push(decl);
        id
    }

    /// Add a method to `owner`'s member list.
    pub fn add_method(&mut self, owner: DeclId, mut method: MethodDecl) -> MethodId {
        let id = MethodId::new(Self::next_index(self.methods.len()));
        method.owner = owner;
        self.methods.push(method);
        self.types[owner.index()].members.push(id);
        id
    }

    /// Append a direct supertype after the fact (for mutually recursive graphs).
    pub fn add_supertype(&mut self, id: DeclId, supertype: DeclaredType) {
        self.types[id.index()].supertypes.push(supertype);
    }

    /// Record `inner` as nested inside `outer`.
    pub fn add_nested(&mut self, outer: DeclId, inner: DeclId) {
        self.types[outer.index()].nested.push(inner);
    }

    /// Mutable access for front-ends finishing a declaration.
    pub fn type_decl_mut(&mut self, id: DeclId) -> &mut TypeDecl {
        &mut self.types[id.index()]
    }

    /// Number of type declarations.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "declaration graphs never approach u32::MAX entries"
    )]
    fn next_index(len: usize) -> u32 {
        len as u32
    }
}

impl DeclGraph for DeclArena {
    fn type_decl(&self, id: DeclId) -> &TypeDecl {
        &self.types[id.index()]
    }

    fn method(&self, id: MethodId) -> &MethodDecl {
        &self.methods[id.index()]
    }

    fn lookup(&self, qualified_name: &str) -> Option<DeclId> {
        self.by_name.get(qualified_name).copied()
    }

    fn type_decl_ids(&self) -> Vec<DeclId> {
        (0..self.types.len())
            .map(|i| DeclId::new(Self::next_index(i)))
            .collect()
    }
}
