//! Method table with overload merging.
//!
//! Adding a method whose signature (name plus parameter types) is already
//! present merges the owner sets instead. A new overload must agree with
//! every existing overload of its name on the return type.

use rustc_hash::FxHashMap;

use crate::{MethodGroup, MethodModel, TypeKind};

#[derive(Debug, Default)]
pub(super) struct MethodTable {
    methods: Vec<MethodModel>,
    groups: Vec<MethodGroup>,
    by_name: FxHashMap<String, usize>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) enum Added {
    New,
    /// Same signature already present; owner types were unioned.
    Merged,
}

/// Overloads of one name with different return types.
#[derive(Clone, Debug)]
pub(super) struct ReturnConflict {
    pub existing: TypeKind,
    pub found: TypeKind,
}

impl MethodTable {
    pub(super) fn add(&mut self, method: MethodModel) -> Result<Added, ReturnConflict> {
        if let Some(existing) = self.methods.iter_mut().find(|m| m.same_signature(&method)) {
            existing.owner_types.extend(method.owner_types);
            return Ok(Added::Merged);
        }

        let index = self.methods.len();
        match self.by_name.get(&method.name).copied() {
            Some(group) => {
                let group = &mut self.groups[group];
                if let Some(&first) = group.methods.first() {
                    let existing = &self.methods[first].return_type;
                    if *existing != method.return_type {
                        return Err(ReturnConflict {
                            existing: existing.clone(),
                            found: method.return_type,
                        });
                    }
                }
                group.methods.push(index);
            }
            None => {
                self.by_name.insert(method.name.clone(), self.groups.len());
                self.groups.push(MethodGroup {
                    name: method.name.clone(),
                    methods: vec![index],
                });
            }
        }
        self.methods.push(method);
        Ok(Added::New)
    }

    pub(super) fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Freeze into the method list and the groups, each group ordered by
    /// ascending parameter count (stable for equal counts).
    pub(super) fn finish(self) -> (Vec<MethodModel>, Vec<MethodGroup>) {
        let MethodTable {
            methods,
            mut groups,
            ..
        } = self;
        for group in &mut groups {
            group.methods.sort_by_key(|&i| methods[i].params.len());
        }
        (methods, groups)
    }
}
