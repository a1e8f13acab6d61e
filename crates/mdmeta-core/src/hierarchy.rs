//! Type inheritance lookups.
//!
//! Descriptors refer to types by path only. Resolving "is `A` a `B`?" goes
//! through [`TypeHierarchy`], so hosts can back it with their own reflection
//! data while tests use a plain [`TypeTree`].

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::type_ref::{TypeRef, well_known};

pub trait TypeHierarchy {
    /// Direct parent, or `None` for roots and unknown types.
    fn parent_of(&self, ty: &TypeRef) -> Option<&TypeRef>;

    /// Whether the type is loaded. Unknown types never satisfy an "is-a" check.
    fn is_known(&self, ty: &TypeRef) -> bool;

    /// Inclusive "is-a": `child == parent` or `parent` is an ancestor of `child`.
    /// A cyclic chain stops at the first repeated type.
    fn is_child_of(&self, child: &TypeRef, parent: &TypeRef) -> bool {
        if !self.is_known(child) || !self.is_known(parent) {
            return false;
        }

        let mut seen = IndexSet::new();
        let mut current = Some(child);
        while let Some(ty) = current {
            if ty == parent {
                return true;
            }
            if !seen.insert(ty) {
                return false;
            }
            current = self.parent_of(ty);
        }
        false
    }
}

/// Parent table keyed by type path, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTree {
    parents: IndexMap<TypeRef, Option<TypeRef>>,
}

impl TypeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine classes and structs the built-in key schema refers to.
    pub fn engine_defaults() -> Self {
        use well_known::*;

        let mut tree = Self::new();
        tree.declare(OBJECT, None)
            .declare(CLASS, Some(OBJECT))
            .declare(ENUM, Some(OBJECT))
            .declare(INTERFACE, Some(OBJECT))
            .declare(BLUEPRINT, Some(OBJECT))
            .declare(BASE_WIDGET_BLUEPRINT, Some(BLUEPRINT))
            .declare(WIDGET_BLUEPRINT, Some(BASE_WIDGET_BLUEPRINT))
            .declare(VISUAL, Some(OBJECT))
            .declare(WIDGET, Some(VISUAL))
            .declare(WIDGET_ANIMATION, Some(OBJECT))
            .declare(DATA_TABLE, Some(OBJECT))
            // Script structs are roots of their own hierarchy.
            .declare(GAMEPLAY_TAG, None)
            .declare(GAMEPLAY_TAG_CONTAINER, None)
            .declare(PRIMARY_ASSET_ID, None)
            .declare(DATA_TABLE_ROW_HANDLE, None)
            .declare(LINEAR_COLOR, None)
            .declare(COLOR, None)
            .declare(SOFT_OBJECT_PATH, None)
            .declare(SOFT_CLASS_PATH, Some(SOFT_OBJECT_PATH))
            .declare(INSTANCED_STRUCT, None);
        tree
    }

    /// Declares `ty`, replacing any previous parent.
    pub fn declare(&mut self, ty: TypeRef, parent: Option<TypeRef>) -> &mut Self {
        self.parents.insert(ty, parent);
        self
    }

    /// Declares every entry of `other`, overriding existing parents.
    pub fn extend(&mut self, other: &TypeTree) {
        for (ty, parent) in &other.parents {
            self.parents.insert(ty.clone(), parent.clone());
        }
    }

    /// Finds a declared type by full path, falling back to its short name.
    pub fn lookup(&self, name: &str) -> Option<&TypeRef> {
        if let Some((ty, _)) = self.parents.get_key_value(name) {
            return Some(ty);
        }
        self.parents.keys().find(|ty| ty.short_name() == name)
    }

    /// Declared types that inherit from themselves, in declaration order.
    pub fn cycles(&self) -> Vec<&TypeRef> {
        self.parents
            .keys()
            .filter(|ty| self.inherits_from_itself(ty))
            .collect()
    }

    fn inherits_from_itself(&self, ty: &TypeRef) -> bool {
        self.parent_of(ty)
            .is_some_and(|parent| self.is_known(parent) && self.is_child_of(parent, ty))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeRef, Option<&TypeRef>)> {
        self.parents.iter().map(|(ty, parent)| (ty, parent.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl TypeHierarchy for TypeTree {
    fn parent_of(&self, ty: &TypeRef) -> Option<&TypeRef> {
        self.parents.get(ty).and_then(Option::as_ref)
    }

    fn is_known(&self, ty: &TypeRef) -> bool {
        self.parents.contains_key(ty)
    }
}
