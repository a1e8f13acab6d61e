//! Stable type identities.
//!
//! A [`TypeRef`] names a class, struct or enum by object path
//! (`/Script/GameplayTags.GameplayTag`). It never owns the definition:
//! whether the type exists, and what it derives from, is answered by a
//! [`TypeHierarchy`](crate::TypeHierarchy).

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(Cow<'static, str>);

impl TypeRef {
    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    pub fn new(path: impl Into<String>) -> Self {
        Self(Cow::Owned(path.into()))
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Object name without its package, e.g. `GameplayTag`.
    pub fn short_name(&self) -> &str {
        let path = self.path();
        let start = path.rfind(['.', '/']).map(|i| i + 1).unwrap_or(0);
        &path[start..]
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Borrow<str> for TypeRef {
    fn borrow(&self) -> &str {
        self.path()
    }
}

impl From<&'static str> for TypeRef {
    fn from(path: &'static str) -> Self {
        Self::from_static(path)
    }
}

/// Engine types referenced by the built-in key schema.
pub mod well_known {
    use super::TypeRef;

    pub const OBJECT: TypeRef = TypeRef::from_static("/Script/CoreUObject.Object");
    pub const CLASS: TypeRef = TypeRef::from_static("/Script/CoreUObject.Class");
    /// Placeholder meaning "any enum" in enum descriptors.
    pub const ENUM: TypeRef = TypeRef::from_static("/Script/CoreUObject.Enum");
    pub const INTERFACE: TypeRef = TypeRef::from_static("/Script/CoreUObject.Interface");

    pub const BLUEPRINT: TypeRef = TypeRef::from_static("/Script/Engine.Blueprint");
    pub const BASE_WIDGET_BLUEPRINT: TypeRef =
        TypeRef::from_static("/Script/UMGEditor.BaseWidgetBlueprint");
    pub const WIDGET_BLUEPRINT: TypeRef = TypeRef::from_static("/Script/UMGEditor.WidgetBlueprint");

    pub const VISUAL: TypeRef = TypeRef::from_static("/Script/UMG.Visual");
    pub const WIDGET: TypeRef = TypeRef::from_static("/Script/UMG.Widget");
    pub const WIDGET_ANIMATION: TypeRef = TypeRef::from_static("/Script/UMG.WidgetAnimation");
    pub const DATA_TABLE: TypeRef = TypeRef::from_static("/Script/Engine.DataTable");

    pub const GAMEPLAY_TAG: TypeRef = TypeRef::from_static("/Script/GameplayTags.GameplayTag");
    pub const GAMEPLAY_TAG_CONTAINER: TypeRef =
        TypeRef::from_static("/Script/GameplayTags.GameplayTagContainer");
    pub const PRIMARY_ASSET_ID: TypeRef = TypeRef::from_static("/Script/CoreUObject.PrimaryAssetId");
    pub const DATA_TABLE_ROW_HANDLE: TypeRef =
        TypeRef::from_static("/Script/Engine.DataTableRowHandle");
    pub const LINEAR_COLOR: TypeRef = TypeRef::from_static("/Script/CoreUObject.LinearColor");
    pub const COLOR: TypeRef = TypeRef::from_static("/Script/CoreUObject.Color");
    pub const SOFT_OBJECT_PATH: TypeRef = TypeRef::from_static("/Script/CoreUObject.SoftObjectPath");
    pub const SOFT_CLASS_PATH: TypeRef = TypeRef::from_static("/Script/CoreUObject.SoftClassPath");
    pub const INSTANCED_STRUCT: TypeRef = TypeRef::from_static("/Script/StructUtils.InstancedStruct");
}
