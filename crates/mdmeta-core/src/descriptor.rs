//! Declarative type shapes.
//!
//! A [`TypeDescriptor`] is what a metadata key declares it supports: a pin
//! category, an optional refinement, an optional referenced type and a
//! container kind. Maps additionally carry a descriptor for their value type;
//! the outer category describes the key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::type_ref::TypeRef;

/// Pin category, spelled the way the Blueprint graph schema spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "*")]
    Wildcard,
    Bool,
    Byte,
    Int,
    Int64,
    Real,
    /// Legacy encoding; normalized to `Real` + `SubCategory::Float`.
    Float,
    /// Legacy encoding; normalized to `Real` + `SubCategory::Double`.
    Double,
    String,
    Name,
    Text,
    Struct,
    Object,
    SoftObject,
    Class,
    SoftClass,
    Interface,
    Enum,
    Delegate,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Wildcard,
        Category::Bool,
        Category::Byte,
        Category::Int,
        Category::Int64,
        Category::Real,
        Category::Float,
        Category::Double,
        Category::String,
        Category::Name,
        Category::Text,
        Category::Struct,
        Category::Object,
        Category::SoftObject,
        Category::Class,
        Category::SoftClass,
        Category::Interface,
        Category::Enum,
        Category::Delegate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Wildcard => "wildcard",
            Category::Bool => "bool",
            Category::Byte => "byte",
            Category::Int => "int",
            Category::Int64 => "int64",
            Category::Real => "real",
            Category::Float => "float",
            Category::Double => "double",
            Category::String => "string",
            Category::Name => "name",
            Category::Text => "text",
            Category::Struct => "struct",
            Category::Object => "object",
            Category::SoftObject => "softobject",
            Category::Class => "class",
            Category::SoftClass => "softclass",
            Category::Interface => "interface",
            Category::Enum => "enum",
            Category::Delegate => "delegate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name == "*" {
            return Some(Category::Wildcard);
        }
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubCategory {
    Float,
    Double,
}

impl SubCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SubCategory::Float => "float",
            SubCategory::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "float" => Some(SubCategory::Float),
            "double" => Some(SubCategory::Double),
            _ => None,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    #[default]
    None,
    Array,
    Set,
    Map,
}

impl ContainerKind {
    pub fn is_none(&self) -> bool {
        matches!(self, ContainerKind::None)
    }
}

/// A specific member of a type, e.g. a delegate signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeRef>,
    pub name: String,
}

impl MemberReference {
    pub fn new(parent: Option<TypeRef>, name: impl Into<String>) -> Self {
        Self {
            parent,
            name: name.into(),
        }
    }
}

/// Structural equality and hashing; two descriptors that spell the same
/// shape are the same descriptor.
///
/// Constructors and builders keep `value_type` present exactly when the
/// container is a map, and apply [`fix_up`](Self::fix_up). Deserialized
/// descriptors keep their persisted category so the legacy encoding stays
/// observable until a registry normalizes it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDescriptor")]
pub struct TypeDescriptor {
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_category: Option<SubCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    referenced_type: Option<TypeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_reference: Option<MemberReference>,
    #[serde(skip_serializing_if = "ContainerKind::is_none")]
    container: ContainerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_type: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub fn new(category: Category) -> Self {
        let mut desc = Self {
            category,
            sub_category: None,
            referenced_type: None,
            member_reference: None,
            container: ContainerKind::None,
            value_type: None,
        };
        desc.fix_up();
        desc
    }

    pub fn wildcard() -> Self {
        Self::new(Category::Wildcard)
    }

    pub fn struct_of(ty: TypeRef) -> Self {
        Self::new(Category::Struct).with_referenced_type(ty)
    }

    pub fn object_of(class: TypeRef) -> Self {
        Self::new(Category::Object).with_referenced_type(class)
    }

    pub fn with_sub_category(mut self, sub_category: SubCategory) -> Self {
        self.sub_category = Some(sub_category);
        self.fix_up();
        self
    }

    pub fn with_referenced_type(mut self, ty: TypeRef) -> Self {
        self.referenced_type = Some(ty);
        self
    }

    pub fn with_member_reference(mut self, member: MemberReference) -> Self {
        self.member_reference = Some(member);
        self
    }

    /// Drops any container, leaving the element shape.
    pub fn scalar(mut self) -> Self {
        self.container = ContainerKind::None;
        self.value_type = None;
        self
    }

    pub fn array(self) -> Self {
        let mut desc = self.scalar();
        desc.container = ContainerKind::Array;
        desc
    }

    pub fn set(self) -> Self {
        let mut desc = self.scalar();
        desc.container = ContainerKind::Set;
        desc
    }

    /// Map keyed by `self`'s shape, holding `value`.
    pub fn map_of(self, value: TypeDescriptor) -> Self {
        let mut desc = self.scalar();
        desc.container = ContainerKind::Map;
        desc.value_type = Some(Box::new(value.scalar()));
        desc
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sub_category(&self) -> Option<SubCategory> {
        self.sub_category
    }

    pub fn referenced_type(&self) -> Option<&TypeRef> {
        self.referenced_type.as_ref()
    }

    pub fn member_reference(&self) -> Option<&MemberReference> {
        self.member_reference.as_ref()
    }

    pub fn container(&self) -> ContainerKind {
        self.container
    }

    pub fn value_type(&self) -> Option<&TypeDescriptor> {
        self.value_type.as_deref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.category == Category::Wildcard
    }

    /// Normalizes the legacy float/double encoding.
    ///
    /// `float`/`double` as the primary category move to the sub-category under
    /// `real`; a bare `real` defaults to `double`. Idempotent.
    pub fn fix_up(&mut self) {
        if self.sub_category.is_none() {
            match self.category {
                Category::Float => {
                    self.category = Category::Real;
                    self.sub_category = Some(SubCategory::Float);
                }
                Category::Double => {
                    self.category = Category::Real;
                    self.sub_category = Some(SubCategory::Double);
                }
                Category::Real => self.sub_category = Some(SubCategory::Double),
                _ => {}
            }
        }

        if let Some(value) = self.value_type.as_deref_mut() {
            value.fix_up();
        }
    }

    pub fn fixed_up(mut self) -> Self {
        self.fix_up();
        self
    }

    pub(crate) fn fmt_scalar(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            return f.write_str("*");
        }

        f.write_str(self.category.as_str())?;

        let mut args = Vec::new();
        if let Some(sub) = self.sub_category {
            args.push(sub.as_str().to_string());
        }
        if let Some(ty) = &self.referenced_type {
            args.push(ty.short_name().to_string());
        }
        if let Some(member) = &self.member_reference {
            args.push(fmt_member(member));
        }

        if !args.is_empty() {
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}

impl Default for TypeDescriptor {
    fn default() -> Self {
        Self::wildcard()
    }
}

impl From<Category> for TypeDescriptor {
    fn from(category: Category) -> Self {
        Self::new(category)
    }
}

pub(crate) fn fmt_member(member: &MemberReference) -> String {
    match &member.parent {
        Some(parent) => format!("@{}::{}", parent.short_name(), member.name),
        None => format!("@{}", member.name),
    }
}

/// Renders shape notation: `int`, `real(double)`, `array<struct(GameplayTag)>`,
/// `map<int, string>`.
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.container {
            ContainerKind::None => self.fmt_scalar(f),
            ContainerKind::Array => {
                f.write_str("array<")?;
                self.fmt_scalar(f)?;
                f.write_str(">")
            }
            ContainerKind::Set => {
                f.write_str("set<")?;
                self.fmt_scalar(f)?;
                f.write_str(">")
            }
            ContainerKind::Map => {
                f.write_str("map<")?;
                self.fmt_scalar(f)?;
                f.write_str(", ")?;
                match &self.value_type {
                    Some(value) => value.fmt_scalar(f)?,
                    None => f.write_str("*")?,
                }
                f.write_str(">")
            }
        }
    }
}

/// Persisted form. Older configs may omit the value type of a map, or carry
/// one on a non-map; both are repaired on load.
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    category: Category,
    #[serde(default)]
    sub_category: Option<SubCategory>,
    #[serde(default)]
    referenced_type: Option<TypeRef>,
    #[serde(default)]
    member_reference: Option<MemberReference>,
    #[serde(default)]
    container: ContainerKind,
    #[serde(default)]
    value_type: Option<Box<TypeDescriptor>>,
}

impl From<RawDescriptor> for TypeDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        let value_type = match raw.container {
            ContainerKind::Map => Some(
                raw.value_type
                    .map(|v| Box::new((*v).scalar()))
                    .unwrap_or_else(|| Box::new(TypeDescriptor::wildcard())),
            ),
            _ => None,
        };

        Self {
            category: raw.category,
            sub_category: raw.sub_category,
            referenced_type: raw.referenced_type,
            member_reference: raw.member_reference,
            container: raw.container,
            value_type,
        }
    }
}
