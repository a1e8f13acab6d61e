//! Metadata key rules.
//!
//! A [`KeyRule`] declares one metadata key: how its value is edited, which
//! field shapes and Blueprint types it applies to, and which other keys it
//! depends on or excludes.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use mdmeta_core::utils::name_to_display_string;
use mdmeta_core::{
    Category, FieldType, MetadataMap, TypeDescriptor, TypeHierarchy, TypeRef, well_known,
};

use crate::matcher::Matcher;
use crate::registry::FieldRole;

/// How a key's value is edited and encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Presence is the value; stored as an empty string.
    #[default]
    Flag,
    Boolean,
    String,
    Integer,
    Float,
    /// A single gameplay tag.
    Tag,
    /// Comma-separated gameplay tags.
    TagSet,
    /// One of the rule's value list entries.
    ValueList,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Flag => "flag",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Tag => "tag",
            ValueKind::TagSet => "tagset",
            ValueKind::ValueList => "valuelist",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a rule may be offered, independent of field shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope {
    /// Whole functions (and their entry/tunnel/custom event nodes).
    pub functions: bool,
    /// Whole user-defined structs.
    pub structs: bool,
    pub variables: bool,
    pub local_variables: bool,
    pub parameters: bool,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            functions: false,
            structs: false,
            variables: true,
            local_variables: true,
            parameters: true,
        }
    }
}

impl Scope {
    /// Struct members have no scope flag of their own.
    pub fn allows(&self, role: FieldRole) -> bool {
        match role {
            FieldRole::Variable => self.variables,
            FieldRole::LocalVariable => self.local_variables,
            FieldRole::Parameter => self.parameters,
            FieldRole::StructMember => true,
        }
    }

    fn any_field(&self) -> bool {
        self.variables || self.local_variables || self.parameters
    }
}

/// Identity of a rule. The same key may be declared once per value kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleId<'a> {
    pub key: &'a str,
    pub kind: ValueKind,
}

/// Numeric bounds of an integer or float rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericRange<T> {
    pub min: T,
    pub max: T,
    /// Slider bounds, when the slider is enabled.
    pub slider: Option<(T, T)>,
}

impl<T: PartialOrd + Copy> NumericRange<T> {
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// One configurable metadata key.
///
/// Numeric bounds and the value list are stored for every rule but only
/// observable through [`int_range`](Self::int_range),
/// [`float_range`](Self::float_range) and
/// [`value_options`](Self::value_options), which ignore them unless the kind
/// matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyRule {
    pub key: String,
    pub kind: ValueKind,
    pub description: String,
    /// Display group, `|`-separated for nesting.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_key: Option<String>,
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub incompatible_keys: IndexSet<String>,
    pub supported_hosts: IndexSet<TypeRef>,
    pub supported_types: IndexSet<TypeDescriptor>,
    pub scope: Scope,
    pub allow_slider: bool,
    pub min_int: i32,
    pub max_int: i32,
    pub slider_min_int: i32,
    pub slider_max_int: i32,
    pub min_float: f32,
    pub max_float: f32,
    pub slider_min_float: f32,
    pub slider_max_float: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_list: Vec<String>,
}

impl Default for KeyRule {
    fn default() -> Self {
        Self {
            key: String::new(),
            kind: ValueKind::Flag,
            description: String::new(),
            category: String::new(),
            display_name: None,
            required_key: None,
            incompatible_keys: IndexSet::new(),
            supported_hosts: IndexSet::from([well_known::BLUEPRINT]),
            supported_types: IndexSet::from([TypeDescriptor::wildcard()]),
            scope: Scope::default(),
            allow_slider: true,
            min_int: i32::MIN,
            max_int: i32::MAX,
            slider_min_int: 0,
            slider_max_int: 100,
            min_float: f32::MIN,
            max_float: f32::MAX,
            slider_min_float: 0.0,
            slider_max_float: 100.0,
            value_list: Vec::new(),
        }
    }
}

impl KeyRule {
    pub fn new(key: impl Into<String>, kind: ValueKind, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> RuleId<'_> {
        RuleId {
            key: &self.key,
            kind: self.kind,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Replaces the supported types.
    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.supported_types = types.into_iter().collect();
        self
    }

    pub fn with_type(self, ty: TypeDescriptor) -> Self {
        self.with_types([ty])
    }

    pub fn add_type(mut self, ty: TypeDescriptor) -> Self {
        self.supported_types.insert(ty);
        self
    }

    /// Supports object references to `class`, and soft references too when
    /// `include_soft` is set.
    pub fn with_object_type(mut self, class: TypeRef, include_soft: bool) -> Self {
        self.supported_types.clear();
        self.add_object_type(class, include_soft)
    }

    pub fn add_object_type(mut self, class: TypeRef, include_soft: bool) -> Self {
        if include_soft {
            self.supported_types.insert(
                TypeDescriptor::new(Category::SoftObject).with_referenced_type(class.clone()),
            );
        }
        self.supported_types.insert(TypeDescriptor::object_of(class));
        self
    }

    /// Supports class references whose meta class is `class`.
    pub fn with_class_type(mut self, class: TypeRef, include_soft: bool) -> Self {
        self.supported_types.clear();
        self.add_class_type(class, include_soft)
    }

    pub fn add_class_type(mut self, class: TypeRef, include_soft: bool) -> Self {
        if include_soft {
            self.supported_types.insert(
                TypeDescriptor::new(Category::SoftClass).with_referenced_type(class.clone()),
            );
        }
        self.supported_types
            .insert(TypeDescriptor::new(Category::Class).with_referenced_type(class));
        self
    }

    /// Replaces the supported hosts.
    pub fn with_host(mut self, host: TypeRef) -> Self {
        self.supported_hosts = IndexSet::from([host]);
        self
    }

    pub fn add_host(mut self, host: TypeRef) -> Self {
        self.supported_hosts.insert(host);
        self
    }

    pub fn with_required(mut self, key: impl Into<String>) -> Self {
        self.required_key = Some(key.into());
        self
    }

    /// Replaces the incompatible keys with `key`.
    pub fn with_incompatible(mut self, key: impl Into<String>) -> Self {
        self.incompatible_keys = IndexSet::from([key.into()]);
        self
    }

    pub fn add_incompatible(mut self, key: impl Into<String>) -> Self {
        self.incompatible_keys.insert(key.into());
        self
    }

    /// Offered on whole functions only. Clears the supported types.
    pub fn functions_only(mut self) -> Self {
        self.scope = Scope {
            functions: true,
            structs: false,
            variables: false,
            local_variables: false,
            parameters: false,
        };
        self.supported_types.clear();
        self
    }

    /// Offered on whole structs only. Clears the supported types.
    pub fn structs_only(mut self) -> Self {
        self.scope = Scope {
            functions: false,
            structs: true,
            variables: false,
            local_variables: false,
            parameters: false,
        };
        self.supported_types.clear();
        self
    }

    pub fn on_functions(mut self, enabled: bool) -> Self {
        self.scope.functions = enabled;
        self
    }

    pub fn on_structs(mut self, enabled: bool) -> Self {
        self.scope.structs = enabled;
        self
    }

    pub fn on_variables(mut self, enabled: bool) -> Self {
        self.scope.variables = enabled;
        self
    }

    pub fn on_local_variables(mut self, enabled: bool) -> Self {
        self.scope.local_variables = enabled;
        self
    }

    pub fn on_parameters(mut self, enabled: bool) -> Self {
        self.scope.parameters = enabled;
        self
    }

    pub fn with_int_min(mut self, min: i32) -> Self {
        self.min_int = min;
        self
    }

    pub fn with_int_max(mut self, max: i32) -> Self {
        self.max_int = max;
        self
    }

    pub fn with_float_min(mut self, min: f32) -> Self {
        self.min_float = min;
        self
    }

    pub fn with_float_max(mut self, max: f32) -> Self {
        self.max_float = max;
        self
    }

    pub fn with_slider(mut self, allow: bool) -> Self {
        self.allow_slider = allow;
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_list = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn int_range(&self) -> Option<NumericRange<i32>> {
        (self.kind == ValueKind::Integer).then(|| NumericRange {
            min: self.min_int,
            max: self.max_int,
            slider: self
                .allow_slider
                .then_some((self.slider_min_int, self.slider_max_int)),
        })
    }

    pub fn float_range(&self) -> Option<NumericRange<f32>> {
        (self.kind == ValueKind::Float).then(|| NumericRange {
            min: self.min_float,
            max: self.max_float,
            slider: self
                .allow_slider
                .then_some((self.slider_min_float, self.slider_max_float)),
        })
    }

    pub fn value_options(&self) -> Option<&[String]> {
        (self.kind == ValueKind::ValueList).then_some(self.value_list.as_slice())
    }

    /// Whether `host` is-a one of the supported hosts.
    pub fn supports_host<H: TypeHierarchy + ?Sized>(&self, host: &TypeRef, types: &H) -> bool {
        self.supported_hosts
            .iter()
            .any(|supported| types.is_child_of(host, supported))
    }

    /// Whether any supported type matches `field`.
    pub fn supports_field<H: TypeHierarchy + ?Sized>(&self, field: &FieldType, types: &H) -> bool {
        let matcher = Matcher::new(types);
        self.supported_types
            .iter()
            .any(|desc| matcher.matches(desc, field))
    }

    /// Whether the rule should currently be offered, given the metadata
    /// already on the target. References to the rule's own key are ignored.
    pub fn is_available<M: MetadataMap + ?Sized>(&self, metadata: &M) -> bool {
        if let Some(required) = &self.required_key
            && *required != self.key
            && !metadata.contains(required)
        {
            return false;
        }

        !self
            .incompatible_keys
            .iter()
            .any(|key| *key != self.key && metadata.contains(key))
    }

    /// Whether the rule can be offered anywhere at all.
    pub fn is_reachable(&self) -> bool {
        if self.supported_hosts.is_empty() && !self.scope.structs {
            return false;
        }
        let on_fields = self.scope.any_field() && !self.supported_types.is_empty();
        on_fields || self.scope.functions || self.scope.structs
    }

    pub fn display_text(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => name_to_display_string(&self.key),
        }
    }

    pub fn tooltip_text(&self) -> String {
        match &self.display_name {
            Some(_) => format!("{}\n\nMeta Data Key: \"{}\"", self.description, self.key),
            None => self.description.clone(),
        }
    }

    /// Text searched by the key picker.
    pub fn filter_text(&self) -> String {
        match &self.display_name {
            Some(name) => format!("{} {}", self.key, name),
            None => self.key.clone(),
        }
    }
}
