//! Metadata key rules for Blueprint fields, functions and structs.
//!
//! A [`RuleRegistry`] holds the configured [`KeyRule`]s and answers which of
//! them apply to a given field on a given Blueprint type. The
//! [`MetadataBridge`] keeps field metadata alive across recompiles, which
//! rebuild field objects from scratch.
//!
//! # Example
//!
//! ```
//! use mdmeta_core::{FieldType, TypeTree, well_known};
//! use mdmeta_lib::{EditorConfig, FieldRole};
//!
//! let config = EditorConfig::default();
//! let registry = config.build_registry().expect("built-in schema is valid");
//! let types = config.type_tree();
//!
//! let keys: Vec<&str> = registry
//!     .field_rules(&well_known::BLUEPRINT, &FieldType::Int, FieldRole::Variable, &types)
//!     .iter()
//!     .map(|rule| rule.key.as_str())
//!     .collect();
//! assert!(keys.contains(&"ClampMin"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bridge;
pub mod config;
pub mod dump;
pub mod matcher;
pub mod registry;
pub mod rule;
pub mod schema;
pub mod value;

pub use bridge::{
    CachedFieldMetadata, CompileListener, FieldOwner, MetadataBridge, MetadataOwner, OwnerKey,
    PostChange, VariableDescription, copy_field_metadata, restore_local_variables,
};
pub use config::{ConfigIssue, EditorConfig, EnableFlags, FunctionNode};
pub use matcher::Matcher;
pub use registry::{FieldRole, RegistryOptions, RuleRegistry};
pub use rule::{KeyRule, NumericRange, RuleId, Scope, ValueKind};
pub use value::{ValueChange, ValueError};

pub use mdmeta_core::{Colors, Style};

/// Errors from loading configuration and building registries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid rule `{key}`: {reason}")]
    InvalidRule { key: String, reason: String },

    #[error("invalid shape: {0}")]
    Shape(#[from] mdmeta_core::ShapeParseError),

    #[error(transparent)]
    Value(#[from] ValueError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod bridge_tests;
#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod rule_tests;
#[cfg(test)]
mod schema_tests;
