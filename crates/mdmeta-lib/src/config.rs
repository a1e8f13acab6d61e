//! Editor configuration.
//!
//! Persisted as JSON. A missing field takes its default, so an empty object
//! yields the built-in schema with every editor enabled.

use serde::{Deserialize, Serialize};

use mdmeta_core::{TypeHierarchy, TypeTree};

use crate::Result;
use crate::registry::{FieldRole, RegistryOptions, RuleRegistry};
use crate::rule::KeyRule;
use crate::schema::default_rules;

/// Which metadata editors are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnableFlags {
    pub variables: bool,
    pub local_variables: bool,
    pub functions: bool,
    pub function_parameters: bool,
    /// Macro tunnel nodes.
    pub tunnels: bool,
    pub custom_events: bool,
    pub structs: bool,
}

impl Default for EnableFlags {
    fn default() -> Self {
        Self {
            variables: true,
            local_variables: true,
            functions: true,
            function_parameters: true,
            tunnels: true,
            custom_events: true,
            structs: true,
        }
    }
}

/// Graph nodes that carry whole-function metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FunctionNode {
    #[default]
    Function,
    /// Macro tunnel entry or exit.
    Tunnel,
    CustomEvent,
}

impl FunctionNode {
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionNode::Function => "function",
            FunctionNode::Tunnel => "tunnel",
            FunctionNode::CustomEvent => "custom event",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub sort_alphabetically: bool,
    pub enable: EnableFlags,
    /// Show the raw key/value editor next to the typed one. A per-user
    /// display setting for the host UI; key listings ignore it.
    pub raw_editor: bool,
    /// Types declared on top of the engine defaults.
    pub types: TypeTree,
    pub keys: Vec<KeyRule>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sort_alphabetically: true,
            enable: EnableFlags::default(),
            raw_editor: false,
            types: TypeTree::new(),
            keys: default_rules(),
        }
    }
}

/// A configuration problem that does not prevent building a registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigIssue {
    pub key: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl EditorConfig {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Engine defaults with the configured types layered on top.
    pub fn type_tree(&self) -> TypeTree {
        let mut tree = TypeTree::engine_defaults();
        tree.extend(&self.types);
        tree
    }

    pub fn build_registry(&self) -> Result<RuleRegistry> {
        RuleRegistry::build(
            self.keys.clone(),
            RegistryOptions {
                sort_alphabetically: self.sort_alphabetically,
            },
        )
    }

    pub fn role_enabled(&self, role: FieldRole) -> bool {
        match role {
            FieldRole::Variable => self.enable.variables,
            FieldRole::LocalVariable => self.enable.local_variables,
            FieldRole::Parameter => self.enable.function_parameters,
            FieldRole::StructMember => self.enable.structs,
        }
    }

    pub fn function_node_enabled(&self, node: FunctionNode) -> bool {
        match node {
            FunctionNode::Function => self.enable.functions,
            FunctionNode::Tunnel => self.enable.tunnels,
            FunctionNode::CustomEvent => self.enable.custom_events,
        }
    }

    /// Reports inheritance cycles, references to undeclared keys or types,
    /// and rules that can never be offered.
    pub fn check(&self) -> Vec<ConfigIssue> {
        let types = self.type_tree();
        let mut issues = Vec::new();
        let mut report = |key: &str, message: String| {
            issues.push(ConfigIssue {
                key: key.to_string(),
                message,
            })
        };

        for ty in types.cycles() {
            report(ty.path(), "inherits from itself".to_string());
        }

        let declared = |name: &str| self.keys.iter().any(|rule| rule.key == name);

        for rule in &self.keys {
            if let Some(required) = &rule.required_key
                && !declared(required)
            {
                report(&rule.key, format!("requires undeclared key `{}`", required));
            }
            for incompatible in &rule.incompatible_keys {
                if !declared(incompatible) {
                    report(
                        &rule.key,
                        format!("is incompatible with undeclared key `{}`", incompatible),
                    );
                }
            }
            for host in &rule.supported_hosts {
                if !types.is_known(host) {
                    report(&rule.key, format!("supports unknown host `{}`", host));
                }
            }
            for desc in &rule.supported_types {
                let referenced = desc
                    .referenced_type()
                    .into_iter()
                    .chain(desc.value_type().and_then(|value| value.referenced_type()));
                for ty in referenced {
                    if !types.is_known(ty) {
                        report(
                            &rule.key,
                            format!("type `{}` refers to unknown `{}`", desc, ty),
                        );
                    }
                }
            }
            if !rule.is_reachable() {
                report(&rule.key, "is never offered".to_string());
            }
        }
        issues
    }
}
