//! The configured set of key rules.
//!
//! A registry is built once from configuration and then only read. It answers
//! which rules are type-eligible for a field, function or struct; whether a
//! rule should currently be shown also depends on the target's metadata (see
//! [`KeyRule::is_available`]).

use indexmap::IndexSet;

use mdmeta_core::{FieldType, MetadataMap, TypeHierarchy, TypeRef, well_known};

use crate::rule::{KeyRule, ValueKind};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Stable-sort rules by key at build time.
    pub sort_alphabetically: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            sort_alphabetically: true,
        }
    }
}

/// What kind of field rules are being enumerated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Variable,
    LocalVariable,
    Parameter,
    /// Member of a user-defined struct. Checked as a variable of a plain
    /// Blueprint, without a scope flag.
    StructMember,
}

impl FieldRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldRole::Variable => "variable",
            FieldRole::LocalVariable => "local",
            FieldRole::Parameter => "param",
            FieldRole::StructMember => "member",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<KeyRule>,
}

impl RuleRegistry {
    /// Validates and normalizes `rules`.
    ///
    /// Every supported type is fixed up. Rules sharing a key and kind are
    /// kept; they are offered independently.
    pub fn build(rules: Vec<KeyRule>, options: RegistryOptions) -> Result<Self> {
        let mut rules = rules;
        for rule in &mut rules {
            validate(rule)?;
            rule.supported_types = std::mem::take(&mut rule.supported_types)
                .into_iter()
                .map(|ty| ty.fixed_up())
                .collect();
        }

        if options.sort_alphabetically {
            rules.sort_by(|a, b| a.key.cmp(&b.key));
        }

        tracing::debug!(
            rules = rules.len(),
            sorted = options.sort_alphabetically,
            "built rule registry"
        );
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[KeyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule declaring `key`, of any kind.
    pub fn get(&self, key: &str) -> Option<&KeyRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    pub fn find(&self, key: &str, kind: ValueKind) -> Option<&KeyRule> {
        self.rules
            .iter()
            .find(|rule| rule.key == key && rule.kind == kind)
    }

    pub fn rules_named<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a KeyRule> + 'a {
        self.rules.iter().filter(move |rule| rule.key == key)
    }

    /// Distinct key names in registry order, for required/incompatible
    /// pickers.
    pub fn key_names(&self) -> IndexSet<&str> {
        self.rules.iter().map(|rule| rule.key.as_str()).collect()
    }

    /// Visits every rule whose host, field shape and scope accept `field`.
    pub fn for_each_field_rule<'a, H: TypeHierarchy + ?Sized>(
        &'a self,
        host: &TypeRef,
        field: &FieldType,
        role: FieldRole,
        types: &H,
        mut visit: impl FnMut(&'a KeyRule),
    ) {
        let blueprint = well_known::BLUEPRINT;
        let host = match role {
            FieldRole::StructMember => &blueprint,
            _ => host,
        };

        for rule in &self.rules {
            if !rule.scope.allows(role) || !rule.supports_host(host, types) {
                continue;
            }
            if rule.supports_field(field, types) {
                visit(rule);
            }
        }
    }

    pub fn field_rules<H: TypeHierarchy + ?Sized>(
        &self,
        host: &TypeRef,
        field: &FieldType,
        role: FieldRole,
        types: &H,
    ) -> Vec<&KeyRule> {
        let mut rules = Vec::new();
        self.for_each_field_rule(host, field, role, types, |rule| rules.push(rule));
        rules
    }

    /// Field rules that are also available given the field's current
    /// metadata.
    pub fn available_field_rules<H, M>(
        &self,
        host: &TypeRef,
        field: &FieldType,
        role: FieldRole,
        types: &H,
        metadata: &M,
    ) -> Vec<&KeyRule>
    where
        H: TypeHierarchy + ?Sized,
        M: MetadataMap + ?Sized,
    {
        let mut rules = Vec::new();
        self.for_each_field_rule(host, field, role, types, |rule| {
            if rule.is_available(metadata) {
                rules.push(rule);
            }
        });
        rules
    }

    /// Visits every rule usable on whole functions of `host`.
    pub fn for_each_function_rule<'a, H: TypeHierarchy + ?Sized>(
        &'a self,
        host: &TypeRef,
        types: &H,
        visit: impl FnMut(&'a KeyRule),
    ) {
        self.rules
            .iter()
            .filter(|rule| rule.scope.functions && rule.supports_host(host, types))
            .for_each(visit);
    }

    pub fn function_rules<H: TypeHierarchy + ?Sized>(
        &self,
        host: &TypeRef,
        types: &H,
    ) -> Vec<&KeyRule> {
        let mut rules = Vec::new();
        self.for_each_function_rule(host, types, |rule| rules.push(rule));
        rules
    }

    /// Visits every rule usable on whole structs.
    pub fn for_each_struct_rule<'a>(&'a self, visit: impl FnMut(&'a KeyRule)) {
        self.rules
            .iter()
            .filter(|rule| rule.scope.structs)
            .for_each(visit);
    }

    pub fn struct_rules(&self) -> Vec<&KeyRule> {
        let mut rules = Vec::new();
        self.for_each_struct_rule(|rule| rules.push(rule));
        rules
    }
}

fn validate(rule: &KeyRule) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidRule {
        key: rule.key.clone(),
        reason: reason.to_string(),
    };

    if rule.key.trim().is_empty() {
        return Err(invalid("key is empty"));
    }
    if let Some(range) = rule.int_range()
        && range.min > range.max
    {
        return Err(invalid("min_int is greater than max_int"));
    }
    if let Some(range) = rule.float_range()
        && !(range.min <= range.max)
    {
        return Err(invalid("min_float is greater than max_float"));
    }
    Ok(())
}
