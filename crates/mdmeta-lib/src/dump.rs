//! Human-readable registry dump.
//!
//! ```text
//! ClampMin: integer [Value Range]
//!   types: int, int64
//!   hosts: Blueprint
//!   scope: variable local param
//!   range: -2147483648..=2147483647 slider 0..=100
//! ```

use std::fmt::{self, Write as _};

use mdmeta_core::{Colors, Style};
use mdmeta_core::utils::sanitize_float;

use crate::registry::RuleRegistry;
use crate::rule::KeyRule;

/// Renders every rule in registry order.
pub fn dump(registry: &RuleRegistry, colors: Colors) -> String {
    let mut out = String::new();
    for rule in registry.rules() {
        // Writing into a `String` cannot fail.
        let _ = dump_rule(&mut out, rule, colors);
    }
    out
}

pub fn dump_rule(out: &mut impl fmt::Write, rule: &KeyRule, colors: Colors) -> fmt::Result {
    let c = colors;

    write!(
        out,
        "{}: {}",
        c.paint(Style::Key, &rule.key),
        c.paint(Style::Kind, rule.kind)
    )?;
    if !rule.category.is_empty() {
        write!(out, " {}", c.paint(Style::Category, format_args!("[{}]", rule.category)))?;
    }
    if let Some(name) = &rule.display_name {
        write!(out, " {:?}", name)?;
    }
    writeln!(out)?;

    if !rule.supported_types.is_empty() {
        let types: Vec<String> = rule.supported_types.iter().map(|t| t.to_string()).collect();
        line(out, c, "types", types.join(", "))?;
    }

    let hosts: Vec<&str> = rule.supported_hosts.iter().map(|h| h.short_name()).collect();
    line(out, c, "hosts", hosts.join(", "))?;

    let scope = &rule.scope;
    let mut flags = Vec::new();
    for (enabled, name) in [
        (scope.variables, "variable"),
        (scope.local_variables, "local"),
        (scope.parameters, "param"),
        (scope.functions, "function"),
        (scope.structs, "struct"),
    ] {
        if enabled {
            flags.push(name);
        }
    }
    line(out, c, "scope", c.paint(Style::Scope, flags.join(" ")))?;

    if let Some(required) = &rule.required_key {
        line(out, c, "requires", c.paint(Style::Dependency, required))?;
    }
    if !rule.incompatible_keys.is_empty() {
        let keys: Vec<&str> = rule.incompatible_keys.iter().map(String::as_str).collect();
        line(out, c, "excludes", c.paint(Style::Dependency, keys.join(", ")))?;
    }

    if let Some(range) = rule.int_range() {
        let mut text = format!("{}..={}", range.min, range.max);
        if let Some((lo, hi)) = range.slider {
            let _ = write!(text, " slider {}..={}", lo, hi);
        }
        line(out, c, "range", text)?;
    }
    if let Some(range) = rule.float_range() {
        let mut text = format!("{}..={}", sanitize_float(range.min), sanitize_float(range.max));
        if let Some((lo, hi)) = range.slider {
            let _ = write!(text, " slider {}..={}", sanitize_float(lo), sanitize_float(hi));
        }
        line(out, c, "range", text)?;
    }
    if let Some(options) = rule.value_options() {
        line(out, c, "values", options.join(", "))?;
    }
    Ok(())
}

fn line(out: &mut impl fmt::Write, c: Colors, label: &str, text: impl fmt::Display) -> fmt::Result {
    writeln!(out, "  {} {}", c.paint(Style::Label, format_args!("{}:", label)), text)
}
