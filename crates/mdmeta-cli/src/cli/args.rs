//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Field shape in shape notation (positional).
pub fn shape_arg() -> Arg {
    Arg::new("shape")
        .value_name("SHAPE")
        .help("Field shape, e.g. `int`, `array<struct(GameplayTag)>`")
}

/// Editor config file (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Editor config (built-in schema if not specified)")
}

/// Editor config file (positional, required).
pub fn config_path_arg() -> Arg {
    Arg::new("config_path")
        .value_name("CONFIG")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Editor config file")
}

/// Field role (--role).
pub fn role_arg() -> Arg {
    Arg::new("role")
        .short('r')
        .long("role")
        .value_name("ROLE")
        .default_value("variable")
        .value_parser(["variable", "local", "param", "member"])
        .help("Where the field is declared")
}

/// Host Blueprint type (--host).
pub fn host_arg() -> Arg {
    Arg::new("host")
        .long("host")
        .value_name("TYPE")
        .help("Blueprint type owning the field [default: Blueprint]")
}

/// Metadata already on the field (--with K=V, repeatable).
pub fn with_arg() -> Arg {
    Arg::new("with")
        .short('w')
        .long("with")
        .value_name("KEY=VALUE")
        .action(ArgAction::Append)
        .value_parser(parse_key_value)
        .help("Metadata already set on the field")
}

/// List function rules (--function).
pub fn function_arg() -> Arg {
    Arg::new("function")
        .long("function")
        .value_name("NODE")
        .num_args(0..=1)
        .require_equals(true)
        .default_missing_value("function")
        .value_parser(["function", "tunnel", "event"])
        .conflicts_with_all(["shape", "struct"])
        .help("List rules offered on whole functions, tunnels or custom events")
}

/// List struct rules (--struct).
pub fn struct_arg() -> Arg {
    Arg::new("struct")
        .long("struct")
        .action(ArgAction::SetTrue)
        .conflicts_with("shape")
        .help("List rules offered on whole structs")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v debug, -vv trace), accepted by every subcommand.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log config and registry activity to stderr")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// `KEY=VALUE`; a bare `KEY` sets an empty value, as flags are stored.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s.split_once('=').unwrap_or((s, ""));
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}
