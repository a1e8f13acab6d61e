//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("mdmeta")
        .about("Inspect Blueprint metadata key rules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(keys_command())
        .subcommand(dump_command())
        .subcommand(check_command())
        .subcommand(defaults_command())
}

/// List the keys offered on a field, function or struct.
pub fn keys_command() -> Command {
    Command::new("keys")
        .about("List metadata keys offered for a field")
        .override_usage(
            "\
  mdmeta keys <SHAPE> [--role <ROLE>] [--host <TYPE>] [--with <KEY=VALUE>]...
  mdmeta keys --function[=<NODE>] [--host <TYPE>]
  mdmeta keys --struct",
        )
        .after_help(
            r#"EXAMPLES:
  mdmeta keys int                               # member variable on a Blueprint
  mdmeta keys 'real(float)' --role param        # function parameter
  mdmeta keys 'object(Widget)' --host WidgetBlueprint
  mdmeta keys int --with EditCondition=bEnabled # keys gated on existing metadata
  mdmeta keys --function                        # whole-function keys
  mdmeta keys --function=tunnel                 # macro tunnel keys
  mdmeta keys 'struct(Weapon)' -c editor.json   # custom types and keys"#,
        )
        .arg(shape_arg().required_unless_present_any(["function", "struct"]))
        .arg(role_arg())
        .arg(host_arg())
        .arg(with_arg())
        .arg(function_arg())
        .arg(struct_arg())
        .arg(config_arg())
        .arg(color_arg())
}

/// Show every rule of the registry.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the key rule registry")
        .override_usage(
            "\
  mdmeta dump
  mdmeta dump -c <FILE>",
        )
        .arg(config_arg())
        .arg(color_arg())
}

/// Validate an editor config.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate an editor config")
        .after_help(
            r#"EXAMPLES:
  mdmeta check editor.json            # errors fail, warnings are reported
  mdmeta check editor.json --strict   # warnings fail too"#,
        )
        .arg(config_path_arg())
        .arg(strict_arg())
}

/// Print the built-in config.
pub fn defaults_command() -> Command {
    Command::new("defaults").about("Print the built-in editor config as JSON")
}
