//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use mdmeta_lib::{FieldRole, FunctionNode};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::keys::{KeysArgs, KeysTarget};

pub struct KeysParams {
    pub shape: Option<String>,
    pub role: FieldRole,
    pub host: Option<String>,
    pub with: Vec<(String, String)>,
    pub function: Option<FunctionNode>,
    pub structure: bool,
    pub config: Option<PathBuf>,
    pub color: ColorChoice,
}

impl KeysParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            shape: m.get_one::<String>("shape").cloned(),
            role: parse_role(m),
            host: m.get_one::<String>("host").cloned(),
            with: m
                .get_many::<(String, String)>("with")
                .map(|pairs| pairs.cloned().collect())
                .unwrap_or_default(),
            function: parse_function_node(m),
            structure: m.get_flag("struct"),
            config: m.get_one::<PathBuf>("config").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<KeysParams> for KeysArgs {
    fn from(p: KeysParams) -> Self {
        // clap requires a shape unless --function or --struct is given.
        let target = if let Some(node) = p.function {
            KeysTarget::Function(node)
        } else if p.structure {
            KeysTarget::Struct
        } else {
            KeysTarget::Field {
                shape: p.shape.unwrap_or_default(),
                role: p.role,
            }
        };

        Self {
            target,
            host: p.host,
            with: p.with,
            config: p.config,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub config: Option<PathBuf>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            config: m.get_one::<PathBuf>("config").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            config: p.config,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub config_path: PathBuf,
    pub strict: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            config_path: m
                .get_one::<PathBuf>("config_path")
                .cloned()
                .unwrap_or_default(),
            strict: m.get_flag("strict"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            config_path: p.config_path,
            strict: p.strict,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_role(m: &ArgMatches) -> FieldRole {
    match m.get_one::<String>("role").map(|s| s.as_str()) {
        Some("local") => FieldRole::LocalVariable,
        Some("param") => FieldRole::Parameter,
        Some("member") => FieldRole::StructMember,
        _ => FieldRole::Variable,
    }
}

fn parse_function_node(m: &ArgMatches) -> Option<FunctionNode> {
    match m.get_one::<String>("function").map(|s| s.as_str())? {
        "tunnel" => Some(FunctionNode::Tunnel),
        "event" => Some(FunctionNode::CustomEvent),
        _ => Some(FunctionNode::Function),
    }
}
