use std::fmt::Write as _;
use std::path::PathBuf;

use mdmeta_core::{Colors, Metadata, ShapeParseError, Style, parse_field_type, well_known};
use mdmeta_lib::{EditorConfig, FieldRole, FunctionNode, KeyRule};

use super::config_loader::load_config_or_exit;

pub enum KeysTarget {
    Field { shape: String, role: FieldRole },
    Function(FunctionNode),
    Struct,
}

pub struct KeysArgs {
    pub target: KeysTarget,
    pub host: Option<String>,
    pub with: Vec<(String, String)>,
    pub config: Option<PathBuf>,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum KeysError {
    #[error("unknown host type `{0}`")]
    UnknownHost(String),

    #[error("the {0} editor is disabled by this config")]
    Disabled(&'static str),

    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeParseError),

    #[error(transparent)]
    Registry(#[from] mdmeta_lib::Error),
}

pub fn run(args: KeysArgs) {
    let config = load_config_or_exit(args.config.as_deref());

    match list_keys(&config, &args) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// One line per offered key, in registry order.
pub fn list_keys(config: &EditorConfig, args: &KeysArgs) -> Result<String, KeysError> {
    let types = config.type_tree();
    let registry = config.build_registry()?;

    let host = match &args.host {
        Some(name) => types
            .lookup(name)
            .cloned()
            .ok_or_else(|| KeysError::UnknownHost(name.clone()))?,
        None => well_known::BLUEPRINT,
    };

    let rules = match &args.target {
        KeysTarget::Function(node) => {
            if !config.function_node_enabled(*node) {
                return Err(KeysError::Disabled(node.as_str()));
            }
            registry.function_rules(&host, &types)
        }
        KeysTarget::Struct => {
            if !config.enable.structs {
                return Err(KeysError::Disabled("struct"));
            }
            registry.struct_rules()
        }
        KeysTarget::Field { shape, role } => {
            if !config.role_enabled(*role) {
                return Err(KeysError::Disabled(role.as_str()));
            }
            let field = parse_field_type(shape, |name| types.lookup(name).cloned())?;
            let metadata: Metadata = args.with.iter().cloned().collect();
            tracing::debug!(%field, role = role.as_str(), host = %host, "listing field keys");
            registry.available_field_rules(&host, &field, *role, &types, &metadata)
        }
    };

    Ok(render(&rules, Colors::new(args.color)))
}

fn render(rules: &[&KeyRule], colors: Colors) -> String {
    let c = colors;
    let mut out = String::new();
    for rule in rules {
        let _ = writeln!(
            out,
            "{}: {}  {}",
            c.paint(Style::Key, &rule.key),
            c.paint(Style::Kind, rule.kind),
            c.paint(Style::Label, format_args!("# {}", rule.display_text()))
        );
    }
    out
}
