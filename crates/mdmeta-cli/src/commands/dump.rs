use std::path::PathBuf;

use mdmeta_lib::Colors;
use mdmeta_lib::dump::dump;

use super::config_loader::{build_registry_or_exit, load_config_or_exit};

pub struct DumpArgs {
    pub config: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let config = load_config_or_exit(args.config.as_deref());
    let registry = build_registry_or_exit(&config);

    let colors = Colors::new(args.color);
    print!("{}", dump(&registry, colors));
}
