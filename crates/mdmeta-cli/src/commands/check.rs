use std::path::PathBuf;

use super::config_loader::{build_registry_or_exit, load_config_or_exit};

pub struct CheckArgs {
    pub config_path: PathBuf,
    pub strict: bool,
}

pub fn run(args: CheckArgs) {
    let config = load_config_or_exit(Some(args.config_path.as_path()));
    build_registry_or_exit(&config);

    let issues = config.check();
    for issue in &issues {
        eprintln!("warning: {}", issue);
    }

    if args.strict && !issues.is_empty() {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
