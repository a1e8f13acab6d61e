mod cli;
mod commands;
mod telemetry;

use cli::{CheckParams, DumpParams, KeysParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = telemetry::init_logging(matches.get_count("verbose")) {
        eprintln!("warning: {}", e);
    }

    match matches.subcommand() {
        Some(("keys", m)) => {
            let params = KeysParams::from_matches(m);
            commands::keys::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("defaults", _)) => commands::defaults::run(),
        _ => unreachable!("clap should have caught this"),
    }
}
