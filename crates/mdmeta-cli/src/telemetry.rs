//! Diagnostic logging for the CLI.
//!
//! The library crates emit `tracing` events when configs load, registries
//! build and field metadata is restored. `-v` raises the level for every
//! mdmeta crate at once; a set `RUST_LOG` replaces that filter entirely.
//! Events go to stderr so they never mix with listings on stdout.

use tracing_subscriber::EnvFilter;

/// Log targets of the workspace crates.
const TARGETS: [&str; 3] = ["mdmeta", "mdmeta_lib", "mdmeta_core"];

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid RUST_LOG filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install logger: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

fn level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Filter directives for `-v` repeated `verbose` times.
pub fn directives(verbose: u8) -> String {
    let level = level(verbose);
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn filter(verbose: u8) -> Result<EnvFilter, LoggingError> {
    let directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(env) if !env.trim().is_empty() => env,
        _ => directives(verbose),
    };
    Ok(EnvFilter::try_new(directives)?)
}

pub fn init_logging(verbose: u8) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose)?)
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .without_time()
        .try_init()
        .map_err(LoggingError::Install)
}
