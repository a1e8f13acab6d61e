use std::fs;
use std::path::{Path, PathBuf};

use mdmeta_lib::{EditorConfig, RuleRegistry};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: mdmeta_lib::Error,
    },
}

/// Loads the config at `path`, or the built-in one when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig, LoadError> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };

    let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = EditorConfig::from_json(&source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), keys = config.keys.len(), "loaded config");
    Ok(config)
}

pub fn load_config_or_exit(path: Option<&Path>) -> EditorConfig {
    load_config(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}

pub fn build_registry_or_exit(config: &EditorConfig) -> RuleRegistry {
    config.build_registry().unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
