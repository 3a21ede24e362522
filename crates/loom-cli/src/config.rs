//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use loom::{LoomError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for LoomError {
    fn from(err: ConfigError) -> Self {
        LoomError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (loom/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, LoomError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("loom/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "loom", "loom") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, LoomError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use loom::semantic::LayoutEngine;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("loom.toml");
        fs::write(
            &path,
            r#"
[analysis]
builtin_modules = ["llm.chat"]

[layout]
engine = "longest_path"
rank_spacing = 200
"#,
        )
        .expect("Failed to write config");

        let config = load_config(Some(&path)).expect("config loads");

        assert_eq!(config.analysis().builtin_modules(), ["llm.chat"]);
        assert_eq!(config.layout().engine(), LayoutEngine::LongestPath);
        assert_eq!(config.layout().rank_spacing(), 200);
        assert_eq!(config.layout().order_spacing(), 140);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).expect_err("missing file");

        assert!(matches!(err, LoomError::Config(msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[layout]\nengine = \"spiral\"\n").expect("Failed to write config");

        let err = load_config(Some(&path)).expect_err("unknown engine");

        assert!(matches!(err, LoomError::Config(msg) if msg.starts_with("Failed to parse TOML")));
    }
}
