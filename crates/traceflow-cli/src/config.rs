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

use traceflow::{
    TraceflowError,
    config::{AppConfig, ThemeConfig},
    theme::ColorScheme,
};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TraceflowError {
    fn from(err: ConfigError) -> Self {
        TraceflowError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (traceflow/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TraceflowError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("traceflow/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "traceflow", "traceflow") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Applies `--theme` and `--mode` on top of the loaded configuration.
pub fn with_overrides(config: AppConfig, theme: Option<&str>, mode: Option<ColorScheme>) -> AppConfig {
    if theme.is_none() && mode.is_none() {
        return config;
    }

    let name = theme
        .map(str::to_string)
        .or_else(|| config.theme().name().map(str::to_string));
    let mode = mode.or(config.theme().mode());
    debug!(theme:? = name, mode:? = mode; "Applying command-line theme overrides");
    AppConfig::new(ThemeConfig::new(name, mode), config.layout().clone())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, TraceflowError> {
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
    use std::fs;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [theme]
            name = "blueprint"
            mode = "dark"

            [layout]
            node_spacing = 30.0
            "#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.theme().name(), Some("blueprint"));
        assert_eq!(config.theme().mode(), Some(ColorScheme::Dark));
        assert_eq!(config.layout().node_spacing(), 30.0);
        assert_eq!(config.layout().node_width(), 180.0);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(TraceflowError::Config(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[theme\nname = 1").unwrap();
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(TraceflowError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::new(
            ThemeConfig::new(Some("corporate".to_string()), Some(ColorScheme::Light)),
            Default::default(),
        );

        let config = with_overrides(config, None, Some(ColorScheme::Dark));
        assert_eq!(config.theme().name(), Some("corporate"));
        assert_eq!(config.theme().mode(), Some(ColorScheme::Dark));

        let config = with_overrides(config, Some("vibrant"), None);
        assert_eq!(config.theme().name(), Some("vibrant"));
        assert_eq!(config.theme().mode(), Some(ColorScheme::Dark));
    }
}
