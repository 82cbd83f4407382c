//! TOML configuration file loading
//!
//! Supports `~/.config/omni/glimpse/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct GlimpseConfigFile {
    /// Analysis service configuration
    #[serde(default)]
    pub service: ServiceFileConfig,

    /// Camera configuration
    #[serde(default)]
    pub camera: CameraFileConfig,
}

/// Analysis service configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServiceFileConfig {
    /// Analysis endpoint URL (e.g. "http://localhost:8000/analyze")
    pub endpoint: Option<String>,
}

/// Camera configuration
#[derive(Debug, Default, Deserialize)]
pub struct CameraFileConfig {
    /// Camera device index (0 = default device)
    pub index: Option<u32>,

    /// Requested capture width in pixels
    pub width: Option<u32>,

    /// Requested capture height in pixels
    pub height: Option<u32>,
}

/// Load the TOML config file from the standard path
///
/// Returns `GlimpseConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> GlimpseConfigFile {
    let Some(path) = config_file_path() else {
        return GlimpseConfigFile::default();
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return GlimpseConfigFile::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read config file");
            return GlimpseConfigFile::default();
        }
    };

    match toml::from_str(&content) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config file, using defaults"
            );
            GlimpseConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/omni/glimpse/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| {
        d.config_dir()
            .join("omni")
            .join("glimpse")
            .join("config.toml")
    })
}
