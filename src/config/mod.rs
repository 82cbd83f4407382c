//! Configuration management for the Glimpse client

pub mod file;

use crate::Result;

/// Default analysis service endpoint (the local development service)
const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";

/// Default camera capture width
const DEFAULT_WIDTH: u32 = 1280;

/// Default camera capture height
const DEFAULT_HEIGHT: u32 = 720;

/// Glimpse client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Analysis service endpoint URL
    pub endpoint: String,

    /// Camera configuration
    pub camera: CameraConfig,
}

/// Camera device configuration
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Camera device index (0 = default device)
    pub index: u32,

    /// Requested capture width in pixels
    pub width: u32,

    /// Requested capture height in pixels
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            camera: CameraConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the config file, environment, and defaults
    ///
    /// Precedence: environment variables > config file > built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns error if an environment override is present but malformed.
    pub fn load() -> Result<Self> {
        Self::load_with_endpoint(None)
    }

    /// Load configuration with an explicit endpoint override (e.g. from the CLI)
    ///
    /// # Errors
    ///
    /// Returns error if an environment override is present but malformed.
    pub fn load_with_endpoint(endpoint: Option<&str>) -> Result<Self> {
        let file = file::load_config_file();

        let endpoint = endpoint
            .map(ToString::to_string)
            .or_else(|| std::env::var("GLIMPSE_ENDPOINT").ok())
            .or(file.service.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let camera = CameraConfig {
            index: env_u32("GLIMPSE_CAMERA_INDEX")?
                .or(file.camera.index)
                .unwrap_or(0),
            width: env_u32("GLIMPSE_CAMERA_WIDTH")?
                .or(file.camera.width)
                .unwrap_or(DEFAULT_WIDTH),
            height: env_u32("GLIMPSE_CAMERA_HEIGHT")?
                .or(file.camera.height)
                .unwrap_or(DEFAULT_HEIGHT),
        };

        if camera.width == 0 || camera.height == 0 {
            return Err(crate::Error::Config(
                "camera resolution must be nonzero".to_string(),
            ));
        }

        tracing::debug!(
            endpoint = %endpoint,
            camera_index = camera.index,
            width = camera.width,
            height = camera.height,
            "configuration resolved"
        );

        Ok(Self { endpoint, camera })
    }
}

/// Read an optional `u32` environment variable
fn env_u32(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| crate::Error::Config(format!("{name} must be an integer: {value:?}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.camera.width, 1280);
        assert_eq!(config.camera.height, 720);
        assert_eq!(config.camera.index, 0);
    }

    #[test]
    fn cli_endpoint_wins() {
        let config = Config::load_with_endpoint(Some("http://example.test/analyze")).unwrap();
        assert_eq!(config.endpoint, "http://example.test/analyze");
    }
}
