use choropleth::{ColorRamp, Interpolation, RampError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::export::WireContract;
use super::resolution::ResolutionTable;
use crate::error::ConfigError;

/// Environment variable naming the configuration file
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Environment variable overriding `service.base_url`
pub const SERVICE_URL_ENV: &str = "STATMAP_SERVICE_URL";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "statmap.yaml";

/// Application configuration loaded from statmap.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Remote video rendering service
    #[serde(default)]
    pub service: ServiceConfig,

    /// Resolution tier table for video exports
    #[serde(default)]
    pub resolutions: ResolutionTable,

    /// Choropleth styling
    #[serde(default)]
    pub choropleth: ChoroplethConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Base URL of the video service; `/api/video` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (video rendering is slow)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Request body field naming
    #[serde(default)]
    pub contract: WireContract,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    300
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            contract: WireContract::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChoroplethConfig {
    /// Ramp stops from lowest to highest bucket
    #[serde(default = "default_ramp")]
    pub ramp: Vec<String>,

    /// Prefix joined to a feature natcode to find its region data
    #[serde(default = "default_region_prefix")]
    pub region_prefix: String,

    /// "srgb" or "oklab"
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
}

fn default_ramp() -> Vec<String> {
    ["#FFFFFF", "#FFFF00", "#FFA500", "#FF0000", "#8B0000"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_region_prefix() -> String {
    "KU".to_string()
}

fn default_interpolation() -> String {
    "srgb".to_string()
}

impl Default for ChoroplethConfig {
    fn default() -> Self {
        Self {
            ramp: default_ramp(),
            region_prefix: default_region_prefix(),
            interpolation: default_interpolation(),
        }
    }
}

impl ChoroplethConfig {
    pub fn color_ramp(&self) -> Result<ColorRamp, RampError> {
        let interpolation: Interpolation = self.interpolation.parse()?;
        Ok(ColorRamp::from_hex(&self.ramp)?.with_interpolation(interpolation))
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        // Fail early on a ramp that cannot be used
        config.choropleth.color_ramp()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from `path`, falling back to defaults.
    ///
    /// A missing or unreadable file is not fatal: the problem is logged and
    /// the defaults are used.
    pub fn load(path: &Path) -> (Self, ConfigSource) {
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    service = %config.service.base_url,
                    "Loaded configuration"
                );
                (config, ConfigSource::File(path.to_path_buf()))
            }
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                (Self::default(), ConfigSource::Defaults)
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to load config, using defaults");
                (Self::default(), ConfigSource::Defaults)
            }
        }
    }

    /// Load from `CONFIG_FILE` (or `statmap.yaml`) and apply env overrides.
    pub fn from_env() -> (Self, ConfigSource) {
        let path = std::env::var(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let (mut config, source) = Self::load(&path);
        config.apply_overrides(std::env::var(SERVICE_URL_ENV).ok());
        (config, source)
    }

    /// Apply a service URL override (from `STATMAP_SERVICE_URL`).
    pub fn apply_overrides(&mut self, service_url: Option<String>) {
        if let Some(url) = service_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!(url = %url, "Service URL overridden from environment");
            self.service.base_url = url.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resolution::{Dimensions, ResolutionTier};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.service.base_url, "http://localhost:5000");
        assert_eq!(config.service.timeout_secs, 300);
        assert_eq!(config.service.contract, WireContract::V1);
        assert_eq!(config.resolutions, ResolutionTable::PORTRAIT);
        assert_eq!(config.choropleth.region_prefix, "KU");
        assert_eq!(config.choropleth.ramp.len(), 5);
        assert!(config.choropleth.color_ramp().is_ok());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
service:
  base_url: "https://video.example.org"
  timeout_secs: 60
  contract: legacy
resolutions:
  full_hd: { width: 1920, height: 1080 }
  4k: { width: 3840, height: 2160 }
choropleth:
  ramp: ["#FFFFFF", "#FF0000"]
  region_prefix: "MK"
  interpolation: oklab
"##;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.service.base_url, "https://video.example.org");
        assert_eq!(config.service.timeout_secs, 60);
        assert_eq!(config.service.contract, WireContract::Legacy);
        assert_eq!(
            config.resolutions.resolve(ResolutionTier::FullHd),
            Dimensions::new(1920, 1080)
        );
        assert_eq!(
            config.resolutions.resolve(ResolutionTier::TwoK),
            Dimensions::new(1440, 2560)
        );
        assert_eq!(
            config.resolutions.resolve(ResolutionTier::FourK),
            Dimensions::new(3840, 2160)
        );
        assert_eq!(config.choropleth.region_prefix, "MK");
        assert_eq!(
            config.choropleth.color_ramp().unwrap().interpolation(),
            Interpolation::Oklab
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_yaml_str("service:\n  timeout_secs: 10\n").unwrap();
        assert_eq!(config.service.base_url, "http://localhost:5000");
        assert_eq!(config.service.timeout_secs, 10);
        assert_eq!(config.choropleth.interpolation, "srgb");
    }

    #[test]
    fn test_invalid_ramp_is_rejected() {
        let err = AppConfig::from_yaml_str("choropleth:\n  ramp: [\"#FFFFFF\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Ramp(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let (config, source) = AppConfig::load(Path::new("/nonexistent/statmap.yaml"));
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.service.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service:\n  base_url: http://render:8080").unwrap();

        let (config, source) = AppConfig::load(file.path());
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
        assert_eq!(config.service.base_url, "http://render:8080");
    }

    #[test]
    fn test_load_invalid_yaml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service: [not, a, map").unwrap();

        let (config, source) = AppConfig::load(file.path());
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.service.timeout_secs, 300);
    }

    #[test]
    fn test_service_url_override() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("  ".to_string()));
        assert_eq!(config.service.base_url, "http://localhost:5000");

        config.apply_overrides(Some("http://renderer.internal:9000".to_string()));
        assert_eq!(config.service.base_url, "http://renderer.internal:9000");
    }
}
