//! Configuration management for the area-check server.
//!
//! Configuration is loaded from three sources, later ones overriding
//! earlier ones:
//! 1. Default values (hardcoded)
//! 2. Configuration file (YAML)
//! 3. Environment variables
//!
//! Environment variables take precedence over config file values, which
//! take precedence over defaults, following the 12-factor app pattern.
//!
//! # Example
//!
//! ```ignore
//! use areacheck_server::config::ServerConfig;
//!
//! // Load from file with env overrides
//! let config = ServerConfig::load("config.yaml")?;
//!
//! // Or load from environment only
//! let config = ServerConfig::from_env()?;
//! ```

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use areacheck_domain::scale::{DEFAULT_SCALE_TOLERANCE, DEFAULT_SCALE_VALUES};
use areacheck_domain::ScaleTable;

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Legal scale set settings
    #[serde(default)]
    pub scales: ScaleSettings,
}

/// Server network settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format (true for production, false for development)
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Legal scale set settings feeding the quantizer table.
///
/// These can be overridden via environment variables with the `AREACHECK_`
/// prefix and `__` as the nested key separator, e.g.
/// `AREACHECK_SCALES__TOLERANCE=0.1`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScaleSettings {
    /// Legal scale values, in snap order.
    #[serde(default = "default_scale_values")]
    pub values: Vec<f64>,

    /// Half-width of each acceptance window.
    #[serde(default = "default_scale_tolerance")]
    pub tolerance: f64,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            values: default_scale_values(),
            tolerance: default_scale_tolerance(),
        }
    }
}

fn default_scale_values() -> Vec<f64> {
    DEFAULT_SCALE_VALUES.to_vec()
}

fn default_scale_tolerance() -> f64 {
    DEFAULT_SCALE_TOLERANCE
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable
    /// overrides.
    ///
    /// Environment variables are prefixed with `AREACHECK_` and use `__` as
    /// separator. For example:
    /// - `AREACHECK_SERVER__PORT=9090` overrides `server.port`
    /// - `AREACHECK_LOGGING__LEVEL=debug` overrides `logging.level`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let config = Config::builder()
            .add_source(Config::try_from(&ServerConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(
                Environment::with_prefix("AREACHECK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let server_config: ServerConfig = config.try_deserialize()?;
        server_config.validate()?;

        Ok(server_config)
    }

    /// Load configuration from environment variables only.
    ///
    /// Uses default values and allows overrides via `AREACHECK_`-prefixed
    /// env vars.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Config::try_from(&ServerConfig::default())?)
            .add_source(
                Environment::with_prefix("AREACHECK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let server_config: ServerConfig = config.try_deserialize()?;
        server_config.validate()?;

        Ok(server_config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.server.port == 0 {
            return Err(ConfigLoadError::Invalid {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "logging.level must be one of: {:?}, got: {}",
                    valid_levels, self.logging.level
                ),
            });
        }

        // Building the table applies the same bounds the quantizer relies on
        // (non-empty, finite, nonzero values; finite tolerance).
        self.scale_table()?;

        Ok(())
    }

    /// Builds the quantizer table from the `scales` section.
    pub fn scale_table(&self) -> Result<ScaleTable, ConfigLoadError> {
        ScaleTable::new(&self.scales.values, self.scales.tolerance).map_err(|e| {
            ConfigLoadError::Invalid {
                message: format!("scales: {e}"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Test: Can load config from YAML file
    #[test]
    #[serial]
    fn test_can_load_config_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9090
  request_timeout_secs: 60

logging:
  level: debug
  json: true

scales:
  values: [1.0, 2.0]
  tolerance: 0.1
"#
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.request_timeout_secs, 60);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.scales.values, vec![1.0, 2.0]);
        assert_eq!(config.scales.tolerance, 0.1);
    }

    /// Test: Can override config with env vars
    #[test]
    #[serial]
    fn test_can_override_config_with_env_vars() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 8080
"#
        )
        .unwrap();

        std::env::set_var("AREACHECK_SERVER__PORT", "9999");
        std::env::set_var("AREACHECK_LOGGING__LEVEL", "warn");

        let config = ServerConfig::load(file.path()).unwrap();

        std::env::remove_var("AREACHECK_SERVER__PORT");
        std::env::remove_var("AREACHECK_LOGGING__LEVEL");

        assert_eq!(config.server.port, 9999); // Overridden by env
        assert_eq!(config.server.host, "127.0.0.1"); // From file
        assert_eq!(config.logging.level, "warn"); // Overridden by env
    }

    /// Test: Config validation catches errors
    #[test]
    fn test_config_validation_catches_errors() {
        // Invalid log level
        let mut config = ServerConfig::default();
        config.logging.level = "invalid".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));

        // Port zero
        let mut config = ServerConfig::default();
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));

        // Empty scale set
        let mut config = ServerConfig::default();
        config.scales.values = vec![];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scales"));

        // Zero is not a legal scale value
        let mut config = ServerConfig::default();
        config.scales.values = vec![1.0, 0.0];
        assert!(config.validate().is_err());

        // Non-finite tolerance
        let mut config = ServerConfig::default();
        config.scales.tolerance = f64::NAN;
        assert!(config.validate().is_err());
    }

    /// Test: Invalid config file returns clear error
    #[test]
    fn test_invalid_config_returns_clear_error() {
        let result = ServerConfig::load("/nonexistent/path/config.yaml");
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigLoadError::FileNotFound { .. }));
        assert!(err.to_string().contains("not found"));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid: yaml: syntax: [").unwrap();

        let result = ServerConfig::load(file.path());
        assert!(matches!(result, Err(ConfigLoadError::Load(_))));
    }

    /// Test: Default config is valid and carries the default scale set
    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.scales.values, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(config.scales.tolerance, 0.20);

        let table = config.scale_table().unwrap();
        assert_eq!(table.steps().len(), 5);
    }

    /// Test: from_env loads defaults with env overrides
    #[test]
    #[serial]
    fn test_from_env_loads_defaults_with_env_overrides() {
        std::env::set_var("AREACHECK_SERVER__HOST", "192.168.1.1");

        let config = ServerConfig::from_env().unwrap();

        std::env::remove_var("AREACHECK_SERVER__HOST");

        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 8080); // default
    }
}
