//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! The backend base URL and API key are the two values the whole service
//! depends on; [`Config::validate`] checks them once at startup so their
//! absence is reported as a configuration error, not a request failure.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics backend configuration
///
/// Points at the external REST backend that owns all data and aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without the `/rest/v1` suffix
    #[serde(default)]
    pub base_url: String,

    /// API key sent as both `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Socket address string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("adpulse").join("config.toml")),
            Some(PathBuf::from("/etc/adpulse/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check that the values every page depends on are present.
    ///
    /// Called once at startup; pages never re-check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBackendUrl);
        }
        if self.backend.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Backend overrides
        if let Ok(url) = std::env::var("ADPULSE_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(key) = std::env::var("ADPULSE_BACKEND_API_KEY") {
            self.backend.api_key = key;
        }
        if let Ok(timeout) = std::env::var("ADPULSE_BACKEND_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.backend.request_timeout_ms = t;
            }
        }

        // Server overrides
        if let Ok(host) = std::env::var("ADPULSE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ADPULSE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("ADPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ADPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Backend base URL is not configured (set ADPULSE_BACKEND_URL or [backend].base_url)")]
    MissingBackendUrl,

    #[error("Backend API key is not configured (set ADPULSE_BACKEND_API_KEY or [backend].api_key)")]
    MissingApiKey,
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# AdPulse Configuration
#
# Environment variables override these settings:
# - ADPULSE_BACKEND_URL
# - ADPULSE_BACKEND_API_KEY
# - ADPULSE_BACKEND_TIMEOUT_MS
# - ADPULSE_HOST
# - ADPULSE_PORT
# - ADPULSE_LOG_LEVEL
# - ADPULSE_LOG_FORMAT

[backend]
# Base URL of the analytics backend (no /rest/v1 suffix)
base_url = ""

# API key, sent as both the apikey header and the bearer token
api_key = ""

# Per-request timeout (ms)
request_timeout_ms = 10000

[server]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8090

# Allowed CORS origins (empty = permissive)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.backend.request_timeout_ms, 10_000);
        assert!(config.backend.base_url.is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingBackendUrl)
        ));

        config.backend.base_url = "https://example.supabase.co".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));

        config.backend.api_key = "anon-key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[backend]
base_url = "https://db.example.com"
api_key = "secret"

[server]
port = 9000
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.base_url, "https://db.example.com");
        assert_eq!(config.backend.api_key, "secret");
        assert_eq!(config.server.port, 9000);
        // Untouched section keeps defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8090);
    }
}
