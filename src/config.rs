//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::project::MapSettings;
use crate::source::SourceLocation;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub map: MapSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data document location
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// File path or `http(s)://` URL of the data document
    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_location() -> String {
    "./data/dashboard-metrics.json".to_string()
}

fn default_timeout() -> u64 {
    10_000
}

impl SourceConfig {
    pub fn location(&self) -> SourceLocation {
        SourceLocation::parse(&self.location)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            timeout_ms: default_timeout(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
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
    pub fn from_env() -> LoadedConfig {
        let mut config = Config::default();
        let notices = config.apply_env_overrides();
        LoadedConfig { config, notices }
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::load(path)?;
        let mut notices = vec![ConfigNotice::Loaded(path.to_path_buf())];
        notices.extend(config.apply_env_overrides());
        Ok(LoadedConfig { config, notices })
    }

    /// Load from default locations or environment
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("community-dashboard").join("config.toml")),
            Some(PathBuf::from("./dashboard.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, |key| std::env::var(key).ok())
    }

    /// Load the first readable file of `paths`, then apply overrides
    fn load_first(paths: &[PathBuf], lookup: impl Fn(&str) -> Option<String>) -> LoadedConfig {
        let mut notices = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(mut config) => {
                    notices.push(ConfigNotice::Loaded(path.clone()));
                    notices.extend(config.apply_overrides(&lookup));
                    return LoadedConfig { config, notices };
                }
                Err(e) => notices.push(ConfigNotice::Failed {
                    path: path.clone(),
                    error: e.to_string(),
                }),
            }
        }

        notices.push(ConfigNotice::DefaultsOnly);
        let mut config = Config::default();
        notices.extend(config.apply_overrides(&lookup));
        LoadedConfig { config, notices }
    }

    fn apply_env_overrides(&mut self) -> Vec<ConfigNotice> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigNotice> {
        let mut notices = Vec::new();

        if let Some(location) = lookup("DASHBOARD_SOURCE") {
            self.source.location = location;
        }

        if let Some(host) = lookup("DASHBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("DASHBOARD_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => notices.push(ConfigNotice::InvalidOverride {
                    key: "DASHBOARD_API_PORT",
                    value: port,
                }),
            }
        }

        if let Some(level) = lookup("DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        notices
    }
}

/// A configuration together with what happened while loading it
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub notices: Vec<ConfigNotice>,
}

/// Something worth logging about how the configuration was loaded.
///
/// Loading runs before the log subscriber exists (the subscriber is built
/// from the loaded `[logging]` section), so these are kept and logged
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNotice {
    Loaded(PathBuf),
    Failed { path: PathBuf, error: String },
    InvalidOverride { key: &'static str, value: String },
    DefaultsOnly,
}

impl ConfigNotice {
    pub fn log(&self) {
        match self {
            ConfigNotice::Loaded(path) => tracing::info!("Loaded config from {:?}", path),
            ConfigNotice::Failed { path, error } => {
                tracing::warn!("Failed to load config from {:?}: {}", path, error)
            }
            ConfigNotice::InvalidOverride { key, value } => {
                tracing::warn!("Ignoring invalid {}: {}", key, value)
            }
            ConfigNotice::DefaultsOnly => {
                tracing::info!("Using default config with environment overrides")
            }
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Community Dashboard Configuration
#
# Environment variables override these settings:
# - DASHBOARD_SOURCE
# - DASHBOARD_API_HOST
# - DASHBOARD_API_PORT
# - DASHBOARD_LOG_LEVEL
# - DASHBOARD_LOG_FORMAT

[source]
# Data document: a file path or an http(s) URL
location = "./data/dashboard-metrics.json"

# Fetch timeout (ms)
timeout_ms = 10000

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

[map]
# Initial view
center = [33.5, -86.5]
zoom = 6
min_zoom = 5
max_zoom = 10
scroll_wheel_zoom = false

# Tile layer
tile_url = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
subdomains = "abcd"

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
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.source.location, defaults.source.location);
        assert_eq!(config.source.timeout_ms, defaults.source.timeout_ms);
        assert_eq!(config.api.port, defaults.api.port);
        assert_eq!(config.api.cors_origins, defaults.api.cors_origins);
        assert_eq!(config.map, defaults.map);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = 9000\n\n[map]\nzoom = 7").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.map.zoom, 7);
        assert_eq!(config.map.center, [33.5, -86.5]);
        assert_eq!(config.source.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::load(Path::new("/nonexistent/dashboard.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("DASHBOARD_SOURCE", "https://example.test/metrics.json"),
            ("DASHBOARD_API_PORT", "not-a-port"),
            ("DASHBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        let notices = config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(
            notices,
            vec![ConfigNotice::InvalidOverride {
                key: "DASHBOARD_API_PORT",
                value: "not-a-port".to_string(),
            }]
        );
        assert!(matches!(config.source.location(), SourceLocation::Url(_)));
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_broken_file_is_reported_and_skipped() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[api\nport = ").unwrap();
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "[api]\nport = 9100").unwrap();

        let paths = vec![
            PathBuf::from("/nonexistent/dashboard.toml"),
            broken.path().to_path_buf(),
            good.path().to_path_buf(),
        ];
        let loaded = Config::load_first(&paths, |key| {
            (key == "DASHBOARD_API_PORT").then(|| "99999".to_string())
        });

        assert_eq!(loaded.config.api.port, 9100);
        assert_eq!(loaded.notices.len(), 3);
        assert!(matches!(
            &loaded.notices[0],
            ConfigNotice::Failed { path, .. } if path == broken.path()
        ));
        assert_eq!(loaded.notices[1], ConfigNotice::Loaded(good.path().to_path_buf()));
        assert!(matches!(
            loaded.notices[2],
            ConfigNotice::InvalidOverride { key: "DASHBOARD_API_PORT", .. }
        ));
    }

    #[test]
    fn test_no_file_falls_back_to_defaults() {
        let loaded = Config::load_first(&[PathBuf::from("/nonexistent/dashboard.toml")], |_| None);
        assert_eq!(loaded.notices, vec![ConfigNotice::DefaultsOnly]);
        assert_eq!(loaded.config.api.port, 8090);
    }
}
