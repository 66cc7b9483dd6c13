//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::storage::RootErrorPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which directory trees to scan
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanConfig {
    /// Root directories, scanned in this order
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// What to do when a root is missing or unreadable
    #[serde(default)]
    pub on_root_error: RootErrorPolicy,
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

    #[serde(default = "default_true")]
    pub enable_export: bool,

    #[serde(default = "default_true")]
    pub enable_rescan: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            enable_export: true,
            enable_rescan: true,
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
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
            dirs::config_dir().map(|p| p.join("ftv").join("config.toml")),
            Some(PathBuf::from("/etc/ftv/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // FTV_ROOTS uses the platform path-list separator (':' or ';')
        if let Some(roots) = std::env::var_os("FTV_ROOTS") {
            let roots: Vec<PathBuf> = std::env::split_paths(&roots)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !roots.is_empty() {
                self.scan.roots = roots;
            }
        }
        if let Ok(policy) = std::env::var("FTV_ON_ROOT_ERROR") {
            match policy.to_lowercase().as_str() {
                "abort" => self.scan.on_root_error = RootErrorPolicy::Abort,
                "skip" => self.scan.on_root_error = RootErrorPolicy::Skip,
                other => tracing::warn!("Ignoring FTV_ON_ROOT_ERROR={}", other),
            }
        }

        if let Ok(host) = std::env::var("FTV_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("FTV_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(level) = std::env::var("FTV_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FTV_LOG_FORMAT") {
            self.logging.format = format;
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
    r#"# FTV Configuration
#
# Environment variables override these settings:
# - FTV_ROOTS (path list, ':' separated on Unix, ';' on Windows)
# - FTV_ON_ROOT_ERROR
# - FTV_API_HOST
# - FTV_API_PORT
# - FTV_LOG_LEVEL
# - FTV_LOG_FORMAT

[scan]
# Directory trees to collect file timestamps from, scanned in order.
# Every file below each root is recorded; there is no depth limit.
roots = ["/cases/extract/Data", "/cases/extract/System"]

# What to do when a root is missing or unreadable:
# "abort" (refuse to start) or "skip" (log it and scan the rest)
on_root_error = "abort"

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8050

# Allowed CORS origins (empty = permissive)
cors_origins = []

# Enable the full export endpoint
enable_export = true

# Enable POST /api/v1/rescan
enable_rescan = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
