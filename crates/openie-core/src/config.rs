//! OpenIE Configuration Management
//!
//! Handles configuration from environment variables, config files,
//! and command-line arguments with sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Extraction engine configuration
    pub engine: EngineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("OPENIE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("OPENIE_PORT") {
            config.server.port = parse_var("OPENIE_PORT", port)?;
        }
        if let Ok(timeout) = std::env::var("OPENIE_REQUEST_TIMEOUT") {
            config.server.request_timeout_secs = parse_var("OPENIE_REQUEST_TIMEOUT", timeout)?;
        }

        // Engine
        if let Ok(backend) = std::env::var("OPENIE_ENGINE") {
            config.engine.backend = backend.parse()?;
        }
        if let Ok(url) = std::env::var("OPENIE_REMOTE_URL") {
            config.engine.remote_url = url;
        }
        if let Ok(threshold) = std::env::var("OPENIE_MIN_CONFIDENCE") {
            config.engine.min_confidence = parse_var("OPENIE_MIN_CONFIDENCE", threshold)?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = std::env::var("LOG_JSON") {
            config.logging.json_format = parse_var("LOG_JSON", json)?;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError { path, message },
            other => other,
        })
    }

    /// Parse from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;

        // Only override if env values differ from defaults
        if env_config.server.host != ServerConfig::default().host {
            self.server.host = env_config.server.host;
        }
        if env_config.server.port != ServerConfig::default().port {
            self.server.port = env_config.server.port;
        }
        if env_config.server.request_timeout_secs != ServerConfig::default().request_timeout_secs {
            self.server.request_timeout_secs = env_config.server.request_timeout_secs;
        }

        let engine_defaults = EngineConfig::default();
        if env_config.engine.backend != engine_defaults.backend {
            self.engine.backend = env_config.engine.backend;
        }
        if env_config.engine.remote_url != engine_defaults.remote_url {
            self.engine.remote_url = env_config.engine.remote_url;
        }
        if env_config.engine.min_confidence != engine_defaults.min_confidence {
            self.engine.min_confidence = env_config.engine.min_confidence;
        }

        if env_config.logging.level != LoggingConfig::default().level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        Ok(self)
    }

    /// Reject combinations that cannot produce a working server
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.backend == EngineBackend::Remote && self.engine.remote_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("engine.remote_url".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// `host:port` listen address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Local access only unless configured otherwise
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 300,
        }
    }
}

/// Extraction engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backend to use
    pub backend: EngineBackend,

    /// Endpoint of a remote extraction service
    pub remote_url: String,

    /// Remote request timeout in seconds
    pub timeout_secs: u64,

    /// Extractions scoring below this are dropped
    pub min_confidence: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: EngineBackend::Pattern,
            remote_url: "http://localhost:8000/extract".to_string(),
            timeout_secs: 60,
            min_confidence: 0.0,
        }
    }
}

/// Supported extraction backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineBackend {
    Pattern,
    Remote,
}

impl std::str::FromStr for EngineBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pattern" => Ok(Self::Pattern),
            "remote" => Ok(Self::Remote),
            _ => Err(ConfigError::InvalidValue {
                key: "OPENIE_ENGINE".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EngineBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern => write!(f, "pattern"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
