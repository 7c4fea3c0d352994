//! Configuration module for Sortbox.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, SortboxError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Directory holding fresh uploads.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Directory holding the category folders.
    #[serde(default = "default_organized_dir")]
    pub organized_dir: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_bytes: u64,
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_organized_dir() -> String {
    "organized".to_string()
}

fn default_max_upload_size() -> u64 {
    crate::file::DEFAULT_MAX_UPLOAD_SIZE
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            organized_dir: default_organized_dir(),
            max_upload_size_bytes: default_max_upload_size(),
        }
    }
}

/// Web UI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Whether to serve static files.
    #[serde(default)]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_static_path() -> String {
    "web/dist".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            serve_static: false,
            static_path: default_static_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/sortbox.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// File storage configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Web UI configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SortboxError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SortboxError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SORTBOX_UPLOAD_DIR`: Override the upload directory
    /// - `SORTBOX_ORGANIZED_DIR`: Override the organized directory
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("SORTBOX_UPLOAD_DIR") {
            if !dir.is_empty() {
                self.files.upload_dir = dir;
            }
        }
        if let Ok(dir) = std::env::var("SORTBOX_ORGANIZED_DIR") {
            if !dir.is_empty() {
                self.files.organized_dir = dir;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the upload size cap is zero
    /// - either directory is empty
    /// - the upload and organized directories are the same
    pub fn validate(&self) -> Result<()> {
        if self.files.max_upload_size_bytes == 0 {
            return Err(SortboxError::Config(
                "max_upload_size_bytes must be greater than zero".to_string(),
            ));
        }
        if self.files.upload_dir.trim().is_empty() || self.files.organized_dir.trim().is_empty() {
            return Err(SortboxError::Config(
                "upload_dir and organized_dir must not be empty".to_string(),
            ));
        }
        if Path::new(&self.files.upload_dir) == Path::new(&self.files.organized_dir) {
            return Err(SortboxError::Config(
                "upload_dir and organized_dir must be different directories".to_string(),
            ));
        }
        Ok(())
    }
}
