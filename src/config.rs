//! Configuration module for Cubby.

use serde::Deserialize;
use std::path::Path;

use crate::{CubbyError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve static files.
    #[serde(default)]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_path() -> String {
    "public".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            serve_static: false,
            static_path: default_static_path(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the active files directory.
    #[serde(default = "default_files_path")]
    pub files_path: String,
    /// Path to the trash directory.
    #[serde(default = "default_trash_path")]
    pub trash_path: String,
}

fn default_files_path() -> String {
    "data/files".to_string()
}

fn default_trash_path() -> String {
    "data/trash".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            files_path: default_files_path(),
            trash_path: default_trash_path(),
        }
    }
}

/// Upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
    /// Allowed MIME types for uploads.
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

fn default_max_upload_size() -> u64 {
    10
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "text/plain".to_string(),
        "application/json".to_string(),
        "application/pdf".to_string(),
        "image/png".to_string(),
        "image/jpeg".to_string(),
    ]
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_size_mb: default_max_upload_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

/// Trash sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Whether the background sweep is enabled.
    #[serde(default = "default_sweep_enabled")]
    pub enabled: bool,
    /// Sweep interval in seconds.
    #[serde(default = "default_sweep_interval")]
    pub interval_secs: u64,
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    24 * 60 * 60 // 24 hours
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_sweep_enabled(),
            interval_secs: default_sweep_interval(),
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
    "logs/cubby.log".to_string()
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
    pub storage: StorageConfig,
    /// Upload configuration.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Trash sweep configuration.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CubbyError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CubbyError::Validation(format!("config parse error: {e}")))
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The active and trash directories are the same path
    /// - The sweep is enabled with a zero interval
    /// - The upload size cap is zero
    pub fn validate(&self) -> Result<()> {
        if self.storage.files_path == self.storage.trash_path {
            return Err(CubbyError::Validation(
                "storage.files_path and storage.trash_path must be different directories"
                    .to_string(),
            ));
        }

        if self.sweep.enabled && self.sweep.interval_secs == 0 {
            return Err(CubbyError::Validation(
                "sweep.interval_secs must be greater than zero".to_string(),
            ));
        }

        if self.upload.max_upload_size_mb == 0 {
            return Err(CubbyError::Validation(
                "upload.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Maximum upload size in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.upload.max_upload_size_mb * 1024 * 1024
    }
}
