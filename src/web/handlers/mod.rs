//! API handlers for the Cubby HTTP gateway.

pub mod file;
pub mod trash;

pub use file::*;
pub use trash::*;

use std::sync::Arc;

use crate::config::UploadConfig;
use crate::store::{FileService, DEFAULT_MAX_UPLOAD_SIZE};

/// Shared application state for the API handlers.
pub struct AppState {
    /// The file service behind the gateway.
    pub service: Arc<FileService>,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
    /// Allowed MIME types for multipart uploads.
    pub allowed_types: Vec<String>,
}

impl AppState {
    /// Create a new AppState with default upload limits.
    pub fn new(service: Arc<FileService>) -> Self {
        Self {
            service,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            allowed_types: UploadConfig::default().allowed_types,
        }
    }

    /// Set the upload limits from configuration.
    pub fn with_upload_config(mut self, config: &UploadConfig) -> Self {
        self.max_upload_size = config.max_upload_size_mb * 1024 * 1024;
        self.allowed_types = config.allowed_types.clone();
        self
    }
}
