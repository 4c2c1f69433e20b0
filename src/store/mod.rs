//! File management module for Cubby.
//!
//! This module provides the file lifecycle core:
//! - Active store for live files
//! - Trash store for soft-deleted files with stamped names
//! - Name sanitization and the stamped-name codec
//! - The service orchestrating deletes, restores and purges
//! - The background sweep purging expired trash entries

mod active;
mod name;
mod service;
mod sweeper;
mod trash;

pub use active::ActiveStore;
pub use name::{sanitize_file_name, StampedName, STAMP_SEPARATOR};
pub use service::{now_ms, FileService};
pub use sweeper::{TrashSweeper, DEFAULT_SWEEP_INTERVAL_SECS};
pub use trash::TrashStore;

/// Maximum length for a file name (in characters).
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Retention window for trashed files (30 days, in milliseconds).
pub const RETENTION_WINDOW_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Default maximum upload size (10MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;
