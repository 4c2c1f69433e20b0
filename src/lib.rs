//! Cubby - a small HTTP file manager.
//!
//! Live files sit in an active directory; deleting moves them into a
//! trash directory under a timestamp-stamped name, from which they can be
//! restored until a background sweep purges entries older than the
//! retention window.

pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod web;

pub use config::Config;
pub use error::{CubbyError, Result};
pub use store::{
    sanitize_file_name, ActiveStore, FileService, StampedName, TrashStore, TrashSweeper,
    RETENTION_WINDOW_MS,
};
pub use web::WebServer;
