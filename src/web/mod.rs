//! Web API module for Cubby.
//!
//! This module provides the REST gateway over the file service: CRUD on
//! active files, multipart upload, trash listing and restore, plus static
//! asset serving and API docs.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
