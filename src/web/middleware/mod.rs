//! Middleware for the Cubby API.

pub mod cors;

pub use cors::create_cors_layer;
