//! Request DTOs for the Cubby API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// File creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFileRequest {
    /// File name.
    #[validate(length(min = 1, max = 100, message = "filename must be 1-100 characters"))]
    pub filename: String,
    /// File content.
    pub content: String,
}

/// File update request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFileRequest {
    /// New file content.
    pub content: String,
}

/// Query parameters for the trash listing.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrashListQuery {
    /// Only return entries still inside the retention window.
    #[serde(default)]
    pub within_window: bool,
}
