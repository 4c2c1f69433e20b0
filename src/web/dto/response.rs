//! Response DTOs for the Cubby API.

use serde::Serialize;
use utoipa::ToSchema;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Response for a created or updated file.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileWrittenResponse {
    /// Sanitized file name the content was written under.
    pub filename: String,
    /// Size of the written content in bytes.
    pub size: u64,
}

/// Response for a soft-deleted file.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileDeletedResponse {
    /// Name the file now carries in the trash store.
    pub trashed_as: String,
}

/// Response for a restored file.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileRestoredResponse {
    /// Name the file was restored under in the active store.
    pub restored_as: String,
}

/// A single trash entry in a listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrashEntryResponse {
    /// The stamped trash name.
    pub name: String,
    /// Decoded original file name, when the stamp parses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Deletion time as RFC3339, when the stamp parses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}
