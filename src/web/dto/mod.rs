//! DTOs for the Cubby API.

pub mod request;
pub mod response;

pub use request::{CreateFileRequest, TrashListQuery, UpdateFileRequest};
pub use response::{
    ApiResponse, FileDeletedResponse, FileRestoredResponse, FileWrittenResponse,
    TrashEntryResponse,
};
