//! File handlers for the Cubby API.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;
use utoipa;
use validator::Validate;

use crate::web::dto::{ApiResponse, CreateFileRequest, FileDeletedResponse, FileWrittenResponse, UpdateFileRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Generate a safe Content-Disposition header value for file downloads.
///
/// This function sanitizes the filename to prevent header injection attacks
/// and uses RFC 5987 encoding for non-ASCII filenames.
///
/// # Security
///
/// The function:
/// - Removes control characters (including CR, LF which could cause header injection)
/// - Escapes double quotes and backslashes
/// - Uses RFC 5987 filename* parameter for proper Unicode support
fn content_disposition_header(filename: &str) -> String {
    // Sanitize filename for the basic filename parameter (ASCII fallback)
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control()) // Remove control characters (CR, LF, etc.)
        .map(|c| match c {
            '"' => '_',  // Replace double quotes
            '\\' => '_', // Replace backslashes
            _ => c,
        })
        .collect();

    // For ASCII-only filenames, use simple format
    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    // Use RFC 5987 encoding for non-ASCII or special characters
    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// POST /api/files - Create a new file.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body = CreateFileRequest,
    responses(
        (status = 200, description = "File created", body = FileWrittenResponse),
        (status = 400, description = "Invalid file name"),
        (status = 409, description = "File already exists"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateFileRequest>,
) -> Result<Json<ApiResponse<FileWrittenResponse>>, ApiError> {
    request
        .validate()
        .map_err(ApiError::from_validation_errors)?;

    let filename = state
        .service
        .create(&request.filename, request.content.as_bytes())?;

    Ok(Json(ApiResponse::new(FileWrittenResponse {
        filename,
        size: request.content.len() as u64,
    })))
}

/// GET /api/files - List active files.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "Sorted list of active file names", body = Vec<String>)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let names = state.service.list_active().map_err(|e| {
        tracing::error!("Failed to list files: {}", e);
        ApiError::internal("Failed to list files")
    })?;

    Ok(Json(ApiResponse::new(names)))
}

/// GET /api/files/:name - Read a file.
#[utoipa::path(
    get,
    path = "/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn read_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let content = state.service.read(&name)?;

    // Determine content type from the name
    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition_header(&name))
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// PUT /api/files/:name - Update file content.
#[utoipa::path(
    put,
    path = "/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "File name")
    ),
    request_body = UpdateFileRequest,
    responses(
        (status = 200, description = "File updated", body = FileWrittenResponse),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(request): Json<UpdateFileRequest>,
) -> Result<Json<ApiResponse<FileWrittenResponse>>, ApiError> {
    let filename = state.service.update(&name, request.content.as_bytes())?;

    Ok(Json(ApiResponse::new(FileWrittenResponse {
        filename,
        size: request.content.len() as u64,
    })))
}

/// POST /api/files/upload - Upload a file.
///
/// Request body: multipart/form-data with a "file" field. The upload is
/// rejected when it exceeds the configured size cap or its MIME type is
/// not on the allow-list.
#[utoipa::path(
    post,
    path = "/files/upload",
    tag = "files",
    responses(
        (status = 200, description = "File uploaded", body = FileWrittenResponse),
        (status = 400, description = "Invalid multipart data or file too large"),
        (status = 409, description = "File already exists"),
        (status = 422, description = "File type not allowed")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileWrittenResponse>>, ApiError> {
    let mut filename: Option<String> = None;
    let mut declared_type: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name.as_str() == "file" {
            filename = field.file_name().map(|s| s.to_string());
            declared_type = field.content_type().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to read file content: {}", e);
                        ApiError::bad_request("Failed to read file")
                    })?
                    .to_vec(),
            );
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file content"))?;

    // Check file size
    if content.len() as u64 > state.max_upload_size {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return Err(ApiError::bad_request(format!(
            "File too large (max {}MB)",
            max_mb
        )));
    }

    // Check MIME type against the allow-list; fall back to a guess from
    // the filename when the client didn't declare one.
    let content_type = declared_type.unwrap_or_else(|| {
        mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string()
    });

    if !state.allowed_types.iter().any(|t| t == &content_type) {
        return Err(ApiError::unprocessable(format!(
            "File type {} is not allowed",
            content_type
        )));
    }

    let size = content.len() as u64;
    let filename = state.service.create(&filename, &content)?;

    Ok(Json(ApiResponse::new(FileWrittenResponse {
        filename,
        size,
    })))
}

/// DELETE /api/files/:name - Move a file to trash.
#[utoipa::path(
    delete,
    path = "/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "File name")
    ),
    responses(
        (status = 200, description = "File moved to trash", body = FileDeletedResponse),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<FileDeletedResponse>>, ApiError> {
    let trashed_as = state.service.delete(&name)?;

    Ok(Json(ApiResponse::new(FileDeletedResponse { trashed_as })))
}
