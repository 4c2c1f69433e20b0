//! Trash handlers for the Cubby API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::DateTime;
use std::sync::Arc;
use utoipa;

use crate::store::StampedName;
use crate::web::dto::{ApiResponse, FileRestoredResponse, TrashEntryResponse, TrashListQuery};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Build the listing entry for a stamped trash name.
///
/// Entries with an unparseable stamp keep their raw name but carry no
/// decoded fields.
fn to_entry_response(stamped: String) -> TrashEntryResponse {
    let decoded = StampedName::parse(&stamped);

    let (original, deleted_at) = match decoded {
        Some(d) => (
            Some(d.original),
            DateTime::from_timestamp_millis(d.deleted_at_ms).map(|dt| dt.to_rfc3339()),
        ),
        None => (None, None),
    };

    TrashEntryResponse {
        name: stamped,
        original,
        deleted_at,
    }
}

/// GET /api/trash - List trash entries.
#[utoipa::path(
    get,
    path = "/trash",
    tag = "trash",
    params(TrashListQuery),
    responses(
        (status = 200, description = "List of trash entries", body = Vec<TrashEntryResponse>)
    )
)]
pub async fn list_trash(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrashListQuery>,
) -> Result<Json<ApiResponse<Vec<TrashEntryResponse>>>, ApiError> {
    let names = state.service.list_trash(query.within_window).map_err(|e| {
        tracing::error!("Failed to list trash: {}", e);
        ApiError::internal("Failed to list trash")
    })?;

    let entries = names.into_iter().map(to_entry_response).collect();

    Ok(Json(ApiResponse::new(entries)))
}

/// POST /api/trash/:name/restore - Restore a file from trash.
#[utoipa::path(
    post,
    path = "/trash/{name}/restore",
    tag = "trash",
    params(
        ("name" = String, Path, description = "Stamped trash name")
    ),
    responses(
        (status = 200, description = "File restored", body = FileRestoredResponse),
        (status = 400, description = "Invalid stamped name"),
        (status = 404, description = "Trash entry not found"),
        (status = 409, description = "A file with the original name already exists")
    )
)]
pub async fn restore_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<FileRestoredResponse>>, ApiError> {
    let restored_as = state.service.restore(&name)?;

    Ok(Json(ApiResponse::new(FileRestoredResponse { restored_as })))
}
