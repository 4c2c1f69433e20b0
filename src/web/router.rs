//! Router configuration for the Cubby API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto;
use super::handlers::{
    self, create_file, delete_file, list_files, list_trash, read_file, restore_file, update_file,
    upload_file, AppState,
};
use super::middleware::create_cors_layer;

/// Extra room for multipart framing on top of the configured upload cap.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// OpenAPI document for the Cubby API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::file::create_file,
        handlers::file::list_files,
        handlers::file::read_file,
        handlers::file::update_file,
        handlers::file::upload_file,
        handlers::file::delete_file,
        handlers::trash::list_trash,
        handlers::trash::restore_file,
    ),
    components(schemas(
        dto::CreateFileRequest,
        dto::UpdateFileRequest,
        dto::FileWrittenResponse,
        dto::FileDeletedResponse,
        dto::FileRestoredResponse,
        dto::TrashEntryResponse,
    )),
    tags(
        (name = "files", description = "Active file operations"),
        (name = "trash", description = "Trash listing, restore and purge lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = app_state.max_upload_size as usize + MULTIPART_OVERHEAD;

    let file_routes = Router::new()
        .route("/files", post(create_file).get(list_files))
        .route("/files/upload", post(upload_file))
        .route(
            "/files/:name",
            get(read_file).put(update_file).delete(delete_file),
        );

    let trash_routes = Router::new()
        .route("/trash", get(list_trash))
        .route("/trash/:name/restore", post(restore_file));

    let api_routes = Router::new().merge(file_routes).merge(trash_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router.
pub fn create_swagger_router() -> Router {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

/// Create a static file router serving the given directory.
///
/// Returns `None` when the directory doesn't exist.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let path = Path::new(static_path);

    if !path.is_dir() {
        tracing::warn!(
            "Static path {} does not exist. Static serving disabled.",
            static_path
        );
        return None;
    }

    Some(Router::new().fallback_service(ServeDir::new(path)))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
