//! Web API file tests
//!
//! Integration tests for the active file endpoints.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use cubby::config::UploadConfig;
use cubby::web::handlers::AppState;
use cubby::web::router::create_router;
use cubby::FileService;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test server over stores in a fresh temp directory.
fn create_test_server() -> (TestServer, TempDir, Arc<FileService>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let service = Arc::new(
        FileService::new(
            temp_dir.path().join("files"),
            temp_dir.path().join("trash"),
        )
        .expect("Failed to create file service"),
    );

    let upload_config = UploadConfig {
        max_upload_size_mb: 1,
        allowed_types: vec!["text/plain".to_string(), "application/json".to_string()],
    };
    let app_state = Arc::new(AppState::new(service.clone()).with_upload_config(&upload_config));

    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir, service)
}

/// Create a file through the API and assert success.
async fn create_file(server: &TestServer, filename: &str, content: &str) {
    let response = server
        .post("/api/files")
        .json(&json!({"filename": filename, "content": content}))
        .await;
    response.assert_status_ok();
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_file() {
    let (server, _temp_dir, _service) = create_test_server();

    let response = server
        .post("/api/files")
        .json(&json!({"filename": "notes.txt", "content": "hello"}))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["filename"], "notes.txt");
    assert_eq!(body["data"]["size"], 5);
}

#[tokio::test]
async fn test_create_duplicate_conflict() {
    let (server, _temp_dir, _service) = create_test_server();

    create_file(&server, "dup.txt", "first").await;

    let response = server
        .post("/api/files")
        .json(&json!({"filename": "dup.txt", "content": "second"}))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");

    // First content unchanged
    let read = server.get("/api/files/dup.txt").await;
    read.assert_status_ok();
    assert_eq!(read.text(), "first");
}

#[tokio::test]
async fn test_create_invalid_name() {
    let (server, _temp_dir, _service) = create_test_server();

    let response = server
        .post("/api/files")
        .json(&json!({"filename": "..", "content": "x"}))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_sanitizes_traversal() {
    let (server, _temp_dir, service) = create_test_server();

    let response = server
        .post("/api/files")
        .json(&json!({"filename": "../../etc/passwd", "content": "boom"}))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["filename"], "passwd");

    // Only the bare name exists, inside the managed root.
    assert_eq!(service.list_active().unwrap(), vec!["passwd"]);
}

#[tokio::test]
async fn test_create_filename_too_long() {
    let (server, _temp_dir, _service) = create_test_server();

    let response = server
        .post("/api/files")
        .json(&json!({"filename": "a".repeat(101), "content": "x"}))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["filename"].is_array());
}

// ============================================================================
// Read / list
// ============================================================================

#[tokio::test]
async fn test_read_file() {
    let (server, _temp_dir, _service) = create_test_server();

    create_file(&server, "read.txt", "file content").await;

    let response = server.get("/api/files/read.txt").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "file content");

    let disposition = response.header("content-disposition");
    assert!(disposition.to_str().unwrap().contains("read.txt"));
}

#[tokio::test]
async fn test_read_not_found() {
    let (server, _temp_dir, _service) = create_test_server();

    let response = server.get("/api/files/ghost.txt").await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_files_empty() {
    let (server, _temp_dir, _service) = create_test_server();

    let response = server.get("/api/files").await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_files_sorted() {
    let (server, _temp_dir, _service) = create_test_server();

    create_file(&server, "b.txt", "b").await;
    create_file(&server, "a.txt", "a").await;

    let response = server.get("/api/files").await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"], json!(["a.txt", "b.txt"]));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_file() {
    let (server, _temp_dir, _service) = create_test_server();

    create_file(&server, "notes.txt", "v1").await;

    let response = server
        .put("/api/files/notes.txt")
        .json(&json!({"content": "v2"}))
        .await;

    response.assert_status_ok();

    let read = server.get("/api/files/notes.txt").await;
    assert_eq!(read.text(), "v2");
}

#[tokio::test]
async fn test_update_not_found() {
    let (server, _temp_dir, _service) = create_test_server();

    let response = server
        .put("/api/files/ghost.txt")
        .json(&json!({"content": "x"}))
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_file() {
    let (server, _temp_dir, _service) = create_test_server();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"uploaded bytes".as_slice())
            .file_name("upload.txt")
            .mime_type("text/plain"),
    );

    let response = server.post("/api/files/upload").multipart(form).await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["filename"], "upload.txt");
    assert_eq!(body["data"]["size"], 14);

    let read = server.get("/api/files/upload.txt").await;
    assert_eq!(read.text(), "uploaded bytes");
}

#[tokio::test]
async fn test_upload_too_large() {
    let (server, _temp_dir, _service) = create_test_server();

    // Cap is 1MB in the test config.
    let oversized = vec![0u8; 1024 * 1024 + 1];
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(oversized)
            .file_name("big.txt")
            .mime_type("text/plain"),
    );

    let response = server.post("/api/files/upload").multipart(form).await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_disallowed_type() {
    let (server, _temp_dir, _service) = create_test_server();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"<html></html>".as_slice())
            .file_name("page.html")
            .mime_type("text/html"),
    );

    let response = server.post("/api/files/upload").multipart(form).await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_no_file_field() {
    let (server, _temp_dir, _service) = create_test_server();

    let form = MultipartForm::new().add_text("other", "value");

    let response = server.post("/api/files/upload").multipart(form).await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_file_returns_stamped_name() {
    let (server, _temp_dir, service) = create_test_server();

    create_file(&server, "doomed.txt", "bye").await;

    let response = server.delete("/api/files/doomed.txt").await;

    response.assert_status_ok();

    let body: Value = response.json();
    let trashed_as = body["data"]["trashed_as"].as_str().unwrap();
    assert!(trashed_as.ends_with("_doomed.txt"));

    // Gone from active, present in trash.
    assert!(service.list_active().unwrap().is_empty());
    assert_eq!(service.list_trash(false).unwrap(), vec![trashed_as]);
}

#[tokio::test]
async fn test_delete_not_found() {
    let (server, _temp_dir, _service) = create_test_server();

    let response = server.delete("/api/files/ghost.txt").await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}
