//! Router configuration for the web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_file, download_file, list_files, list_organized, organize_files, upload_file, AppState,
};

/// Create the main API router.
///
/// Request bodies larger than the configured upload cap are rejected before
/// any handler runs.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let body_limit = usize::try_from(app_state.max_upload_size).unwrap_or(usize::MAX);

    let file_routes = Router::new()
        .route("/", get(list_files).post(upload_file))
        .route("/:filename", delete(delete_file))
        .route("/:filename/download", get(download_file));

    let api_routes = Router::new()
        .nest("/files", file_routes)
        .route("/organize", post(organize_files))
        .route("/organized", get(list_organized));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving a static web UI from `static_path`.
///
/// Returns `None` when the directory does not exist.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    if !Path::new(static_path).is_dir() {
        tracing::warn!("Static path not found: {}", static_path);
        return None;
    }
    Some(Router::new().fallback_service(ServeDir::new(static_path)))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileStorage;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn test_state(temp_dir: &TempDir) -> Arc<AppState> {
        let storage = FileStorage::new(
            temp_dir.path().join("uploads"),
            temp_dir.path().join("organized"),
        )
        .unwrap();
        Arc::new(AppState::new(storage, 1024))
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_list_files_route() {
        let temp_dir = TempDir::new().unwrap();
        let router = create_router(test_state(&temp_dir));

        let response = router
            .oneshot(Request::builder().uri("/api/files").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let temp_dir = TempDir::new().unwrap();
        let router = create_router(test_state(&temp_dir));

        let response = router
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_create_static_router_missing_dir() {
        assert!(create_static_router("definitely/not/here").is_none());
    }

    #[test]
    fn test_create_static_router_existing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_string_lossy().into_owned();
        assert!(create_static_router(&path).is_some());
    }
}
