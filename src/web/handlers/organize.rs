//! Organize handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::{ApiResponse, CategoryResponse, OrganizeResponse};
use crate::web::error::ApiError;

/// POST /api/organize - Sort every upload into its category folder.
///
/// Files that fail to move are listed in the response; the rest are still
/// organized.
pub async fn organize_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<OrganizeResponse>>, ApiError> {
    let report = state.storage.organize_all()?;
    Ok(Json(ApiResponse::new(OrganizeResponse::from(report))))
}

/// GET /api/organized - List category folders and their files.
pub async fn list_organized(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, ApiError> {
    let categories = state.storage.list_organized().map_err(|e| {
        tracing::error!("Failed to list organized files: {}", e);
        ApiError::internal("Failed to list organized files")
    })?;

    Ok(Json(ApiResponse::new(
        categories.into_iter().map(CategoryResponse::from).collect(),
    )))
}
