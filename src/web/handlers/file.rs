//! File handlers for the web API.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{ApiResponse, FileResponse, MessageResponse, UploadResponse};
use crate::web::error::{too_large_message, ApiError};
use crate::web::handlers::AppState;

/// Build a Content-Disposition value that forces a download.
///
/// Control characters are dropped and quotes/backslashes replaced in the
/// plain `filename` parameter. Names that needed that treatment, or that are
/// not ASCII, also get an RFC 5987 `filename*` parameter with the exact name.
fn content_disposition_header(filename: &str) -> String {
    let needs_encoding = !filename.is_ascii()
        || filename
            .chars()
            .any(|c| c.is_control() || c == '"' || c == '\\');

    if !needs_encoding {
        return format!("attachment; filename=\"{filename}\"");
    }

    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '"' || c == '\\' { '_' } else { c })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

/// GET /api/files - List uploaded files.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, ApiError> {
    let files = state.storage.list_uploads().map_err(|e| {
        tracing::error!("Failed to list files: {}", e);
        ApiError::internal("Failed to list files")
    })?;

    Ok(Json(ApiResponse::new(
        files.into_iter().map(FileResponse::from).collect(),
    )))
}

/// POST /api/files - Upload a file.
///
/// Request body: multipart/form-data with a "file" field. Other fields are
/// ignored.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_multipart(e, state.max_upload_size))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::from_multipart(e, state.max_upload_size))?;
        upload = Some((filename, content.to_vec()));
    }

    let (filename, content) = upload.ok_or_else(|| ApiError::bad_request("No file part"))?;
    if filename.trim().is_empty() {
        return Err(ApiError::bad_request("No file selected"));
    }

    if content.len() as u64 > state.max_upload_size {
        return Err(ApiError::payload_too_large(too_large_message(
            state.max_upload_size,
        )));
    }

    let stored = state.storage.save_upload(&filename, &content)?;
    let message = format!("File \"{}\" uploaded successfully!", stored.name);

    Ok(Json(ApiResponse::new(UploadResponse {
        file: FileResponse::from(stored),
        message,
    })))
}

/// GET /api/files/:filename/download - Download an uploaded file.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let content = state.storage.load(&filename)?;

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&filename),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// DELETE /api/files/:filename - Delete an uploaded file.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.storage.delete(&filename)?;

    Ok(Json(ApiResponse::new(MessageResponse {
        message: format!("File \"{filename}\" deleted."),
    })))
}
