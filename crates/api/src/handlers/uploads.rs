//! Handlers for per-owner image uploads and public file serving.
//!
//! The upload API lives under `/api/v1/uploads/{owner_key}/files`; the
//! public `/uploads/{owner_key}/{filename}` route serves both uploaded
//! images and the published `game.html` artifact.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/uploads/{owner_key}/files
///
/// List the owner's uploaded PNG files.
pub async fn list_files(
    State(state): State<AppState>,
    Path(owner_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let files = state.uploads.list(&owner_key).await?;
    Ok(Json(DataResponse { data: files }))
}

/// POST /api/v1/uploads/{owner_key}/files
///
/// Accepts a multipart form with a required `file` field. Constraints
/// (PNG only, 5 MB, 5 files per owner) are enforced by the upload store.
pub async fn upload_file(
    State(state): State<AppState>,
    Path(owner_key): Path<String>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.png").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let file = state.uploads.put(&owner_key, &filename, &data).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: file })))
}

/// DELETE /api/v1/uploads/{owner_key}/files/{file_id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path((owner_key, file_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let deleted = state.uploads.delete(&owner_key, &file_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("PNG file '{file_id}' not found")))
    }
}

/// GET /uploads/{owner_key}/{filename} (root level, not under /api/v1)
///
/// Serve a file from the owner's directory: the published game page as
/// `text/html`, uploaded images as `image/png`.
pub async fn serve_file(
    State(state): State<AppState>,
    Path((owner_key, filename)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let path = state.publisher.resolve_file(&owner_key, &filename)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("File '{filename}' not found")))
        }
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
