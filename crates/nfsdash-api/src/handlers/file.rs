//! File operation handlers.
//!
//! Every handler normalizes the client path first and authorizes the
//! required action against it before touching the service, so denial
//! happens before any business logic runs.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use tokio_util::io::ReaderStream;
use validator::Validate;

use nfsdash_core::error::AppError;
use nfsdash_entity::file::FileEntry;
use nfsdash_entity::role::PermissionAction;
use nfsdash_service::file::{normalize, service::mime_for};

use crate::dto::request::{CreateFolderRequest, DeleteRequest, DownloadQuery, PathQuery, RenameRequest};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files?path=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<Vec<FileEntry>>, AppError> {
    let path = normalize(&query.path)?;
    auth.require(PermissionAction::Read, &path)?;

    let entries = state.file_service.list(&path).await?;
    Ok(Json(entries))
}

/// GET /api/files/info?path=
pub async fn info(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<FileEntry>, AppError> {
    let path = normalize(&query.path)?;
    auth.require(PermissionAction::Read, &path)?;

    let entry = state.file_service.info(&path).await?;
    Ok(Json(entry))
}

/// POST /api/files/folder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<FileEntry>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let path = normalize(&req.path)?;
    auth.require(PermissionAction::Write, &path)?;

    let folder = state.file_service.create_folder(&path, &req.name).await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

/// POST /api/files/upload — multipart form with `path` and `file` parts.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileEntry>), AppError> {
    let mut target_path: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        match field.name().unwrap_or("") {
            "path" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                target_path = Some(text);
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let target_path = target_path.ok_or_else(|| AppError::validation("path is required"))?;
    let file_name = file_name.ok_or_else(|| AppError::validation("file is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;

    let path = normalize(&target_path)?;
    auth.require(PermissionAction::Write, &path)?;

    let settings = state.settings_service.get().await?;
    let declared_size = data.len() as u64;
    let file = state
        .file_service
        .upload(&path, &file_name, declared_size, data, &settings)
        .await?;

    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/files/download?path=&mode=
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let path = normalize(&query.path)?;
    auth.require(PermissionAction::Read, &path)?;

    let disposition = match query.mode.as_deref() {
        Some("download") => "attachment",
        _ => "inline",
    };

    stream_file(&state, &path, disposition).await
}

/// GET /api/files/preview?path=
pub async fn preview(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Response, AppError> {
    let path = normalize(&query.path)?;
    auth.require(PermissionAction::Read, &path)?;

    stream_file(&state, &path, "inline").await
}

/// PUT /api/files/rename
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RenameRequest>,
) -> Result<Json<FileEntry>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let path = normalize(&req.path)?;
    auth.require(PermissionAction::Write, &path)?;

    let entry = state.file_service.rename(&path, &req.new_name).await?;
    Ok(Json(entry))
}

/// DELETE /api/files
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DeleteRequest>,
) -> Result<StatusCode, AppError> {
    let path = normalize(&req.path)?;
    auth.require(PermissionAction::Delete, &path)?;

    state.file_service.delete(&path).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn stream_file(
    state: &AppState,
    path: &str,
    disposition: &str,
) -> Result<Response, AppError> {
    let (entry, file) = state.file_service.open_for_read(path).await?;

    let mime = mime_for(&entry.name).unwrap_or("application/octet-stream");
    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(header::CONTENT_LENGTH, entry.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("{disposition}; filename=\"{}\"", entry.name),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}
