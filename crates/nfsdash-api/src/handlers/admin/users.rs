//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use nfsdash_core::error::AppError;
use nfsdash_service::admin::users::{AdminCreateUser, AdminUpdateUser};

use crate::dto::request::{BulkDeleteRequest, CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{MessageResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    require_admin(&auth, "/admin/users")?;

    let users = state.admin_user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    require_admin(&auth, "/admin/users")?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .admin_user_service
        .create(
            auth.context(),
            AdminCreateUser {
                email: req.email,
                password: req.password,
                name: req.name,
                role: req.role,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/admin/users/:id
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    require_admin(&auth, "/admin/users")?;

    let user = state.admin_user_service.get(id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/admin/users/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    require_admin(&auth, "/admin/users")?;

    let user = state
        .admin_user_service
        .update(
            auth.context(),
            id,
            AdminUpdateUser {
                email: req.email,
                name: req.name,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/admin/users/:id
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_admin(&auth, "/admin/users")?;

    state.admin_user_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/users/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    require_admin(&auth, "/admin/users")?;

    let removed = state
        .admin_user_service
        .bulk_delete(auth.context(), &req.ids)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Deleted {removed} users"),
    }))
}

/// POST /api/admin/users/:id/disable-2fa
pub async fn disable_two_factor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_admin(&auth, "/admin/users")?;

    state
        .admin_user_service
        .disable_two_factor(auth.context(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
