//! Admin role management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use nfsdash_core::error::AppError;
use nfsdash_entity::role::{CreateRole, Role, UpdateRole};

use crate::dto::request::{CreateRoleRequest, UpdateRoleRequest};
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/roles
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Role>>, AppError> {
    require_admin(&auth, "/admin/roles")?;

    let roles = state.role_service.list().await?;
    Ok(Json(roles))
}

/// POST /api/admin/roles
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    require_admin(&auth, "/admin/roles")?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = state
        .role_service
        .create(
            auth.context(),
            CreateRole {
                name: req.name,
                permissions: req.permissions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(role)))
}

/// GET /api/admin/roles/:id
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Role>, AppError> {
    require_admin(&auth, "/admin/roles")?;

    let role = state.role_service.get(id).await?;
    Ok(Json(role))
}

/// PUT /api/admin/roles/:id
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<Role>, AppError> {
    require_admin(&auth, "/admin/roles")?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = state
        .role_service
        .update(
            auth.context(),
            id,
            UpdateRole {
                name: req.name,
                permissions: req.permissions,
            },
        )
        .await?;

    Ok(Json(role))
}

/// DELETE /api/admin/roles/:id
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_admin(&auth, "/admin/roles")?;

    state.role_service.delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
