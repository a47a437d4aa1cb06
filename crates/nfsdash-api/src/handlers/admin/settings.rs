//! Admin system settings handlers.

use axum::Json;
use axum::extract::State;

use nfsdash_core::error::AppError;
use nfsdash_entity::settings::SystemSettings;

use crate::dto::request::UpdateSettingsRequest;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/settings
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SystemSettings>, AppError> {
    require_admin(&auth, "/admin/settings")?;

    let settings = state.settings_service.get().await?;
    Ok(Json(settings))
}

/// PUT /api/admin/settings
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SystemSettings>, AppError> {
    require_admin(&auth, "/admin/settings")?;

    let settings = state
        .settings_service
        .update(
            auth.context(),
            SystemSettings {
                max_file_size_mb: req.max_file_size_mb,
                allowed_file_types: req.allowed_file_types,
                max_storage_per_user_mb: req.max_storage_per_user_mb,
                enable_audit_log: req.enable_audit_log,
                session_timeout_minutes: req.session_timeout_minutes,
            },
        )
        .await?;

    Ok(Json(settings))
}
