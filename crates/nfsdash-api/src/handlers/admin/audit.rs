//! Admin audit log handlers.

use axum::Json;
use axum::extract::State;

use nfsdash_core::error::AppError;
use nfsdash_entity::audit::AuditLogEntry;

use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// How many entries a single listing returns.
const AUDIT_PAGE_SIZE: i64 = 200;

/// GET /api/admin/audit-logs
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AuditLogEntry>>, AppError> {
    require_admin(&auth, "/admin/audit-logs")?;

    let entries = state.audit.list_recent(AUDIT_PAGE_SIZE).await?;
    Ok(Json(entries))
}
