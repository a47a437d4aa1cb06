//! Host monitoring handler.

use axum::Json;
use axum::extract::State;

use nfsdash_core::error::AppError;
use nfsdash_service::monitoring::MonitoringData;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/monitoring
pub async fn snapshot(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<MonitoringData>, AppError> {
    let data = state.monitoring_service.snapshot().await?;
    Ok(Json(data))
}
