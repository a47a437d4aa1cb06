//! System settings repository implementation.

use sqlx::PgPool;

use nfsdash_core::error::{AppError, ErrorKind};
use nfsdash_core::result::AppResult;
use nfsdash_entity::settings::SystemSettings;

/// Repository for the single system settings row.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row (seeded by migrations).
    pub async fn get(&self) -> AppResult<SystemSettings> {
        sqlx::query_as::<_, SystemSettings>(
            "SELECT max_file_size_mb, allowed_file_types, max_storage_per_user_mb, \
                    enable_audit_log, session_timeout_minutes \
             FROM system_settings WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load settings", e))
    }

    /// Replace the settings row.
    pub async fn update(&self, settings: &SystemSettings) -> AppResult<SystemSettings> {
        sqlx::query_as::<_, SystemSettings>(
            "UPDATE system_settings SET max_file_size_mb = $1, \
                                        allowed_file_types = $2, \
                                        max_storage_per_user_mb = $3, \
                                        enable_audit_log = $4, \
                                        session_timeout_minutes = $5 \
             WHERE id = 1 \
             RETURNING max_file_size_mb, allowed_file_types, max_storage_per_user_mb, \
                       enable_audit_log, session_timeout_minutes",
        )
        .bind(settings.max_file_size_mb)
        .bind(&settings.allowed_file_types)
        .bind(settings.max_storage_per_user_mb)
        .bind(settings.enable_audit_log)
        .bind(settings.session_timeout_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update settings", e))
    }
}
