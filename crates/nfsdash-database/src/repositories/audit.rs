//! Audit log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use nfsdash_core::error::{AppError, ErrorKind};
use nfsdash_core::result::AppResult;
use nfsdash_entity::audit::AuditLogEntry;

/// Repository for append-only audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry.
    pub async fn append(
        &self,
        action: &str,
        user_id: Option<Uuid>,
        details: &str,
    ) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (action, user_id, details) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(action)
        .bind(user_id)
        .bind(details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append audit entry", e))
    }

    /// List the most recent entries, newest first.
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list audit entries", e))
    }
}
