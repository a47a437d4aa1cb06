//! Audit trail recording, gated by the persisted settings flag.

use std::sync::Arc;

use uuid::Uuid;

use nfsdash_core::AppResult;
use nfsdash_database::repositories::{AuditLogRepository, SettingsRepository};
use nfsdash_entity::audit::AuditLogEntry;

/// Appends audit entries for admin and auth events.
///
/// Recording is skipped entirely when `enable_audit_log` is off; a failed
/// append is logged but never fails the operation that triggered it.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    audit_repo: Arc<AuditLogRepository>,
    settings_repo: Arc<SettingsRepository>,
}

impl AuditRecorder {
    /// Create a new recorder.
    pub fn new(audit_repo: Arc<AuditLogRepository>, settings_repo: Arc<SettingsRepository>) -> Self {
        Self {
            audit_repo,
            settings_repo,
        }
    }

    /// Record an event if auditing is enabled.
    pub async fn record(&self, action: &str, user_id: Option<Uuid>, details: &str) {
        let enabled = match self.settings_repo.get().await {
            Ok(settings) => settings.enable_audit_log,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load settings for audit check");
                return;
            }
        };
        if !enabled {
            return;
        }

        if let Err(e) = self.audit_repo.append(action, user_id, details).await {
            tracing::warn!(action, error = %e, "Failed to append audit entry");
        }
    }

    /// List the most recent audit entries, newest first.
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLogEntry>> {
        self.audit_repo.list_recent(limit).await
    }
}
