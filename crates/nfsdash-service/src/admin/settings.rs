//! Admin system settings management.

use std::sync::Arc;

use nfsdash_core::{AppError, AppResult};
use nfsdash_database::repositories::SettingsRepository;
use nfsdash_entity::settings::SystemSettings;

use crate::audit::AuditRecorder;
use crate::context::RequestContext;

/// Read and replace the single system settings row.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings_repo: Arc<SettingsRepository>,
    audit: AuditRecorder,
}

impl SettingsService {
    /// Create a new settings service.
    pub fn new(settings_repo: Arc<SettingsRepository>, audit: AuditRecorder) -> Self {
        Self {
            settings_repo,
            audit,
        }
    }

    /// Fetch the current settings.
    pub async fn get(&self) -> AppResult<SystemSettings> {
        self.settings_repo.get().await
    }

    /// Replace the settings row.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        settings: SystemSettings,
    ) -> AppResult<SystemSettings> {
        if settings.max_file_size_mb < 0 || settings.max_storage_per_user_mb < 0 {
            return Err(AppError::validation("Size limits must not be negative"));
        }
        if settings.session_timeout_minutes <= 0 {
            return Err(AppError::validation("Session timeout must be positive"));
        }

        let updated = self.settings_repo.update(&settings).await?;

        self.audit
            .record("update_settings", Some(ctx.user_id), "Updated system settings")
            .await;
        Ok(updated)
    }
}
