//! System settings entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Admin-editable system settings, persisted as a single row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SystemSettings {
    /// Maximum single upload size in megabytes.
    pub max_file_size_mb: i64,
    /// Comma-separated extension allow-list, e.g. `".jpg,.png,.pdf"`.
    /// Empty means every type is allowed.
    pub allowed_file_types: String,
    /// Per-user storage cap in megabytes.
    pub max_storage_per_user_mb: i64,
    /// Whether admin mutations append audit log entries.
    pub enable_audit_log: bool,
    /// Advisory session timeout surfaced to the frontend, in minutes.
    pub session_timeout_minutes: i64,
}

impl SystemSettings {
    /// Maximum single upload size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        (self.max_file_size_mb.max(0) as u64) * 1024 * 1024
    }

    /// Per-user storage cap in bytes.
    pub fn max_storage_per_user_bytes(&self) -> u64 {
        (self.max_storage_per_user_mb.max(0) as u64) * 1024 * 1024
    }

    /// Parse the allow-list into normalized lowercase extensions.
    ///
    /// Entries are trimmed and lowercased; a leading dot is accepted but
    /// not required. An empty result means every type is allowed.
    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_file_types
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            allowed_file_types: ".jpg,.png,.pdf,.doc,.docx".to_string(),
            max_storage_per_user_mb: 5120,
            enable_audit_log: true,
            session_timeout_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_parsing() {
        let settings = SystemSettings {
            allowed_file_types: ".JPG, png ,.pdf,,".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.allowed_extensions(), vec!["jpg", "png", "pdf"]);
    }

    #[test]
    fn test_empty_allow_list() {
        let settings = SystemSettings {
            allowed_file_types: String::new(),
            ..Default::default()
        };
        assert!(settings.allowed_extensions().is_empty());
    }

    #[test]
    fn test_size_conversions() {
        let settings = SystemSettings {
            max_file_size_mb: 2,
            ..Default::default()
        };
        assert_eq!(settings.max_file_size_bytes(), 2 * 1024 * 1024);
    }
}
