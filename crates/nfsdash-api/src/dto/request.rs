//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use nfsdash_entity::role::Permission;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Display name.
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Second step of a two-factor login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyTwoFactorLoginRequest {
    /// Pending token returned by the first login step.
    #[validate(length(min = 1))]
    pub pending_token: String,
    /// Current TOTP code.
    #[validate(length(min = 6, max = 6))]
    pub code: String,
}

/// Enrollment verification request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyTwoFactorRequest {
    /// Current TOTP code.
    #[validate(length(min = 6, max = 6))]
    pub code: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub old_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Query string carrying a sandbox path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathQuery {
    /// Sandbox path.
    pub path: String,
}

/// Query string for downloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// Sandbox path.
    pub path: String,
    /// `"download"` forces attachment disposition; anything else previews.
    pub mode: Option<String>,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Parent directory path.
    pub path: String,
    /// New folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Rename request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// Path of the entry to rename.
    pub path: String,
    /// New name (single path component).
    #[validate(length(min = 1, max = 255))]
    #[serde(rename = "newName")]
    pub new_name: String,
}

/// Delete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Path of the entry to delete.
    pub path: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Password.
    #[validate(length(min = 8))]
    pub password: String,
    /// Display name.
    pub name: Option<String>,
    /// Role name.
    #[validate(length(min = 1))]
    pub role: String,
}

/// Update user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New email.
    pub email: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New role name.
    pub role: Option<String>,
}

/// Bulk delete request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// IDs of the users to delete.
    pub ids: Vec<Uuid>,
}

/// Create role request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Role name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Permission grants.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Update role request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// Role name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Replacement permission grants.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Update settings request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    /// Maximum single upload size in megabytes.
    pub max_file_size_mb: i64,
    /// Comma-separated extension allow-list.
    pub allowed_file_types: String,
    /// Per-user storage cap in megabytes.
    pub max_storage_per_user_mb: i64,
    /// Whether admin mutations append audit entries.
    pub enable_audit_log: bool,
    /// Advisory session timeout in minutes.
    pub session_timeout_minutes: i64,
}
