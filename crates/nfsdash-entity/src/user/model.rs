//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub name: Option<String>,
    /// The role this user holds (referenced, not owned).
    pub role_id: Uuid,
    /// Base32 TOTP secret, present once 2FA setup has started.
    #[serde(skip_serializing)]
    pub totp_secret: Option<String>,
    /// Whether two-factor login is enforced for this user.
    pub totp_enabled: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether a login for this user must complete the two-factor handshake.
    pub fn requires_two_factor(&self) -> bool {
        self.totp_enabled && self.totp_secret.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub name: Option<String>,
    /// Assigned role.
    pub role_id: Uuid,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New email address.
    pub email: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New role.
    pub role_id: Option<Uuid>,
}
