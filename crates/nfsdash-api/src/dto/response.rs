//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nfsdash_entity::user::User;

/// User summary for responses; never carries secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Role ID.
    pub role_id: Uuid,
    /// Whether two-factor login is enabled.
    #[serde(rename = "twoFactorEnabled")]
    pub two_factor_enabled: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role_id: user.role_id,
            two_factor_enabled: user.totp_enabled,
            created_at: user.created_at,
        }
    }
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed session token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// First-step response for 2FA-enabled accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorChallengeResponse {
    /// Always true; lets the frontend branch on the response shape.
    pub two_factor_required: bool,
    /// Pending token to redeem with a TOTP code.
    pub pending_token: String,
    /// Pending token expiry.
    pub expires_at: DateTime<Utc>,
}

/// 2FA enrollment response for client-side QR rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorSetupResponse {
    /// Base32 shared secret.
    pub secret: String,
    /// `otpauth://` provisioning URI.
    pub otpauth_url: String,
    /// Account the secret was generated for.
    pub email: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
