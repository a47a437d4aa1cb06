//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload.
///
/// Tokens are stateless: nothing is persisted server-side, and a token is
/// invalidated only by expiry or by the client discarding it. The caller's
/// role is resolved fresh from the database on every request, so a token
/// never carries stale permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Email for convenience.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// What the token may be used for.
    pub kind: TokenKind,
}

/// Distinguishes full session tokens from the pending two-factor handshake.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A full session token usable against any endpoint.
    Access,
    /// Issued after password verification for a 2FA-enabled user; only
    /// redeemable for an access token via the verify-2fa-login handshake.
    TwoFactor,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
