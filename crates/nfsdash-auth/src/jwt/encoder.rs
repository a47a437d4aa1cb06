//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use nfsdash_core::config::AuthConfig;
use nfsdash_core::error::AppError;

use super::claims::{Claims, TokenKind};

/// Creates signed session and two-factor-pending tokens.
///
/// Constructed from an explicitly injected [`AuthConfig`]; the signing
/// secret is never read from process-global state.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session token TTL in minutes.
    access_ttl_minutes: i64,
    /// Pending two-factor token TTL in minutes.
    two_factor_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            two_factor_ttl_minutes: config.two_factor_ttl_minutes as i64,
        }
    }

    /// Generates a full session token for the given user.
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        self.generate(user_id, email, TokenKind::Access, self.access_ttl_minutes)
    }

    /// Generates a short-lived pending token after password verification
    /// for a 2FA-enabled user. Not usable as a session token.
    pub fn generate_two_factor_token(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        self.generate(
            user_id,
            email,
            TokenKind::TwoFactor,
            self.two_factor_ttl_minutes,
        )
    }

    fn generate(
        &self,
        user_id: Uuid,
        email: &str,
        kind: TokenKind,
        ttl_minutes: i64,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(ttl_minutes);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            kind,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, exp))
    }
}
