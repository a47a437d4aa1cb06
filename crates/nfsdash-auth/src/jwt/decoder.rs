//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use nfsdash_core::config::AuthConfig;
use nfsdash_core::error::AppError;

use super::claims::{Claims, TokenKind};

/// Validates JWT tokens.
///
/// Verification is signature + expiry only; there is no revocation list.
/// A token presented with the wrong kind (e.g. a pending two-factor token
/// used as a session) is rejected as forbidden.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.kind != TokenKind::Access {
            return Err(AppError::forbidden(
                "Invalid token type: expected session token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a pending two-factor token string.
    pub fn decode_two_factor_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.kind != TokenKind::TwoFactor {
            return Err(AppError::forbidden(
                "Invalid token type: expected two-factor pending token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without kind checking.
    ///
    /// A token that is present but unverifiable is forbidden, not
    /// unauthorized: unauthorized is reserved for requests that carry no
    /// token at all.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::forbidden("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::forbidden("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::forbidden("Invalid token signature")
                    }
                    _ => AppError::forbidden(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use nfsdash_core::error::ErrorKind;
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        serde_json::from_value(serde_json::json!({
            "jwt_secret": "test-secret-for-unit-tests",
        }))
        .unwrap()
    }

    #[test]
    fn test_roundtrip_access_token() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let user_id = Uuid::new_v4();
        let (token, _) = encoder
            .generate_access_token(user_id, "user@example.com")
            .unwrap();

        let claims = decoder.decode_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_two_factor_token_rejected_as_session() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let (token, _) = encoder
            .generate_two_factor_token(Uuid::new_v4(), "user@example.com")
            .unwrap();

        let err = decoder.decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert!(decoder.decode_two_factor_token(&token).is_ok());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let (token, _) = encoder
            .generate_access_token(Uuid::new_v4(), "user@example.com")
            .unwrap();
        let tampered = format!("{}x", token);

        let err = decoder.decode_access_token(&tampered).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&test_config());
        let other: AuthConfig = serde_json::from_value(serde_json::json!({
            "jwt_secret": "a-different-secret",
        }))
        .unwrap();
        let decoder = JwtDecoder::new(&other);

        let (token, _) = encoder
            .generate_access_token(Uuid::new_v4(), "user@example.com")
            .unwrap();

        assert!(decoder.decode_access_token(&token).is_err());
    }
}
