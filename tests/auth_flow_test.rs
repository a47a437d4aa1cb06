//! Token, password, and two-factor primitives exercised together the way
//! the login flow composes them.

use serde_json::json;
use uuid::Uuid;

use nfsdash_auth::jwt::{JwtDecoder, JwtEncoder};
use nfsdash_auth::password::PasswordHasher;
use nfsdash_auth::totp::TotpVerifier;
use nfsdash_core::config::AuthConfig;
use nfsdash_core::error::ErrorKind;

fn auth_config() -> AuthConfig {
    serde_json::from_value(json!({
        "jwt_secret": "integration-test-secret",
        "access_ttl_minutes": 60,
        "two_factor_ttl_minutes": 5,
    }))
    .unwrap()
}

#[test]
fn test_password_then_token_round_trip() {
    let hasher = PasswordHasher::new();
    let encoder = JwtEncoder::new(&auth_config());
    let decoder = JwtDecoder::new(&auth_config());

    let hash = hasher.hash_password("hunter2hunter2").unwrap();
    assert!(hasher.verify_password("hunter2hunter2", &hash).unwrap());

    let user_id = Uuid::new_v4();
    let (token, expires_at) = encoder
        .generate_access_token(user_id, "user@example.com")
        .unwrap();
    assert!(expires_at > chrono::Utc::now());

    let claims = decoder.decode_access_token(&token).unwrap();
    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.email, "user@example.com");
}

#[test]
fn test_pending_token_is_not_a_session() {
    let encoder = JwtEncoder::new(&auth_config());
    let decoder = JwtDecoder::new(&auth_config());

    let (pending, _) = encoder
        .generate_two_factor_token(Uuid::new_v4(), "user@example.com")
        .unwrap();

    // The pending token opens the 2FA handshake but is refused as a session.
    assert!(decoder.decode_two_factor_token(&pending).is_ok());
    let err = decoder.decode_access_token(&pending).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[test]
fn test_two_factor_handshake_with_current_code() {
    let totp = TotpVerifier::new("NFSExplorer");
    let enrollment = totp.generate("user@example.com").unwrap();

    // Simulate the authenticator app computing the current code.
    let app = totp_rs::TOTP::new(
        totp_rs::Algorithm::SHA1,
        6,
        1,
        30,
        totp_rs::Secret::Encoded(enrollment.secret.clone())
            .to_bytes()
            .unwrap(),
        Some("NFSExplorer".to_string()),
        "user@example.com".to_string(),
    )
    .unwrap();
    let code = app.generate_current().unwrap();

    assert!(totp.verify(&enrollment.secret, &code).unwrap());
}

#[test]
fn test_provisioning_url_is_stable_for_stored_secret() {
    let totp = TotpVerifier::new("NFSExplorer");
    let enrollment = totp.generate("user@example.com").unwrap();

    let url = totp
        .provisioning_url(&enrollment.secret, "user@example.com")
        .unwrap();
    assert_eq!(url, enrollment.otpauth_url);
}
