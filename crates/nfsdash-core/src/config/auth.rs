//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Pending two-factor token TTL in minutes.
    #[serde(default = "default_two_factor_ttl")]
    pub two_factor_ttl_minutes: u64,
    /// Minimum password length for registration and password changes.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Role assigned to self-registered users.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Issuer string embedded in TOTP provisioning URIs.
    #[serde(default = "default_totp_issuer")]
    pub totp_issuer: String,
    /// Email of the admin account seeded on first boot.
    #[serde(default = "default_bootstrap_email")]
    pub bootstrap_admin_email: String,
    /// Password of the admin account seeded on first boot.
    #[serde(default = "default_bootstrap_password")]
    pub bootstrap_admin_password: String,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_two_factor_ttl() -> u64 {
    5
}

fn default_password_min() -> usize {
    8
}

fn default_role() -> String {
    "viewer".to_string()
}

fn default_totp_issuer() -> String {
    "NFSExplorer".to_string()
}

fn default_bootstrap_email() -> String {
    "admin@localhost".to_string()
}

fn default_bootstrap_password() -> String {
    "changeme123".to_string()
}
