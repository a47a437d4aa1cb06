//! TOTP secret generation and time-based code verification.

use totp_rs::{Algorithm, Secret, TOTP};

use nfsdash_core::error::AppError;

/// Standard TOTP parameters: SHA-1, 6 digits, 30-second steps, and a skew
/// of one step in either direction when checking codes.
const DIGITS: usize = 6;
const SKEW: u8 = 1;
const STEP_SECONDS: u64 = 30;

/// A freshly generated enrollment, returned to the client for QR rendering.
///
/// The secret is stored against the user but 2FA stays disabled until one
/// code is verified successfully.
#[derive(Debug, Clone)]
pub struct TotpEnrollment {
    /// Base32-encoded shared secret.
    pub secret: String,
    /// `otpauth://` provisioning URI for authenticator apps.
    pub otpauth_url: String,
}

/// Generates TOTP secrets and verifies time-based codes.
#[derive(Debug, Clone)]
pub struct TotpVerifier {
    /// Issuer string embedded in provisioning URIs.
    issuer: String,
}

impl TotpVerifier {
    /// Creates a verifier with the given issuer.
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
        }
    }

    /// Generates a fresh secret and provisioning URI for the given account.
    pub fn generate(&self, account: &str) -> Result<TotpEnrollment, AppError> {
        let secret = Secret::generate_secret();
        let totp = self.build(&secret, account)?;

        Ok(TotpEnrollment {
            secret: secret.to_encoded().to_string(),
            otpauth_url: totp.get_url(),
        })
    }

    /// Rebuilds the provisioning URI for a stored secret.
    pub fn provisioning_url(&self, secret: &str, account: &str) -> Result<String, AppError> {
        let totp = self.build(&Secret::Encoded(secret.to_string()), account)?;
        Ok(totp.get_url())
    }

    /// Verifies a code against a stored base32 secret, tolerating ±1 step.
    ///
    /// Returns `Ok(true)` on a valid code, `Ok(false)` on a mismatch.
    pub fn verify(&self, secret: &str, code: &str) -> Result<bool, AppError> {
        let totp = self.build(&Secret::Encoded(secret.to_string()), "verify")?;
        totp.check_current(code)
            .map_err(|e| AppError::internal(format!("System clock error: {e}")))
    }

    fn build(&self, secret: &Secret, account: &str) -> Result<TOTP, AppError> {
        let bytes = secret
            .to_bytes()
            .map_err(|e| AppError::validation(format!("Invalid TOTP secret: {e:?}")))?;

        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW,
            STEP_SECONDS,
            bytes,
            Some(self.issuer.clone()),
            account.to_string(),
        )
        .map_err(|e| AppError::validation(format!("Invalid TOTP parameters: {e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_otpauth_url() {
        let verifier = TotpVerifier::new("NFSExplorer");
        let enrollment = verifier.generate("user@example.com").unwrap();

        assert!(enrollment.otpauth_url.starts_with("otpauth://totp/"));
        assert!(enrollment.otpauth_url.contains("NFSExplorer"));
        assert!(!enrollment.secret.is_empty());
    }

    #[test]
    fn test_current_code_verifies() {
        let verifier = TotpVerifier::new("NFSExplorer");
        let enrollment = verifier.generate("user@example.com").unwrap();

        let totp = TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW,
            STEP_SECONDS,
            Secret::Encoded(enrollment.secret.clone()).to_bytes().unwrap(),
            Some("NFSExplorer".to_string()),
            "user@example.com".to_string(),
        )
        .unwrap();
        let code = totp.generate_current().unwrap();

        assert!(verifier.verify(&enrollment.secret, &code).unwrap());
    }

    #[test]
    fn test_wrong_code_rejected() {
        let verifier = TotpVerifier::new("NFSExplorer");
        let enrollment = verifier.generate("user@example.com").unwrap();

        let totp = TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW,
            STEP_SECONDS,
            Secret::Encoded(enrollment.secret.clone()).to_bytes().unwrap(),
            Some("NFSExplorer".to_string()),
            "user@example.com".to_string(),
        )
        .unwrap();
        let code = totp.generate_current().unwrap();
        let wrong: String = code
            .chars()
            .map(|c| if c == '0' { '1' } else { '0' })
            .collect();

        assert!(!verifier.verify(&enrollment.secret, &wrong).unwrap());
    }

    #[test]
    fn test_invalid_secret_errors() {
        let verifier = TotpVerifier::new("NFSExplorer");
        assert!(verifier.verify("not base32 !!!", "123456").is_err());
    }
}
