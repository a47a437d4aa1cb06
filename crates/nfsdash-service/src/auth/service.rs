//! Authentication flows: registration, login, the two-factor handshake,
//! and self-service account operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use nfsdash_auth::jwt::{JwtDecoder, JwtEncoder};
use nfsdash_auth::password::PasswordHasher;
use nfsdash_auth::totp::{TotpEnrollment, TotpVerifier};
use nfsdash_core::{AppError, AppResult};
use nfsdash_database::repositories::{RoleRepository, UserRepository};
use nfsdash_entity::user::{CreateUser, User};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;

/// Result of a successful password check.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Full session established.
    Session {
        /// The signed session token.
        token: String,
        /// Token expiry.
        expires_at: DateTime<Utc>,
        /// The authenticated user.
        user: User,
    },
    /// The account has 2FA enabled; the caller must redeem the pending
    /// token with a valid code before a session token is issued.
    TwoFactorRequired {
        /// Short-lived pending token.
        pending_token: String,
        /// Pending token expiry.
        expires_at: DateTime<Utc>,
    },
}

/// Orchestrates credential validation, token issuance, and 2FA enrollment.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    totp: Arc<TotpVerifier>,
    audit: AuditRecorder,
    default_role: String,
    password_min_length: usize,
}

impl AuthService {
    /// Create a new auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        totp: Arc<TotpVerifier>,
        audit: AuditRecorder,
        default_role: String,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            hasher,
            encoder,
            decoder,
            totp,
            audit,
            default_role,
            password_min_length,
        }
    }

    /// Register a new user with the configured default role.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> AppResult<User> {
        self.check_password_length(password)?;

        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Email '{email}' is already registered"
            )));
        }

        let role = self
            .role_repo
            .find_by_name(&self.default_role)
            .await?
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Default role '{}' does not exist",
                    self.default_role
                ))
            })?;

        let user = self
            .user_repo
            .create(&CreateUser {
                email: email.to_string(),
                password_hash: self.hasher.hash_password(password)?,
                name,
                role_id: role.id,
            })
            .await?;

        info!(user_id = %user.id, "Registered new user");
        self.audit
            .record("register", Some(user.id), &format!("Registered {email}"))
            .await;
        Ok(user)
    }

    /// Validate credentials and issue a session token, or a pending
    /// two-factor challenge for 2FA-enabled accounts.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = match self.user_repo.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(invalid_credentials()),
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        if user.requires_two_factor() {
            let (pending_token, expires_at) =
                self.encoder.generate_two_factor_token(user.id, &user.email)?;
            return Ok(LoginOutcome::TwoFactorRequired {
                pending_token,
                expires_at,
            });
        }

        let (token, expires_at) = self.encoder.generate_access_token(user.id, &user.email)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome::Session {
            token,
            expires_at,
            user,
        })
    }

    /// Complete a two-factor login by redeeming the pending token.
    pub async fn verify_two_factor_login(
        &self,
        pending_token: &str,
        code: &str,
    ) -> AppResult<LoginOutcome> {
        let claims = self.decoder.decode_two_factor_token(pending_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::forbidden("User no longer exists"))?;

        let secret = user
            .totp_secret
            .as_deref()
            .ok_or_else(|| AppError::forbidden("Two-factor is not configured"))?;

        if !self.totp.verify(secret, code)? {
            return Err(AppError::validation("Invalid verification code"));
        }

        let (token, expires_at) = self.encoder.generate_access_token(user.id, &user.email)?;
        info!(user_id = %user.id, "User completed two-factor login");
        Ok(LoginOutcome::Session {
            token,
            expires_at,
            user,
        })
    }

    /// Start 2FA enrollment: generate and store a secret, return it with
    /// the provisioning URI. 2FA stays disabled until one code verifies.
    pub async fn setup_two_factor(&self, ctx: &RequestContext) -> AppResult<TotpEnrollment> {
        let enrollment = self.totp.generate(&ctx.email)?;
        self.user_repo
            .set_totp_secret(ctx.user_id, &enrollment.secret)
            .await?;
        Ok(enrollment)
    }

    /// Finish 2FA enrollment by verifying one code against the stored
    /// pending secret.
    pub async fn confirm_two_factor(&self, ctx: &RequestContext, code: &str) -> AppResult<()> {
        let user = self.require_user(ctx).await?;
        let secret = user
            .totp_secret
            .as_deref()
            .ok_or_else(|| AppError::validation("No pending two-factor secret"))?;

        if !self.totp.verify(secret, code)? {
            return Err(AppError::validation("Invalid verification code"));
        }

        self.user_repo.enable_totp(user.id).await?;
        self.audit
            .record(
                "enable_2fa",
                Some(user.id),
                &format!("Enabled 2FA for {}", user.email),
            )
            .await;
        Ok(())
    }

    /// Clear the caller's TOTP secret and flag.
    pub async fn disable_two_factor(&self, ctx: &RequestContext) -> AppResult<()> {
        self.user_repo.disable_totp(ctx.user_id).await?;
        self.audit
            .record(
                "disable_2fa",
                Some(ctx.user_id),
                &format!("Disabled 2FA for {}", ctx.email),
            )
            .await;
        Ok(())
    }

    /// Return the authenticated user's record.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.require_user(ctx).await
    }

    /// Change the caller's password after verifying the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        self.check_password_length(new_password)?;

        let user = self.require_user(ctx).await?;
        if !self
            .hasher
            .verify_password(old_password, &user.password_hash)?
        {
            return Err(AppError::unauthorized("Old password incorrect"));
        }

        let hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user.id, &hash).await?;
        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    async fn require_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn check_password_length(&self, password: &str) -> AppResult<()> {
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        Ok(())
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password")
}
