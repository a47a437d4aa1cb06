//! Auth handlers — register, login, 2FA, profile, password change.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use nfsdash_core::error::AppError;
use nfsdash_service::auth::LoginOutcome;

use crate::dto::request::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, VerifyTwoFactorLoginRequest,
    VerifyTwoFactorRequest,
};
use crate::dto::response::{
    MessageResponse, TokenResponse, TwoFactorChallengeResponse, TwoFactorSetupResponse,
    UserResponse,
};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .auth_service
        .register(&req.email, &req.password, req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
///
/// Responds with either a full session token or, for 2FA-enabled users, a
/// pending challenge that must be redeemed via `verify-2fa-login`.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let body = match state.auth_service.login(&req.email, &req.password).await? {
        LoginOutcome::Session {
            token, expires_at, ..
        } => serde_json::to_value(TokenResponse { token, expires_at })?,
        LoginOutcome::TwoFactorRequired {
            pending_token,
            expires_at,
        } => serde_json::to_value(TwoFactorChallengeResponse {
            two_factor_required: true,
            pending_token,
            expires_at,
        })?,
    };
    Ok(Json(body))
}

/// POST /api/auth/verify-2fa-login
pub async fn verify_two_factor_login(
    State(state): State<AppState>,
    Json(req): Json<VerifyTwoFactorLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    match state
        .auth_service
        .verify_two_factor_login(&req.pending_token, &req.code)
        .await?
    {
        LoginOutcome::Session {
            token, expires_at, ..
        } => Ok(Json(TokenResponse { token, expires_at })),
        LoginOutcome::TwoFactorRequired { .. } => {
            Err(AppError::internal("Unexpected pending state after 2FA"))
        }
    }
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth_service.profile(auth.context()).await?;
    Ok(Json(user.into()))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .auth_service
        .change_password(auth.context(), &req.old_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is client-side discarding. The endpoint
/// exists so the frontend has something to call.
pub async fn logout(_auth: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out".to_string(),
    })
}

/// POST /api/generate-2fa-secret
pub async fn generate_two_factor_secret(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TwoFactorSetupResponse>, AppError> {
    let enrollment = state.auth_service.setup_two_factor(auth.context()).await?;

    Ok(Json(TwoFactorSetupResponse {
        secret: enrollment.secret,
        otpauth_url: enrollment.otpauth_url,
        email: auth.email.clone(),
    }))
}

/// POST /api/verify-2fa
pub async fn verify_two_factor(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<VerifyTwoFactorRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .auth_service
        .confirm_two_factor(auth.context(), &req.code)
        .await?;

    Ok(Json(MessageResponse {
        message: "Two-factor authentication enabled".to_string(),
    }))
}

/// POST /api/disable-2fa
pub async fn disable_two_factor(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .auth_service
        .disable_two_factor(auth.context())
        .await?;

    Ok(Json(MessageResponse {
        message: "Two-factor authentication disabled".to_string(),
    }))
}
