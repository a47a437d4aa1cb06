//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, resolves the caller's role, and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nfsdash_core::error::AppError;
use nfsdash_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// The request walks `TokenPresent → TokenValid → RoleResolved` here:
/// a missing header is unauthorized, an unverifiable token is forbidden,
/// and the role's permissions are loaded fresh so a role edit takes effect
/// on the caller's next request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        // Bearer-prefixed and raw tokens are both accepted.
        let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

        let claims = state.jwt_decoder.decode_access_token(token)?;

        let user = state
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::forbidden("User no longer exists"))?;

        let role = state
            .role_repo
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(|| AppError::forbidden("User's role no longer exists"))?;

        Ok(AuthUser(RequestContext::new(
            user.id,
            user.email,
            role.name.clone(),
            role.permissions.0,
        )))
    }
}
