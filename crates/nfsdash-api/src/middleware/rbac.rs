//! RBAC helpers for route guarding.

use nfsdash_core::error::AppError;
use nfsdash_entity::role::PermissionAction;

use crate::extractors::AuthUser;

/// Requires an `admin` grant covering the given resource path.
pub fn require_admin(auth: &AuthUser, resource: &str) -> Result<(), AppError> {
    auth.context().require(PermissionAction::Admin, resource)
}
