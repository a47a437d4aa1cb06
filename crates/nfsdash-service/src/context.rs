//! Request context carrying the authenticated user and resolved permissions.

use uuid::Uuid;

use nfsdash_auth::Authorizer;
use nfsdash_core::AppResult;
use nfsdash_entity::role::{Permission, PermissionAction};

/// Context for the current authenticated request.
///
/// Built by the API layer after token validation and role resolution, and
/// passed into service methods so every operation knows *who* is acting and
/// with *which* permissions.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email.
    pub email: String,
    /// Name of the resolved role.
    pub role_name: String,
    /// Permission grants resolved from the role at request time.
    pub permissions: Vec<Permission>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        email: String,
        role_name: String,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            user_id,
            email,
            role_name,
            permissions,
        }
    }

    /// Requires the given action on a normalized path, `Forbidden` otherwise.
    pub fn require(&self, action: PermissionAction, path: &str) -> AppResult<()> {
        Authorizer::new().require(&self.permissions, action, path)
    }

    /// Whether this context holds an admin grant covering the given path.
    pub fn is_admin_for(&self, path: &str) -> bool {
        Authorizer::new().is_allowed(&self.permissions, PermissionAction::Admin, path)
    }
}
