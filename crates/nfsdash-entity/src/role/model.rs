//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::permission::Permission;

/// A named set of permission grants, referenced by users.
///
/// Roles are created and edited by admins at runtime; the permission list
/// is persisted as a JSONB column. At least one role must always exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Role name, unique case-insensitively.
    pub name: String,
    /// Ordered permission grants; first match wins during authorization.
    pub permissions: Json<Vec<Permission>>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Return the permission grants as a slice.
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions.0
    }
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Role name.
    pub name: String,
    /// Permission grants.
    pub permissions: Vec<Permission>,
}

/// Data for updating an existing role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRole {
    /// New role name.
    pub name: String,
    /// Replacement permission grants.
    pub permissions: Vec<Permission>,
}
