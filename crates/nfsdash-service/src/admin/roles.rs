//! Admin role management.
//!
//! Invariants enforced here: at least one role always exists, and deleting
//! a role that users still reference reassigns those users to the oldest
//! remaining role rather than orphaning them.

use std::sync::Arc;

use uuid::Uuid;

use nfsdash_core::{AppError, AppResult};
use nfsdash_database::repositories::{RoleRepository, UserRepository};
use nfsdash_entity::role::{CreateRole, Role, UpdateRole};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;

/// Thin CRUD over the role store, admin-gated at the API layer.
#[derive(Debug, Clone)]
pub struct RoleService {
    role_repo: Arc<RoleRepository>,
    user_repo: Arc<UserRepository>,
    audit: AuditRecorder,
}

impl RoleService {
    /// Create a new role service.
    pub fn new(
        role_repo: Arc<RoleRepository>,
        user_repo: Arc<UserRepository>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            role_repo,
            user_repo,
            audit,
        }
    }

    /// List all roles.
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        self.role_repo.find_all().await
    }

    /// Fetch a single role.
    pub async fn get(&self, id: Uuid) -> AppResult<Role> {
        self.role_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))
    }

    /// Create a role. Names are unique case-insensitively.
    pub async fn create(&self, ctx: &RequestContext, req: CreateRole) -> AppResult<Role> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Role name must not be empty"));
        }

        let role = self.role_repo.create(&req).await?;

        self.audit
            .record(
                "create_role",
                Some(ctx.user_id),
                &format!("Created role {}", role.name),
            )
            .await;
        Ok(role)
    }

    /// Replace a role's name and permissions.
    pub async fn update(&self, ctx: &RequestContext, id: Uuid, req: UpdateRole) -> AppResult<Role> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Role name must not be empty"));
        }

        // A rename may not collide with a different role's name.
        if let Some(existing) = self.role_repo.find_by_name(&req.name).await? {
            if existing.id != id {
                return Err(AppError::conflict(format!(
                    "Role '{}' already exists",
                    req.name
                )));
            }
        }

        let role = self.role_repo.update(id, &req).await?;

        self.audit
            .record(
                "update_role",
                Some(ctx.user_id),
                &format!("Updated role {}", role.name),
            )
            .await;
        Ok(role)
    }

    /// Delete a role.
    ///
    /// Fails with `LastRoleProtected` semantics (Conflict) when it is the
    /// sole remaining role. Users still referencing the role are moved to
    /// the oldest remaining role first, and the reassignment is recorded.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let role = self.get(id).await?;

        if self.role_repo.count().await? <= 1 {
            return Err(AppError::conflict(
                "Cannot delete the last remaining role",
            ));
        }

        let fallback = self
            .role_repo
            .find_oldest_excluding(id)
            .await?
            .ok_or_else(|| AppError::conflict("Cannot delete the last remaining role"))?;

        let reassigned = self.user_repo.reassign_role(id, fallback.id).await?;
        if reassigned > 0 {
            self.audit
                .record(
                    "reassign_role",
                    Some(ctx.user_id),
                    &format!(
                        "Moved {reassigned} users from role '{}' to '{}'",
                        role.name, fallback.name
                    ),
                )
                .await;
        }

        if !self.role_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Role {id} not found")));
        }

        self.audit
            .record(
                "delete_role",
                Some(ctx.user_id),
                &format!("Deleted role {}", role.name),
            )
            .await;
        Ok(())
    }
}
