//! Admin user management.

use std::sync::Arc;

use uuid::Uuid;

use nfsdash_auth::password::PasswordHasher;
use nfsdash_core::{AppError, AppResult};
use nfsdash_database::repositories::{RoleRepository, UserRepository};
use nfsdash_entity::user::{CreateUser, UpdateUser, User};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;

/// Request to create a user on behalf of an admin.
#[derive(Debug, Clone)]
pub struct AdminCreateUser {
    /// Login email.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Display name.
    pub name: Option<String>,
    /// Role name to assign.
    pub role: String,
}

/// Request to update a user on behalf of an admin.
#[derive(Debug, Clone, Default)]
pub struct AdminUpdateUser {
    /// New email.
    pub email: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New role name.
    pub role: Option<String>,
}

/// Thin CRUD over the user store, admin-gated at the API layer.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    hasher: Arc<PasswordHasher>,
    audit: AuditRecorder,
}

impl AdminUserService {
    /// Create a new admin user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        hasher: Arc<PasswordHasher>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            hasher,
            audit,
        }
    }

    /// List all users.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all().await
    }

    /// Fetch a single user.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Create a user with the given role.
    pub async fn create(&self, ctx: &RequestContext, req: AdminCreateUser) -> AppResult<User> {
        let role = self
            .role_repo
            .find_by_name(&req.role)
            .await?
            .ok_or_else(|| AppError::validation(format!("Role '{}' does not exist", req.role)))?;

        let user = self
            .user_repo
            .create(&CreateUser {
                email: req.email,
                password_hash: self.hasher.hash_password(&req.password)?,
                name: req.name,
                role_id: role.id,
            })
            .await?;

        self.audit
            .record(
                "create_user",
                Some(ctx.user_id),
                &format!("Created user {}", user.email),
            )
            .await;
        Ok(user)
    }

    /// Update a user's email, name, or role.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: AdminUpdateUser,
    ) -> AppResult<User> {
        let role_id = match &req.role {
            Some(role_name) => Some(
                self.role_repo
                    .find_by_name(role_name)
                    .await?
                    .ok_or_else(|| {
                        AppError::validation(format!("Role '{role_name}' does not exist"))
                    })?
                    .id,
            ),
            None => None,
        };

        let user = self
            .user_repo
            .update(
                id,
                &UpdateUser {
                    email: req.email,
                    name: req.name,
                    role_id,
                },
            )
            .await?;

        self.audit
            .record(
                "update_user",
                Some(ctx.user_id),
                &format!("Updated user {}", user.email),
            )
            .await;
        Ok(user)
    }

    /// Delete a single user.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.user_repo.delete(id).await? {
            return Err(AppError::not_found(format!("User {id} not found")));
        }

        self.audit
            .record("delete_user", Some(ctx.user_id), &format!("Deleted user {id}"))
            .await;
        Ok(())
    }

    /// Delete multiple users at once.
    pub async fn bulk_delete(&self, ctx: &RequestContext, ids: &[Uuid]) -> AppResult<u64> {
        let removed = self.user_repo.delete_many(ids).await?;

        self.audit
            .record(
                "bulk_delete_users",
                Some(ctx.user_id),
                &format!("Deleted {removed} users"),
            )
            .await;
        Ok(removed)
    }

    /// Clear another user's TOTP secret and flag.
    pub async fn disable_two_factor(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.user_repo.disable_totp(id).await?;

        self.audit
            .record(
                "disable_2fa",
                Some(ctx.user_id),
                &format!("Disabled 2FA for user {id}"),
            )
            .await;
        Ok(())
    }
}
