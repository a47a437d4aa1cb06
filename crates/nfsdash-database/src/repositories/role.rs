//! Role repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use nfsdash_core::error::{AppError, ErrorKind};
use nfsdash_core::result::AppResult;
use nfsdash_entity::role::{CreateRole, Role, UpdateRole};

/// Repository for role CRUD and query operations.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a role by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role by id", e))
    }

    /// Find a role by name (case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role by name", e)
            })
    }

    /// List all roles, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    /// The oldest role other than `excluding`, used as the reassignment
    /// target when a referenced role is deleted.
    pub async fn find_oldest_excluding(&self, excluding: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT * FROM roles WHERE id <> $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(excluding)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find fallback role", e))
    }

    /// Create a new role.
    pub async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, permissions) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(Json(&data.permissions))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("roles_name_lower_idx") =>
            {
                AppError::conflict(format!("Role '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create role", e),
        })
    }

    /// Replace a role's name and permission list.
    pub async fn update(&self, id: Uuid, data: &UpdateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = $2, permissions = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(Json(&data.permissions))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("roles_name_lower_idx") =>
            {
                AppError::conflict(format!("Role '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update role", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))
    }

    /// Delete a role by ID. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete role", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count total roles.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count roles", e))?;
        Ok(count as u64)
    }
}
