//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use nfsdash_auth::jwt::{JwtDecoder, JwtEncoder};
use nfsdash_core::config::AppConfig;
use nfsdash_database::repositories::{RoleRepository, UserRepository};
use nfsdash_service::admin::{AdminUserService, RoleService, SettingsService};
use nfsdash_service::audit::AuditRecorder;
use nfsdash_service::auth::AuthService;
use nfsdash_service::file::FileService;
use nfsdash_service::monitoring::MonitoringService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// User repository (used by the auth extractor).
    pub user_repo: Arc<UserRepository>,
    /// Role repository (used by the auth extractor).
    pub role_repo: Arc<RoleRepository>,

    /// Authentication flows.
    pub auth_service: Arc<AuthService>,
    /// Sandboxed file operations.
    pub file_service: Arc<FileService>,
    /// Admin user CRUD.
    pub admin_user_service: Arc<AdminUserService>,
    /// Admin role CRUD.
    pub role_service: Arc<RoleService>,
    /// System settings.
    pub settings_service: Arc<SettingsService>,
    /// Audit trail recording and listing.
    pub audit: Arc<AuditRecorder>,
    /// Host monitoring snapshots.
    pub monitoring_service: Arc<MonitoringService>,
}
