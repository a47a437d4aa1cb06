//! NFS Dashboard Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use nfsdash_core::config::AppConfig;
use nfsdash_core::error::AppError;
use nfsdash_entity::role::{CreateRole, Permission, PermissionAction};
use nfsdash_entity::user::CreateUser;

#[tokio::main]
async fn main() {
    let env = std::env::var("NFSDASH_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting NFS Dashboard v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = nfsdash_database::connection::create_pool(&config.database).await?;
    nfsdash_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(nfsdash_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let role_repo = Arc::new(nfsdash_database::repositories::RoleRepository::new(
        db_pool.clone(),
    ));
    let settings_repo = Arc::new(nfsdash_database::repositories::SettingsRepository::new(
        db_pool.clone(),
    ));
    let audit_repo = Arc::new(nfsdash_database::repositories::AuditLogRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Auth primitives ──────────────────────────────────
    let password_hasher = Arc::new(nfsdash_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(nfsdash_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(nfsdash_auth::jwt::JwtDecoder::new(&config.auth));
    let totp = Arc::new(nfsdash_auth::totp::TotpVerifier::new(
        config.auth.totp_issuer.clone(),
    ));

    // ── Step 4: Bootstrap seed data ──────────────────────────────
    bootstrap(&config, &user_repo, &role_repo, &password_hasher).await?;

    // ── Step 5: Services ─────────────────────────────────────────
    let audit = nfsdash_service::audit::AuditRecorder::new(
        Arc::clone(&audit_repo),
        Arc::clone(&settings_repo),
    );

    let auth_service = Arc::new(nfsdash_service::auth::AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&totp),
        audit.clone(),
        config.auth.default_role.clone(),
        config.auth.password_min_length,
    ));

    let file_service =
        Arc::new(nfsdash_service::file::FileService::new(&config.storage.root_path).await?);
    tracing::info!(root = %config.storage.root_path, "File sandbox ready");

    let admin_user_service = Arc::new(nfsdash_service::admin::AdminUserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
        Arc::clone(&password_hasher),
        audit.clone(),
    ));
    let role_service = Arc::new(nfsdash_service::admin::RoleService::new(
        Arc::clone(&role_repo),
        Arc::clone(&user_repo),
        audit.clone(),
    ));
    let settings_service = Arc::new(nfsdash_service::admin::SettingsService::new(
        Arc::clone(&settings_repo),
        audit.clone(),
    ));
    let monitoring_service = Arc::new(nfsdash_service::monitoring::MonitoringService::new(
        file_service.as_ref().clone(),
    ));

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app_state = nfsdash_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_encoder,
        jwt_decoder,
        user_repo,
        role_repo,
        auth_service,
        file_service,
        admin_user_service,
        role_service,
        settings_service,
        audit: Arc::new(audit),
        monitoring_service,
    };

    let app = nfsdash_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("NFS Dashboard listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("NFS Dashboard shut down gracefully");
    Ok(())
}

/// Seed the role and user stores on first boot.
///
/// Guarantees the at-least-one-role invariant from the very first request:
/// an empty role store gets `admin` (admin on everything) and `viewer`
/// (read on everything); an empty user store gets the configured initial
/// admin account.
async fn bootstrap(
    config: &AppConfig,
    user_repo: &nfsdash_database::repositories::UserRepository,
    role_repo: &nfsdash_database::repositories::RoleRepository,
    hasher: &nfsdash_auth::password::PasswordHasher,
) -> Result<(), AppError> {
    if role_repo.count().await? == 0 {
        role_repo
            .create(&CreateRole {
                name: "admin".to_string(),
                permissions: vec![Permission::new(PermissionAction::Admin, "*")],
            })
            .await?;
        role_repo
            .create(&CreateRole {
                name: "viewer".to_string(),
                permissions: vec![Permission::new(PermissionAction::Read, "*")],
            })
            .await?;
        tracing::info!("Seeded default roles");
    }

    if user_repo.count().await? == 0 {
        let admin_role = role_repo
            .find_by_name("admin")
            .await?
            .ok_or_else(|| AppError::configuration("Role 'admin' missing during bootstrap"))?;

        let email = &config.auth.bootstrap_admin_email;
        user_repo
            .create(&CreateUser {
                email: email.clone(),
                password_hash: hasher.hash_password(&config.auth.bootstrap_admin_password)?,
                name: Some("Administrator".to_string()),
                role_id: admin_role.id,
            })
            .await?;
        tracing::warn!(
            email = %email,
            "Seeded initial admin account; change its password immediately"
        );
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
