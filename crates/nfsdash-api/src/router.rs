//! Route definitions for the dashboard HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(admin_routes())
        .route("/monitoring", get(handlers::monitoring::snapshot))
        .route("/health", get(handlers::health::health));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, 2FA, profile.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/auth/verify-2fa-login",
            post(handlers::auth::verify_two_factor_login),
        )
        .route("/auth/profile", get(handlers::auth::profile))
        .route(
            "/auth/change-password",
            post(handlers::auth::change_password),
        )
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/generate-2fa-secret",
            post(handlers::auth::generate_two_factor_secret),
        )
        .route("/verify-2fa", post(handlers::auth::verify_two_factor))
        .route("/disable-2fa", post(handlers::auth::disable_two_factor))
}

/// Sandboxed file operations.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list))
        .route("/files", delete(handlers::file::delete))
        .route("/files/folder", post(handlers::file::create_folder))
        .route("/files/upload", post(handlers::file::upload))
        .route("/files/download", get(handlers::file::download))
        .route("/files/preview", get(handlers::file::preview))
        .route("/files/info", get(handlers::file::info))
        .route("/files/rename", put(handlers::file::rename))
}

/// Admin-only endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/admin/users", get(handlers::admin::users::list))
        .route("/admin/users", post(handlers::admin::users::create))
        .route(
            "/admin/users/bulk-delete",
            post(handlers::admin::users::bulk_delete),
        )
        .route("/admin/users/{id}", get(handlers::admin::users::get))
        .route("/admin/users/{id}", put(handlers::admin::users::update))
        .route("/admin/users/{id}", delete(handlers::admin::users::delete))
        .route(
            "/admin/users/{id}/disable-2fa",
            post(handlers::admin::users::disable_two_factor),
        )
        // Role management
        .route("/admin/roles", get(handlers::admin::roles::list))
        .route("/admin/roles", post(handlers::admin::roles::create))
        .route("/admin/roles/{id}", get(handlers::admin::roles::get))
        .route("/admin/roles/{id}", put(handlers::admin::roles::update))
        .route("/admin/roles/{id}", delete(handlers::admin::roles::delete))
        // System settings and audit
        .route("/admin/settings", get(handlers::admin::settings::get))
        .route("/admin/settings", put(handlers::admin::settings::update))
        .route("/admin/audit-logs", get(handlers::admin::audit::list))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::{Any, AllowOrigin};

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }

    cors
}
