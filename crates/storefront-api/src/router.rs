//! Route definitions for the storefront HTTP API.
//!
//! Public auth endpoints and the authenticated routes are mounted under
//! `/api`; the health check sits at the root. Authentication and the role
//! gate are attached with `route_layer` so unmatched paths still return `404`.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use storefront_entity::user::UserRole;

use crate::handlers;
use crate::middleware::{auth::require_auth, rbac::require_role};
use crate::state::AppState;

/// Build the route tree and bind it to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(protected_routes(state.clone()));

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Registration and login, no token required.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
}

/// Routes that require a valid bearer token.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::auth::profile))
        .merge(admin_routes())
        .route_layer(from_fn_with_state(state, require_auth))
}

/// Routes that additionally require the admin role.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(handlers::admin::dashboard))
        .route_layer(from_fn_with_state(UserRole::Admin, require_role))
}
