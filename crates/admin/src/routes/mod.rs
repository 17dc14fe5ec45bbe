//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /                       - Sign-in form
//! GET  /signin                 - Sign-in form
//! POST /signin                 - Sign in against the store backend
//! GET  /signup                 - Sign-up form
//! POST /signup                 - Register a shop owner
//! POST /logout                 - Logout
//!
//! # Dashboard (signed-in only)
//! GET  /dashboard              - Dashboard page; first visit triggers the load
//! POST /dashboard/tab          - Switch tab (form field `tab`)
//! POST /dashboard/sidebar      - Collapse / expand the sidebar
//! POST /dashboard/refresh      - Reload every resource
//!
//! # Static
//! GET  /static/*               - Stylesheet and assets
//! ```

pub mod auth;
pub mod dashboard;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// All application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(dashboard::router())
}

/// The complete application with sessions and static files, ready to serve.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
