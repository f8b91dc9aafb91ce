//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (order store reachable)
//!
//! # Menus
//! GET    /menus                - Menu listing
//! GET    /menus/{id}           - Joined menu detail
//! GET    /menus/{id}/quote     - Price a configuration (?bread=&wine=&style=)
//!
//! # Draft (session)
//! GET    /draft                - Current draft with quote and delivery slots
//! PATCH  /draft                - Merge changes into the draft
//! DELETE /draft                - Reset the draft
//!
//! # Auth
//! POST   /auth/signup          - Register a member and sign in
//! POST   /auth/login           - Member login
//! POST   /auth/guest           - Continue as guest
//! POST   /auth/logout          - Drop identity and draft
//!
//! # Account (requires identity)
//! GET    /account              - Session identity
//! PUT    /account              - Update member profile
//!
//! # Checkout
//! GET    /checkout             - Preview the draft as an order
//! POST   /checkout             - Place the order (requires identity)
//!
//! # Orders
//! GET    /orders               - Orders of the session owner
//! GET    /orders/lookup        - Guest orders by token (?token=)
//! GET    /orders/{id}          - One order of the session owner
//! PATCH  /orders/{id}          - Edit a requested order
//! ```

pub mod account;
pub mod auth;
pub mod checkout;
pub mod draft;
pub mod menus;
pub mod orders;

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    routing::{get, post},
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::db::USERS_KEY;
use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menus::index))
        .route("/{id}", get(menus::show))
        .route("/{id}/quote", get(menus::quote))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/guest", post(auth::guest))
        .route("/logout", post(auth::logout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/lookup", get(orders::lookup))
        .route("/{id}", get(orders::show).patch(orders::update))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/menus", menu_routes())
        .route(
            "/draft",
            get(draft::show).patch(draft::update).delete(draft::reset),
        )
        .nest("/auth", auth_routes())
        .route("/account", get(account::show).put(account::update))
        .route("/checkout", get(checkout::preview).post(checkout::place))
        .nest("/orders", order_routes())
}

/// Build the full application: routes, session, tracing and cache headers.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the order store cannot be read.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().get(USERS_KEY) {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Store not readable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
