//! Axum router configuration for the resolver endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, resolve_utterance, ResolverAppState};

/// Create the resolver API router.
///
/// # Routes
/// - `POST /resolve` - resolve one utterance; the HTTP status mirrors the
///   envelope's status code (200 resolved, 408 unresolved, 500 failed)
/// - `GET /health` - liveness probe
pub fn resolver_router() -> Router<ResolverAppState> {
    Router::new()
        .route("/resolve", post(resolve_utterance))
        .route("/health", get(health))
}
