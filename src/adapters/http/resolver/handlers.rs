//! HTTP handlers for the resolver endpoint.
//!
//! These handlers connect axum routes to the resolution pipeline. The HTTP
//! status of the response mirrors the envelope's status code, so callers
//! can branch without inspecting the body.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::{RecordResultHandler, ResolveUtteranceHandler};
use crate::domain::foundation::{MessageId, SessionId};
use crate::domain::resolver::{ResponseEnvelope, UtteranceRequest};
use crate::ports::{NluRuntime, ResultStore};

use super::dto::{ErrorResponse, HealthResponse, ResolveRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; collaborators are Arc-wrapped and injected at
/// startup, never held as process-scope singletons.
#[derive(Clone)]
pub struct ResolverAppState {
    /// The NLU runtime the pipeline calls.
    pub runtime: Arc<dyn NluRuntime>,
    /// The result store; `None` disables the recorder entirely.
    pub store: Option<Arc<dyn ResultStore>>,
    /// Bot identifier forwarded with every request.
    pub bot_id: String,
    /// Bot alias identifier forwarded with every request.
    pub bot_alias_id: String,
    /// Locale forwarded with every request.
    pub locale_id: String,
    /// Conversation session forwarded with every request.
    pub session_id: SessionId,
    /// Time-to-live for stored results.
    pub result_ttl_secs: u64,
}

impl ResolverAppState {
    /// Create the pipeline handler on demand from the shared state.
    pub fn resolve_handler(&self) -> ResolveUtteranceHandler {
        let handler = ResolveUtteranceHandler::new(self.runtime.clone());
        match &self.store {
            Some(store) => handler.with_recorder(
                RecordResultHandler::new(store.clone()).with_ttl_secs(self.result_ttl_secs),
            ),
            None => handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /resolve - resolve one utterance.
pub async fn resolve_utterance(
    State(state): State<ResolverAppState>,
    Json(request): Json<ResolveRequest>,
) -> Response {
    let message_id = match MessageId::new(&request.message_id) {
        Ok(id) => id,
        Err(err) => {
            let body = ErrorResponse::new("INVALID_MESSAGE_ID", err.to_string());
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let utterance = UtteranceRequest::new(request.text, message_id)
        .with_session_id(state.session_id.clone())
        .with_locale_id(state.locale_id.clone())
        .with_bot_id(state.bot_id.clone())
        .with_bot_alias_id(state.bot_alias_id.clone());

    let envelope = state.resolve_handler().handle(utterance).await;
    envelope_response(envelope)
}

/// GET /health - liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// Renders an envelope, mirroring its status code onto the HTTP response.
fn envelope_response(envelope: ResponseEnvelope) -> Response {
    let status = StatusCode::from_u16(envelope.status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}
