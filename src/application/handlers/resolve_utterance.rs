//! ResolveUtteranceHandler - the intent resolution pipeline.
//!
//! Owns the single call to the NLU runtime, the three-way branch on its
//! reply shape, and the optional best-effort recording of a resolved reply.
//! Every failure mode maps into the response envelope; nothing propagates
//! past this handler.

use std::sync::Arc;

use crate::domain::resolver::{ResolutionOutcome, ResponseEnvelope, UtteranceRequest};
use crate::ports::NluRuntime;

use super::record_result::RecordResultHandler;

/// Handler for resolving one utterance against the NLU runtime.
///
/// The runtime and the optional recorder are injected at construction so
/// tests can substitute fakes without process-wide state.
pub struct ResolveUtteranceHandler {
    runtime: Arc<dyn NluRuntime>,
    recorder: Option<RecordResultHandler>,
}

impl ResolveUtteranceHandler {
    /// Creates a resolver without persistence.
    pub fn new(runtime: Arc<dyn NluRuntime>) -> Self {
        Self {
            runtime,
            recorder: None,
        }
    }

    /// Attaches the optional result recorder.
    pub fn with_recorder(mut self, recorder: RecordResultHandler) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Resolves one utterance and returns the caller-visible envelope.
    ///
    /// Exactly one runtime call, no retry. The branch:
    /// - runtime error -> `Failed` -> 500 with the rendered error;
    /// - reply with at least one message -> `Resolved` -> 200 with the
    ///   first message's content;
    /// - reply with no messages -> `Unresolved` -> 408 with the serialized
    ///   raw reply.
    ///
    /// On the resolved path the recorder (when configured) runs to
    /// completion before the envelope is returned, but its outcome is
    /// discarded here, at this single call site; a failed write is logged
    /// and the caller still sees the resolved envelope.
    pub async fn handle(&self, request: UtteranceRequest) -> ResponseEnvelope {
        tracing::info!(
            message_id = %request.message_id,
            session_id = %request.session_id,
            text = %request.text,
            "resolving utterance"
        );

        let outcome = match self.runtime.recognize_text(&request).await {
            Ok(reply) => {
                tracing::debug!(
                    message_id = %request.message_id,
                    raw = %reply.raw,
                    "runtime reply received"
                );
                match reply.first_message() {
                    Some(message) => ResolutionOutcome::resolved(message),
                    None => ResolutionOutcome::unresolved(reply.raw),
                }
            }
            Err(err) => {
                tracing::warn!(
                    message_id = %request.message_id,
                    error = %err,
                    "runtime call failed"
                );
                ResolutionOutcome::failed(err.to_string())
            }
        };

        if let ResolutionOutcome::Resolved { message } = &outcome {
            if let Some(recorder) = &self.recorder {
                if let Err(err) = recorder.record(&request.message_id, message).await {
                    tracing::warn!(
                        message_id = %request.message_id,
                        error = %err,
                        "failed to record resolved reply"
                    );
                }
            }
        }

        let envelope = outcome.into_envelope();
        tracing::info!(
            message_id = %request.message_id,
            status_code = envelope.status_code,
            "resolution complete"
        );
        envelope
    }
}
