//! Application handlers - the two-step resolution pipeline.

mod record_result;
mod resolve_utterance;

pub use record_result::{RecordResultHandler, DEFAULT_RESULT_TTL_SECS};
pub use resolve_utterance::ResolveUtteranceHandler;
