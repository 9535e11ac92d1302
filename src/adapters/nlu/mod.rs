//! NLU runtime adapters.

mod lex_http;
mod llm_endpoint;
mod mock;

pub use lex_http::{LexHttpRuntime, LexRuntimeConfig};
pub use llm_endpoint::{LlmEndpointConfig, LlmEndpointRuntime, SamplingParams};
pub use mock::{MockNluError, MockReply, MockRuntime};
