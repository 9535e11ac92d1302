//! HTTP adapter for the resolver endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, ResolveRequest};
pub use handlers::{health, resolve_utterance, ResolverAppState};
pub use routes::resolver_router;
