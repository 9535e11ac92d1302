//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{MessageId, SessionId};
pub use timestamp::Timestamp;
