//! Ports - trait seams between the pipeline and its external collaborators.

mod nlu_runtime;
mod result_store;

pub use nlu_runtime::{NluError, NluRuntime, RecognizedReply, ReplyMessage};
pub use result_store::{ResultStore, StoreError, StoredResult};
