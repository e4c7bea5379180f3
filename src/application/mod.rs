//! Application layer: the dialogue router and its flow handlers.

mod envelope;
pub mod handlers;
mod router;

pub use envelope::{ActionData, ChatRequest, ChatResponse};
pub use router::{DialogueRouter, EngineError};
