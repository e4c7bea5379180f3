//! AI fallback responder port.
//!
//! Consulted only when no classifier rule matches a message; produces some
//! conversational text for the turn.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the fallback responder.
#[derive(Debug, Clone, Error)]
pub enum AiError {
    #[error("AI responder unavailable: {0}")]
    Unavailable(String),
}

/// Port for generic fallback text generation.
#[async_trait]
pub trait AiResponder: Send + Sync {
    /// Generates a reply to an unclassified message.
    async fn generate_response(&self, message: &str) -> Result<String, AiError>;
}
