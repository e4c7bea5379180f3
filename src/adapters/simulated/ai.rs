//! Canned fallback responder.
//!
//! Answers unclassified messages with one of a small set of generic
//! Portuguese replies, picked at random. A real deployment would put an LLM
//! behind the same port.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::ports::{AiError, AiResponder};

const GENERIC_RESPONSES: &[&str] = &[
    "Interessante. Conte-me mais!",
    "Entendo.",
    "Hmm, isso é algo para se pensar.",
    "Não tenho certeza sobre isso, mas posso ajudar com passagens aéreas.",
    "Que tal falarmos sobre viagens? Posso buscar voos para você.",
    "Isso foge um pouco da minha especialidade, que é passagens aéreas.",
    "Legal!",
];

/// Simulated implementation of [`AiResponder`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedAiResponder;

impl CannedAiResponder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AiResponder for CannedAiResponder {
    async fn generate_response(&self, message: &str) -> Result<String, AiError> {
        let response = GENERIC_RESPONSES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("Entendo.");
        debug!(message, response, "canned fallback response");
        Ok(response.to_string())
    }
}
