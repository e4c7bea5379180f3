//! Inbound/outbound message envelopes for the dialogue engine.

use serde::{Deserialize, Serialize};

use crate::domain::flight::{Flight, Reservation};
use crate::domain::foundation::{SessionId, UserId};

/// One inbound user turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: UserId,
    pub message: String,
    /// Absent on the first turn; the engine mints one and returns it.
    pub session_id: Option<SessionId>,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<UserId>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            session_id: None,
        }
    }

    /// Continues an existing conversation.
    pub fn in_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// The engine's reply for one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// Echo this back on the next turn to continue the conversation.
    pub session_id: SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_data: Option<ActionData>,
}

/// Structured payload accompanying certain replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ActionData {
    /// Search results, in presentation order.
    FlightList(Vec<Flight>),
    /// The flight the user just selected.
    SelectedFlight(Flight),
    /// The reservation created on confirmation.
    Reservation(Reservation),
}
