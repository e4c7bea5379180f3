//! Ports: capability traits the dialogue engine consumes.

mod ai_responder;
mod session_store;
mod ticket_service;

pub use ai_responder::{AiError, AiResponder};
pub use session_store::{SessionStore, SessionStoreError};
pub use ticket_service::{TicketError, TicketService};
