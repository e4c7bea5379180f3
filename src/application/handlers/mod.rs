//! Flow handlers, one per intent that owns a multi-turn sub-conversation.
//!
//! Each handler receives the current turn and produces a [`TurnOutcome`]:
//! the reply text, an optional structured payload, and the complete session
//! state to commit for the next turn. Invalid input re-prompts with the
//! state unchanged; external-service errors bubble up as `TicketError` and
//! the router translates them into a generic apology.

pub mod confirm;
pub mod passenger_count;
pub mod passenger_details;
pub mod search;
pub mod select_flight;
pub mod smalltalk;

use std::time::Duration;

use chrono::NaiveDate;

use crate::application::envelope::ActionData;
use crate::domain::flight::Flight;
use crate::domain::foundation::UserId;
use crate::domain::passenger::Passenger;
use crate::domain::session::{BookingContext, SessionContext, SessionState};
use crate::ports::{TicketError, TicketService};

/// What a flow handler produced for one turn.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    pub action: Option<ActionData>,
    pub state: SessionState,
}

impl TurnOutcome {
    /// A reply that moves the session to a new state.
    pub fn advance(reply: impl Into<String>, state: SessionState) -> Self {
        Self {
            reply: reply.into(),
            action: None,
            state,
        }
    }

    /// A re-prompt: same reply semantics, state carried over unchanged.
    pub fn stay(reply: impl Into<String>, state: SessionState) -> Self {
        Self::advance(reply, state)
    }

    /// A reply that ends the active flow and clears the context.
    pub fn reset(reply: impl Into<String>) -> Self {
        Self::advance(reply, SessionState::empty())
    }

    /// Attaches a structured payload to the outcome.
    pub fn with_action(mut self, action: ActionData) -> Self {
        self.action = Some(action);
        self
    }
}

/// Apology used when a session's stored context does not match its intent
/// (e.g. the context was evicted mid-flow). The flow restarts from scratch.
pub(crate) fn corrupt_context_outcome() -> TurnOutcome {
    TurnOutcome::reset(
        "Desculpe, ocorreu um erro com sua reserva e precisei recomeçar. \
         Me diga qual voo você procura (ex: 'buscar voo de São Paulo para \
         Rio de Janeiro em 28/05/2025').",
    )
}

/// Sanity guard shared by the booking handlers: the expected context
/// variant, or `None` when the stored context is not a booking.
pub(crate) fn booking_context(state: &SessionState) -> Option<&BookingContext> {
    match &state.context {
        SessionContext::Booking(ctx) => Some(ctx),
        _ => None,
    }
}

/// Ticket-service handle with every call bounded by a timeout.
///
/// The port calls are the only await points in a turn; bounding them here
/// keeps a hung inventory system from stalling the session forever.
pub struct TicketClient<'a> {
    inner: &'a dyn TicketService,
    timeout: Duration,
}

impl<'a> TicketClient<'a> {
    pub fn new(inner: &'a dyn TicketService, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, TicketError> {
        self.bounded(self.inner.search_flights(origin, destination, date))
            .await
    }

    pub async fn search_all_flights(&self) -> Result<Vec<Flight>, TicketError> {
        self.bounded(self.inner.search_all_flights()).await
    }

    pub async fn available_seats(&self, flight_number: &str) -> Result<u32, TicketError> {
        self.bounded(self.inner.available_seats(flight_number)).await
    }

    pub async fn book_flight(
        &self,
        flight_number: &str,
        user_id: &UserId,
        passengers: &[Passenger],
    ) -> Result<bool, TicketError> {
        self.bounded(self.inner.book_flight(flight_number, user_id, passengers))
            .await
    }

    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, TicketError>>,
    ) -> Result<T, TicketError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| TicketError::Unavailable("request timed out".to_string()))?
    }
}

/// Formats a price the way the prompts display fares.
pub(crate) fn format_price(price: f64) -> String {
    format!("R$ {:.2}", price)
}
