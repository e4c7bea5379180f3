//! Dialogue router: the engine's entry point.
//!
//! Each inbound message resolves (or mints) a session, is classified into an
//! intent against the session's current state, and is dispatched to the
//! matching flow handler or the AI fallback; the handler's resulting state is
//! committed before the response envelope is returned.
//!
//! Turns for distinct sessions run concurrently, but the store's
//! read-modify-write of a session spans the whole handler body, so the
//! router holds a per-session-id mutex for the duration of a turn. At most
//! one turn per session is ever in flight.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info};

use super::envelope::{ChatRequest, ChatResponse};
use super::handlers::{
    confirm, passenger_count, passenger_details, search, select_flight, smalltalk,
    TicketClient, TurnOutcome,
};
use crate::domain::foundation::SessionId;
use crate::domain::nlu::IntentClassifier;
use crate::domain::session::Intent;
use crate::ports::{AiError, AiResponder, SessionStore, SessionStoreError, TicketService};

/// Reply used when the ticket service fails or times out mid-flow.
const SERVICE_APOLOGY: &str =
    "Desculpe, estamos com um problema técnico no momento. Por favor, tente \
     novamente em alguns instantes.";

/// Lock-map size above which stale per-session locks are reclaimed.
const LOCK_MAP_SWEEP_THRESHOLD: usize = 1024;

/// Failures the router surfaces to its caller.
///
/// Everything else (bad input, unknown flights, ticket-service hiccups inside
/// a booking flow) is resolved conversationally and never reaches here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] SessionStoreError),

    #[error(transparent)]
    AiService(#[from] AiError),
}

/// The dialogue engine.
pub struct DialogueRouter {
    classifier: Box<dyn IntentClassifier>,
    store: Arc<dyn SessionStore>,
    tickets: Arc<dyn TicketService>,
    ai: Arc<dyn AiResponder>,
    call_timeout: Duration,
    turn_locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl DialogueRouter {
    pub fn new(
        classifier: Box<dyn IntentClassifier>,
        store: Arc<dyn SessionStore>,
        tickets: Arc<dyn TicketService>,
        ai: Arc<dyn AiResponder>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            store,
            tickets,
            ai,
            call_timeout,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Processes one conversational turn.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` only for session-store failures or when the AI
    /// fallback itself fails; callers should map either to a generic
    /// internal-error response.
    pub async fn process_message(
        &self,
        request: ChatRequest,
    ) -> Result<ChatResponse, EngineError> {
        let session_id = request.session_id.unwrap_or_else(SessionId::new);
        let _turn = self.acquire_turn_lock(session_id).await;

        let state = self.store.get(&session_id).await?;
        let intent = self.classifier.classify(&request.message, state.intent);
        info!(
            %session_id,
            user_id = %request.user_id,
            current = ?state.intent,
            detected = ?intent,
            "processing message"
        );

        let tickets = TicketClient::new(self.tickets.as_ref(), self.call_timeout);
        let outcome = match intent {
            Intent::SearchFlights => search::handle(&tickets, &state, &request.message).await,
            Intent::BookFlight => {
                select_flight::handle(&tickets, &state, &request.message).await
            }
            Intent::WaitingForPassengerCount => {
                passenger_count::handle(&tickets, &state, &request.message).await
            }
            Intent::WaitingForPassengerDetails => {
                Ok(passenger_details::handle(&state, &request.message))
            }
            Intent::ConfirmReservation => {
                confirm::handle(&tickets, &state, &request.user_id, &request.message).await
            }
            Intent::Greeting => Ok(smalltalk::greeting()),
            Intent::Help => Ok(smalltalk::help()),
            // Waiting* never come back from the classifier; they share the
            // fallback arm for exhaustiveness.
            Intent::None
            | Intent::WaitingForFlightDetails
            | Intent::WaitingForFlightSelection => {
                let reply = self.generate_fallback(&request.message).await?;
                Ok(TurnOutcome::reset(reply))
            }
        };

        let outcome = outcome.unwrap_or_else(|err| {
            error!(%session_id, %err, "ticket service failed mid-flow");
            TurnOutcome::reset(SERVICE_APOLOGY)
        });

        self.store.put(&session_id, outcome.state).await?;
        info!(%session_id, response = %outcome.reply, "turn complete");

        Ok(ChatResponse {
            response: outcome.reply,
            session_id,
            action_data: outcome.action,
        })
    }

    async fn generate_fallback(&self, message: &str) -> Result<String, AiError> {
        tokio::time::timeout(self.call_timeout, self.ai.generate_response(message))
            .await
            .map_err(|_| AiError::Unavailable("request timed out".to_string()))?
    }

    /// Takes the per-session turn lock, creating it on first use.
    ///
    /// The map is swept of unused locks once it grows past a threshold so
    /// one-shot sessions do not leak entries forever.
    async fn acquire_turn_lock(&self, id: SessionId) -> OwnedMutexGuard<()> {
        let mut locks = self.turn_locks.lock().await;
        if locks.len() > LOCK_MAP_SWEEP_THRESHOLD {
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        let lock = locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        drop(locks);
        lock.lock_owned().await
    }
}
