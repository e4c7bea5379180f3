//! Session store port.
//!
//! Maps session ids to `(intent, context)` state between turns. The router
//! owns the store and serializes access per session id; implementations only
//! need plain get/put semantics.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionState;

/// Errors from the session store.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for per-session state persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the state for a session, or the empty default if the session
    /// is unknown (or was evicted).
    async fn get(&self, id: &SessionId) -> Result<SessionState, SessionStoreError>;

    /// Replaces the state for a session wholesale.
    async fn put(&self, id: &SessionId, state: SessionState) -> Result<(), SessionStoreError>;
}
