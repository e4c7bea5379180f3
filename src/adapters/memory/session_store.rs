//! In-memory session store with idle-TTL eviction.
//!
//! Process-lifetime storage: nothing survives a restart. Entries idle longer
//! than the configured TTL are treated as absent, checked lazily on access
//! and reclaimed by a periodic sweep so abandoned conversations do not pile
//! up for the life of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionState;
use crate::ports::{SessionStore, SessionStoreError};

struct Entry {
    state: SessionState,
    last_seen: Instant,
}

/// In-memory implementation of [`SessionStore`].
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    idle_ttl: Duration,
}

impl InMemorySessionStore {
    /// Creates a store whose entries expire after `idle_ttl` without access.
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Removes every expired entry, returning how many were evicted.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        evicted
    }

    /// Number of live (non-expired) sessions.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|e| e.last_seen.elapsed() < self.idle_ttl)
            .count()
    }

    /// True if no live session exists.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Spawns a background task sweeping expired entries every `interval`.
    pub fn spawn_sweeper(store: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                store.evict_idle().await;
            }
        })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<SessionState, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(id) {
            Some(entry) if entry.last_seen.elapsed() < self.idle_ttl => {
                Ok(entry.state.clone())
            }
            Some(_) => {
                // Expired: drop it now and report a fresh session.
                sessions.remove(id);
                Ok(SessionState::empty())
            }
            None => Ok(SessionState::empty()),
        }
    }

    async fn put(&self, id: &SessionId, state: SessionState) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            *id,
            Entry {
                state,
                last_seen: Instant::now(),
            },
        );
        Ok(())
    }
}
