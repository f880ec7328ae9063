use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use session_core::Session;
use shared::domain::SessionId;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

pub(crate) type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegistryFull {
    pub(crate) capacity: usize,
}

struct Slot {
    handle: SessionHandle,
    last_seen: Instant,
}

/// One [`Session`] per connected client. Sessions never share state; the
/// per-session mutex serializes one client's interactions. A session not
/// looked up for `idle_timeout` is dropped on the next create.
#[derive(Clone)]
pub(crate) struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Slot>>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub(crate) fn new(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            idle_timeout,
        }
    }

    pub(crate) async fn create(&self) -> Result<(SessionId, SessionHandle), RegistryFull> {
        self.create_at(Instant::now()).await
    }

    pub(crate) async fn create_at(
        &self,
        now: Instant,
    ) -> Result<(SessionId, SessionHandle), RegistryFull> {
        let mut sessions = self.sessions.write().await;
        evict_idle(&mut sessions, now, self.idle_timeout);
        if sessions.len() >= self.max_sessions {
            return Err(RegistryFull {
                capacity: self.max_sessions,
            });
        }
        let id = SessionId::new();
        let handle = Arc::new(Mutex::new(Session::new()));
        sessions.insert(
            id,
            Slot {
                handle: handle.clone(),
                last_seen: now,
            },
        );
        info!(session_id = %id, live = sessions.len(), "session created");
        Ok((id, handle))
    }

    pub(crate) async fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.get_at(id, Instant::now()).await
    }

    /// Looks a session up and marks it as seen at `now`.
    pub(crate) async fn get_at(&self, id: SessionId, now: Instant) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id)?;
        slot.last_seen = now;
        Some(slot.handle.clone())
    }

    pub(crate) async fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "session discarded");
        }
        removed
    }

    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn evict_idle(sessions: &mut HashMap<SessionId, Slot>, now: Instant, idle_timeout: Duration) {
    let before = sessions.len();
    sessions.retain(|_, slot| now.saturating_duration_since(slot.last_seen) < idle_timeout);
    let evicted = before - sessions.len();
    if evicted > 0 {
        info!(evicted, live = sessions.len(), "idle sessions evicted");
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
