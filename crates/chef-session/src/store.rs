use super::{Session, SessionLimits};
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Exclusive per-session access for the duration of one request.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Owns every live session. The map itself is never exposed.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_limits(SessionLimits::default())
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            limits,
        }
    }

    pub fn limits(&self) -> &SessionLimits {
        &self.limits
    }

    /// Return the session for `id`, creating it if absent. Concurrent callers
    /// with the same id always receive the same handle.
    pub fn get_or_create(&self, id: &str, now: DateTime<Utc>) -> SessionHandle {
        if let Some(handle) = self.sessions.read().get(id) {
            return Arc::clone(handle);
        }

        let mut map = self.sessions.write();
        let handle = map.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(session_id = %id, "creating session");
            Arc::new(Mutex::new(Session::new(id, now, &self.limits)))
        });
        Arc::clone(handle)
    }

    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().get(id).cloned()
    }

    /// Clone of the session state, for inspection.
    pub fn snapshot(&self, id: &str) -> Option<Session> {
        self.get(id).map(|h| h.lock().clone())
    }

    /// Returns true if a session was removed.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    /// Evict sessions idle for longer than `timeout`. Sessions with a handle
    /// outstanding (fetched or locked by an in-flight request) are kept.
    pub fn sweep(&self, now: DateTime<Utc>, timeout: Duration) -> usize {
        let mut map = self.sessions.write();
        let before = map.len();
        map.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Some(session) => !session.is_idle(now, timeout),
                None => true,
            }
        });
        before - map.len()
    }

    pub fn size(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
