//! Idle-session eviction.
//!
//! There is no background ticker: the chat path calls [`SessionReaper::run`]
//! synchronously before handling each message, so an idle process keeps
//! expired sessions until the next request arrives.

use crate::store::SessionStore;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy)]
pub struct SessionReaper {
    timeout: Duration,
}

impl SessionReaper {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sweep `store` and return how many sessions were evicted.
    pub fn run(&self, store: &SessionStore, now: DateTime<Utc>) -> usize {
        let removed = store.sweep(now, self.timeout);
        if removed > 0 {
            tracing::info!(removed, remaining = store.size(), "evicted idle sessions");
        }
        removed
    }
}

impl Default for SessionReaper {
    fn default() -> Self {
        Self::new(crate::SessionLimits::default().idle_timeout)
    }
}
