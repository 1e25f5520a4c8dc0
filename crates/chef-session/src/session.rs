use chef_core::{ChefError, Turn};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub const MAX_HISTORY_LENGTH: usize = 8;
pub const SESSION_TIMEOUT_MINUTES: i64 = 30;
pub const MAX_REQUESTS_PER_MINUTE: u32 = 15;
pub const RATE_WINDOW_SECS: i64 = 60;

/// Tunables for history size, rate limiting and idle expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_history: usize,
    pub max_requests_per_window: u32,
    pub rate_window: Duration,
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY_LENGTH,
            max_requests_per_window: MAX_REQUESTS_PER_MINUTE,
            rate_window: Duration::seconds(RATE_WINDOW_SECS),
            idle_timeout: Duration::minutes(SESSION_TIMEOUT_MINUTES),
        }
    }
}

/// Bounded FIFO of turns, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryBuffer {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a turn, dropping from the front until within capacity.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Owned copy in order, for handing to the completion client.
    pub fn to_vec(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }
}

/// Fixed-width request counter. The window is only rolled when a request
/// arrives, never by a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    pub request_count: u32,
    pub window_start: DateTime<Utc>,
}

impl RateWindow {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { request_count: 0, window_start: now }
    }

    /// Roll the window if it has expired, then count the request if there is
    /// quota left. Returns false (and changes nothing else) when over quota.
    pub fn try_admit(&mut self, now: DateTime<Utc>, max: u32, window: Duration) -> bool {
        if now - self.window_start > window {
            self.request_count = 0;
            self.window_start = now;
        }
        if self.request_count >= max {
            return false;
        }
        self.request_count += 1;
        true
    }
}

/// State for one conversation, keyed by a caller-supplied id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub history: HistoryBuffer,
    pub rate: RateWindow,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, now: DateTime<Utc>, limits: &SessionLimits) -> Self {
        Self {
            id: id.into(),
            history: HistoryBuffer::new(limits.max_history),
            rate: RateWindow::new(now),
            created_at: now,
            last_activity: now,
        }
    }

    /// Apply the rate limit. An admitted request bumps `last_activity`;
    /// a rejected one leaves the session untouched apart from a window roll.
    pub fn admit(&mut self, now: DateTime<Utc>, limits: &SessionLimits) -> Result<(), ChefError> {
        if !self
            .rate
            .try_admit(now, limits.max_requests_per_window, limits.rate_window)
        {
            return Err(ChefError::RateLimitExceeded { session_id: self.id.clone() });
        }
        self.last_activity = now;
        Ok(())
    }

    pub fn request_count(&self) -> u32 {
        self.rate.request_count
    }

    pub fn window_start(&self) -> DateTime<Utc> {
        self.rate.window_start
    }

    pub fn is_idle(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.last_activity > timeout
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Session(id={}, turns={}, requests={})",
            self.id,
            self.history.len(),
            self.rate.request_count
        )
    }
}
