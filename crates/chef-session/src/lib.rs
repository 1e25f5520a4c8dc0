//! Per-session conversation state: bounded history, rate limiting, idle expiry.

pub mod session;
pub mod store;
pub mod reaper;

pub use session::*;
pub use store::{SessionHandle, SessionStore};
pub use reaper::SessionReaper;
