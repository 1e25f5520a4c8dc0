//! Application state shared across all handlers.

use crate::service::{ChatService, CompletionSettings};
use chef_core::{Clock, SystemClock};
use chef_llm::CompletionClient;
use chef_session::SessionStore;
use std::sync::Arc;

/// Version reported by the status endpoint.
pub const API_VERSION: &str = "3.1";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionClient>, settings: CompletionSettings) -> Self {
        Self::with_parts(Arc::new(SessionStore::new()), completion, Arc::new(SystemClock), settings)
    }

    pub fn with_parts(
        store: Arc<SessionStore>,
        completion: Arc<dyn CompletionClient>,
        clock: Arc<dyn Clock>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            chat: Arc::new(ChatService::new(store, completion, clock, settings)),
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.chat.store().size()
    }
}
