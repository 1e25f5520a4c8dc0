//! Per-message orchestration: sweep, resolve session, rate check, append the
//! user turn, call the completion client, append the assistant turn.
//!
//! Session locks are only held for the synchronous bookkeeping steps, never
//! across the completion call.

use chef_core::{ChefError, Clock, Turn};
use chef_llm::{CompletionClient, CompletionError, CompletionRequest};
use chef_session::{SessionReaper, SessionStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Model parameters fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl CompletionSettings {
    pub fn from_config(cfg: &chef_core::config::CompletionConfig) -> Self {
        Self {
            model: cfg.model.clone(),
            system_prompt: chef_llm::SYSTEM_PROMPT.to_string(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::from_config(&chef_core::ChefConfig::default().completion)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

pub struct ChatService {
    store: Arc<SessionStore>,
    reaper: SessionReaper,
    completion: Arc<dyn CompletionClient>,
    clock: Arc<dyn Clock>,
    settings: CompletionSettings,
}

impl ChatService {
    pub fn new(
        store: Arc<SessionStore>,
        completion: Arc<dyn CompletionClient>,
        clock: Arc<dyn Clock>,
        settings: CompletionSettings,
    ) -> Self {
        let reaper = SessionReaper::new(store.limits().idle_timeout);
        Self { store, reaper, completion, clock, settings }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub async fn chat(&self, session_id: &str, message: &str) -> Result<ChatReply, ChefError> {
        let now = self.clock.now();
        self.reaper.run(&self.store, now);

        let message = message.trim();
        if message.is_empty() {
            return Err(ChefError::EmptyMessage);
        }
        let session_id = session_id.trim();

        let handle = self.store.get_or_create(session_id, now);
        let turns = {
            let mut session = handle.lock();
            if let Err(e) = session.admit(now, self.store.limits()) {
                tracing::warn!(session_id, count = session.request_count(), "rate limit exceeded");
                return Err(e);
            }
            session.history.append(Turn::user(message));
            session.history.to_vec()
        };

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system_prompt: self.settings.system_prompt.clone(),
            turns,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let outcome = tokio::time::timeout(self.settings.timeout, self.completion.complete(request))
            .await
            .unwrap_or_else(|_| Err(CompletionError::Timeout(self.settings.timeout.as_secs())));
        let completion = match outcome {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(session_id, provider = self.completion.name(), error = %e, "completion failed");
                return Err(ChefError::Upstream(e.to_string()));
            }
        };

        handle.lock().history.append(Turn::assistant(completion.content.clone()));

        Ok(ChatReply {
            response: completion.content,
            session_id: session_id.to_string(),
            timestamp: now,
        })
    }
}
