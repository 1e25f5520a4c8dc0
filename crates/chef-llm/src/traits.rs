use async_trait::async_trait;
use chef_core::Turn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One completion call: persona prompt plus the retained conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub turns: Vec<Turn>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub content: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub latency_ms: u64,
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no completion within {0} seconds")]
    Timeout(u64),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;
}
