use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChefError {
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Too many requests for session {session_id}")]
    RateLimitExceeded { session_id: String },
    #[error("Upstream completion failed: {0}")]
    Upstream(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ChefError>;
