//! Chat-completion collaborator: the trait the chat service calls, and an
//! OpenAI-compatible HTTP client for Groq.

pub mod groq;
pub mod prompt;
pub mod traits;

pub use groq::GroqClient;
pub use prompt::SYSTEM_PROMPT;
pub use traits::{Completion, CompletionClient, CompletionError, CompletionRequest};
