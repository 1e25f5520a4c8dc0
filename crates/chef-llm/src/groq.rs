//! Groq chat completions over its OpenAI-compatible endpoint.

use crate::traits::{Completion, CompletionClient, CompletionError, CompletionRequest};
use async_trait::async_trait;
use chef_core::config::CompletionConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| CompletionError::Config("API key is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let start = Instant::now();

        let mut messages = Vec::with_capacity(request.turns.len() + 1);
        messages.push(WireMessage {
            role: "system",
            content: &request.system_prompt,
        });
        messages.extend(request.turns.iter().map(|t| WireMessage {
            role: t.role.as_str(),
            content: &t.content,
        }));

        let body = WireRequest {
            model: &request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self.client.post(self.endpoint()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status: status.as_u16(), body });
        }

        let parsed: WireResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Malformed("no choices in response".into()))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| CompletionError::Malformed("choice has no content".into()))?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(model = %parsed.model, latency_ms, "completion received");

        Ok(Completion {
            content,
            model: parsed.model,
            finish_reason: choice.finish_reason,
            latency_ms,
        })
    }
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    model: String,
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}
