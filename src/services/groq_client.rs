// src/services/groq_client.rs
//! Client for Groq's OpenAI-compatible chat-completions endpoint.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::UpstreamError;

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
const MODELS_PATH: &str = "/openai/v1/models";
const RETRY_DELAY: Duration = Duration::from_millis(50);

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GroqClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            timeout,
        }
    }

    /// `None` when no credential is configured.
    pub fn from_config(http: reqwest::Client, config: &Config) -> Option<Self> {
        let api_key = config.groq_api_key.as_ref()?;
        Some(Self::new(
            http,
            config.groq_base_url.clone(),
            api_key.clone(),
            config.groq_model.clone(),
            config.upstream_timeout,
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one completion request, retrying once if the first attempt fails transiently.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: 1.0,
            stream: false,
        };

        match self.attempt(&body).await {
            Err(err) if err.is_transient() => {
                warn!(error = %err, "Provider call failed, retrying once");
                tokio::time::sleep(RETRY_DELAY).await;
                self.attempt(&body).await
            }
            other => other,
        }
    }

    async fn attempt(&self, body: &CompletionRequest<'_>) -> Result<String, UpstreamError> {
        let url = format!("{}{}", self.base_url, COMPLETIONS_PATH);
        let started = Instant::now();

        let call = async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            let status = response.status();
            if status.as_u16() == 429 {
                return Err(UpstreamError::RateLimited);
            }
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read error body".to_string());
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: CompletionResponse = response.json().await.map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(self.timeout.as_millis())
                } else {
                    UpstreamError::InvalidResponse(e.to_string())
                }
            })?;

            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|text| !text.trim().is_empty())
                .ok_or_else(|| UpstreamError::InvalidResponse("no completion text".to_string()))
        };

        let result = tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(UpstreamError::Timeout(self.timeout.as_millis())));

        debug!(
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis(),
            ok = result.is_ok(),
            "Provider attempt finished"
        );
        result
    }

    /// Cheap reachability check used by the AI health endpoint. No retry.
    pub async fn probe(&self) -> Result<(), UpstreamError> {
        let url = format!("{}{}", self.base_url, MODELS_PATH);
        let call = async {
            let response = self
                .http
                .get(&url)
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            match response.status().as_u16() {
                429 => Err(UpstreamError::RateLimited),
                s if (200..300).contains(&s) => Ok(()),
                s => Err(UpstreamError::Status {
                    status: s,
                    body: String::new(),
                }),
            }
        };

        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(UpstreamError::Timeout(self.timeout.as_millis())))
    }

    fn transport_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout.as_millis())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}
