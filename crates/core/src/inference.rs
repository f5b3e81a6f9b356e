use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::{Role, Turn};

/// Sampling temperature applied to every request.
pub const TEMPERATURE: f32 = 0.5;

/// Upper bound on a single generation request. A hung backend fails the
/// exchange instead of blocking the session forever.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    role: Role,
    #[serde(default)]
    content: Option<String>,
}

/// One complete reply per call. No streaming and no retry; every
/// failure surfaces as [`ChatError::InferenceUnavailable`].
#[async_trait]
pub trait InferenceClient {
    async fn generate(&self, prompt: &[Turn]) -> Result<String, ChatError>;
}

/// Client for Ollama's `/api/chat` endpoint.
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, prompt: &[Turn]) -> Result<String, ChatError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: prompt,
            stream: false,
            options: ChatOptions {
                temperature: TEMPERATURE,
            },
        };

        tracing::debug!(model = %self.model, turns = prompt.len(), "sending chat request");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::InferenceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatError::InferenceUnavailable(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InferenceUnavailable(format!("malformed reply: {}", e)))?;

        tracing::debug!(role = ?body.message.role, "received reply");

        Ok(body.message.content.unwrap_or_default())
    }
}
