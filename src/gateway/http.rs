//! OpenAI-compatible chat-completions client.
//!
//! Sends a single user message and reads `choices[0].message.content` from a
//! non-streaming response. Retries are left to the caller.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use super::{GatewayError, GenerationParams, ModelGateway};
use crate::config::AppConfig;

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str, params: GenerationParams) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_output_tokens,
            stream: false,
        }
    }
}

/// Pull the generated text out of a chat-completions response body.
pub fn extract_content(body: &serde_json::Value) -> Result<String, GatewayError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or(GatewayError::MalformedResponse)
}

pub struct HttpGateway {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("endpoint", &self.endpoint)
            .field("has_api_token", &self.api_token.is_some())
            .finish()
    }
}

impl HttpGateway {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
            api_token: api_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.gateway.endpoint.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.gateway.timeout_seconds),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }
}

#[async_trait]
impl ModelGateway for HttpGateway {
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GatewayError> {
        let token = self.api_token.as_deref().ok_or(GatewayError::Unconfigured)?;
        let payload = ChatRequest::new(model_id, prompt, params);

        log::debug!("POST {} (model {})", self.endpoint, model_id);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::remote(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::remote(
                Some(status.as_u16()),
                format!("Hugging Face Router API error: {body}"),
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|_| GatewayError::MalformedResponse)?;
        extract_content(&body)
    }
}
