//! Remote model access.
//!
//! The rest of the crate only depends on [`ModelGateway`]: given a model id, a
//! prompt and generation parameters, return generated text or a
//! [`GatewayError`]. Timeouts belong to the implementation.

pub mod http;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::GatewayConfig;
pub use crate::core::GatewayError;
pub use http::HttpGateway;

/// Sampling parameters forwarded to the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_output_tokens: 512,
        }
    }
}

impl From<&GatewayConfig> for GenerationParams {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generate text for `prompt` with the model identified by `model_id`.
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GatewayError>;
}

#[async_trait]
impl<G: ModelGateway + ?Sized> ModelGateway for Arc<G> {
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GatewayError> {
        (**self).invoke(model_id, prompt, params).await
    }
}
