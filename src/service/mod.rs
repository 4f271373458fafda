//! Request-level operations.
//!
//! `explain` and `infer` go through the shared response cache and fall back to
//! the model gateway on a miss. `analyze` is computed locally every time.
//!
//! [`session`] exposes the service as a long-running JSON-lines loop so that
//! one cache instance serves every request for the life of the process.
//!
//! Two concurrent misses for the same key both call the gateway and both
//! store the result; requests are not coalesced. The cache lock is never held
//! while a gateway call is in flight.

pub mod model;
pub mod prompts;
pub mod session;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::analysis;
use crate::cache::{cache_key, CacheNamespace, CacheStats, TtlCache};
use crate::config::AppConfig;
use crate::core::{AnalysisResult, GatewayError, ServiceError, ServiceResult};
use crate::gateway::{GenerationParams, ModelGateway};

pub use model::ModelChoice;
pub use prompts::explain_prompt;
pub use session::{serve, Reply, Request};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferResponse {
    pub text: String,
}

/// Shared response cache type
pub type ResponseCache = TtlCache<String>;

pub struct AssistantService<G> {
    gateway: G,
    cache: Arc<ResponseCache>,
    config: AppConfig,
    params: GenerationParams,
}

impl<G: ModelGateway> AssistantService<G> {
    /// Build a service around an existing cache instance
    pub fn new(config: AppConfig, gateway: G, cache: Arc<ResponseCache>) -> Self {
        let params = GenerationParams::from(&config.gateway);
        Self {
            gateway,
            cache,
            config,
            params,
        }
    }

    /// Build a service with a new cache sized from the config
    pub fn with_config(config: AppConfig, gateway: G) -> Self {
        let cache = Arc::new(ResponseCache::new(
            config.cache.ttl_seconds,
            config.cache.max_items,
        ));
        Self::new(config, gateway, cache)
    }

    /// Explain and annotate a snippet with the selected model.
    pub async fn explain(&self, code: &str, model: ModelChoice) -> ServiceResult<ExplainResponse> {
        let explanation = self
            .cached_completion(CacheNamespace::Explain, model, code, || explain_prompt(code))
            .await?;
        Ok(ExplainResponse { explanation })
    }

    /// Run a free-form prompt through the selected model.
    pub async fn infer(&self, prompt: &str, model: ModelChoice) -> ServiceResult<InferResponse> {
        let text = self
            .cached_completion(CacheNamespace::Infer, model, prompt, || prompt.to_string())
            .await?;
        Ok(InferResponse { text })
    }

    /// Local static analysis; never touches the cache or the gateway.
    pub fn analyze(&self, code: &str) -> AnalysisResult {
        analysis::analyze(code)
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    async fn cached_completion<F>(
        &self,
        namespace: CacheNamespace,
        model: ModelChoice,
        input: &str,
        build_prompt: F,
    ) -> ServiceResult<String>
    where
        F: FnOnce() -> String,
    {
        let key = cache_key(namespace, model.as_str(), input);
        if let Some(text) = self.cache.get(&key) {
            return Ok(text);
        }

        let model_id = self.config.model_id(model);
        let prompt = build_prompt();
        let text = self.invoke_with_retry(model_id, &prompt).await?;

        // Only successful completions are stored
        self.cache.set(key, text.clone());
        Ok(text)
    }

    async fn invoke_with_retry(&self, model_id: &str, prompt: &str) -> Result<String, ServiceError> {
        let first = self.gateway.invoke(model_id, prompt, self.params).await;
        let result = match first {
            Err(err) if err.is_transient() => {
                log::warn!("Transient model error ({}), retrying once", err);
                self.gateway.invoke(model_id, prompt, self.params).await
            }
            other => other,
        };

        result.map_err(|err: GatewayError| {
            log::warn!("Model call to {} failed: {}", model_id, err);
            ServiceError::from(err)
        })
    }
}
