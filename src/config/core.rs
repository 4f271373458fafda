use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_MAX_ITEMS, DEFAULT_TTL_SECONDS};
use crate::core::ConfigError;
use crate::service::ModelChoice;

pub const ENV_API_TOKEN: &str = "HF_API_TOKEN";
pub const ENV_QWEN3_MODEL: &str = "QWEN3_MODEL";
pub const ENV_DEEPSEEK_MODEL: &str = "DEEPSEEK31_MODEL";
pub const ENV_CACHE_TTL: &str = "CODE_ASSIST_CACHE_TTL";
pub const ENV_CACHE_MAX_ITEMS: &str = "CODE_ASSIST_CACHE_MAX_ITEMS";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Bearer token for the model endpoint. Only ever read from the environment.
    #[serde(skip)]
    pub api_token: Option<String>,
}

/// Response cache sizing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Seconds an entry stays servable (default: 45)
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Maximum number of entries (default: 200)
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            max_items: default_max_items(),
        }
    }
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

/// Repository ids the model selectors resolve to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelsConfig {
    #[serde(default = "default_qwen3_model")]
    pub qwen3: String,

    #[serde(default = "default_deepseek_model")]
    pub deepseek: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            qwen3: default_qwen3_model(),
            deepseek: default_deepseek_model(),
        }
    }
}

fn default_qwen3_model() -> String {
    "Qwen/Qwen2.5-Coder-7B-Instruct".to_string()
}

fn default_deepseek_model() -> String {
    "deepseek-ai/DeepSeek-Coder-V2-Lite-Instruct".to_string()
}

/// Remote chat-completions endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_endpoint() -> String {
    "https://router.huggingface.co/v1/chat/completions".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_output_tokens() -> u32 {
    512
}

impl AppConfig {
    /// Resolve a model selector to the configured repository id.
    pub fn model_id(&self, choice: ModelChoice) -> &str {
        match choice {
            ModelChoice::Qwen3 => &self.models.qwen3,
            ModelChoice::DeepSeek31 => &self.models.deepseek,
        }
    }

    pub fn has_api_token(&self) -> bool {
        self.api_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Overlay values from an environment lookup.
    ///
    /// Takes the lookup as a closure so callers can test it without touching
    /// process environment variables.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|t| !t.is_empty()) {
            self.api_token = Some(token);
        }
        if let Some(model) = lookup(ENV_QWEN3_MODEL).filter(|m| !m.is_empty()) {
            self.models.qwen3 = model;
        }
        if let Some(model) = lookup(ENV_DEEPSEEK_MODEL).filter(|m| !m.is_empty()) {
            self.models.deepseek = model;
        }
        if let Some(ttl) = lookup(ENV_CACHE_TTL) {
            self.cache.ttl_seconds = parse_env_number(ENV_CACHE_TTL, &ttl)?;
        }
        if let Some(max) = lookup(ENV_CACHE_MAX_ITEMS) {
            self.cache.max_items = parse_env_number(ENV_CACHE_MAX_ITEMS, &max)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.max_items == 0 {
            return Err(ConfigError::Invalid(
                "cache.max_items must be at least 1".to_string(),
            ));
        }
        let temperature = self.gateway.temperature;
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gateway.temperature must be a non-negative number, got {temperature}"
            )));
        }
        if self.gateway.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "gateway.endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a whole number, got '{value}'")))
}
