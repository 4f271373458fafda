//! Application configuration.
//!
//! Defaults, then an optional `.code-assist.toml`, then environment variables.
//! The API token is only ever taken from the environment.
//!
//! ```toml
//! [cache]
//! ttl_seconds = 45
//! max_items = 200
//!
//! [models]
//! qwen3 = "Qwen/Qwen2.5-Coder-7B-Instruct"
//! deepseek = "deepseek-ai/DeepSeek-Coder-V2-Lite-Instruct"
//!
//! [gateway]
//! endpoint = "https://router.huggingface.co/v1/chat/completions"
//! timeout_seconds = 60
//! temperature = 0.2
//! max_output_tokens = 512
//! ```

mod core;
mod loader;

pub use self::core::{
    AppConfig, CacheConfig, GatewayConfig, ModelsConfig, ENV_API_TOKEN, ENV_CACHE_MAX_ITEMS,
    ENV_CACHE_TTL, ENV_DEEPSEEK_MODEL, ENV_QWEN3_MODEL,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
