// Export modules for library usage
pub mod analysis;
pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod debt;
pub mod formatting;
pub mod gateway;
pub mod io;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    AnalysisResult, ConfigError, Finding, FunctionRecord, GatewayError, LintRule,
    RefactorSuggestion, ServiceError,
};

pub use crate::analysis::analyze;
pub use crate::cache::{cache_key, fingerprint, CacheNamespace, Clock, TtlCache};
pub use crate::config::{load_config, AppConfig};
pub use crate::debt::{find_duplicate_functions, find_lint_issues};
pub use crate::formatting::format_code;
pub use crate::gateway::{GenerationParams, HttpGateway, ModelGateway};
pub use crate::service::{AssistantService, ExplainResponse, InferResponse, ModelChoice};
