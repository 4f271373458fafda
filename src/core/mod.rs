pub mod errors;
pub mod types;

pub use errors::{ConfigError, GatewayError, ServiceError, ServiceResult};
pub use types::{
    AnalysisResult, Finding, FunctionRecord, LintRule, RefactorSuggestion, GENERAL_SYMBOL,
};
