//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of a model-call gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// No credential is configured; raised before any network attempt
    #[error("model gateway is not configured: missing API token")]
    Unconfigured,

    /// The remote endpoint answered with an error, or could not be reached
    #[error("remote model error{}: {message}", status_suffix(.status))]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// The remote call succeeded but the payload had an unexpected shape
    #[error("unexpected response format from model endpoint")]
    MalformedResponse,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl GatewayError {
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Rate limiting (429) and service unavailable (503) earn one immediate retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Remote {
                status: Some(429 | 503),
                ..
            }
        )
    }
}

/// Errors surfaced by the cache-backed model endpoints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Required credential or setting is absent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream model call failed after the permitted retry
    #[error("Upstream model API error: {0}")]
    Upstream(String),

    /// Upstream answered but the response could not be interpreted
    #[error("Unexpected response format from upstream model API")]
    MalformedUpstreamResponse,
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unconfigured => {
                ServiceError::Configuration("HF_API_TOKEN not configured.".to_string())
            }
            GatewayError::Remote { message, .. } => ServiceError::Upstream(message),
            GatewayError::MalformedResponse => ServiceError::MalformedUpstreamResponse,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        assert!(GatewayError::remote(Some(429), "slow down").is_transient());
        assert!(GatewayError::remote(Some(503), "unavailable").is_transient());
        assert!(!GatewayError::remote(Some(500), "boom").is_transient());
        assert!(!GatewayError::remote(None, "connection refused").is_transient());
        assert!(!GatewayError::Unconfigured.is_transient());
        assert!(!GatewayError::MalformedResponse.is_transient());
    }

    #[test]
    fn test_remote_message_preserved_in_service_error() {
        let err: ServiceError = GatewayError::remote(Some(500), "model overloaded").into();
        assert_eq!(err, ServiceError::Upstream("model overloaded".to_string()));
    }

    #[test]
    fn test_unconfigured_maps_to_configuration() {
        let err: ServiceError = GatewayError::Unconfigured.into();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn test_remote_display_includes_status() {
        let err = GatewayError::remote(Some(502), "bad gateway");
        assert_eq!(err.to_string(), "remote model error (status 502): bad gateway");
        let err = GatewayError::remote(None, "timeout");
        assert_eq!(err.to_string(), "remote model error: timeout");
    }
}
