//! Domain error types
//!
//! This module defines the error hierarchy for Hermes. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Hermes error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum HermesError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Submission API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Staging database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Authentication errors (token acquisition)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Submission-API-specific errors
///
/// Errors raised by the HTTP transport and token client. These wrap the
/// underlying client failures so the HTTP crate never leaks upward;
/// non-2xx *submission* responses are not errors but per-record outcomes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the endpoint
    #[error("Failed to connect to API endpoint: {0}")]
    ConnectionFailed(String),

    /// Response body could not be read or decoded
    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Diagnostic call rejected by the server
    #[error("API rejected request: {status} - {message}")]
    Rejected { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for HermesError {
    fn from(err: std::io::Error) -> Self {
        HermesError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for HermesError {
    fn from(err: serde_json::Error) -> Self {
        HermesError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for HermesError {
    fn from(err: toml::de::Error) -> Self {
        HermesError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_connect() {
            ApiError::ConnectionFailed(err.to_string())
        } else {
            ApiError::InvalidResponse(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hermes_error_display() {
        let err = HermesError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::ConnectionFailed("Network error".to_string());
        let err: HermesError = api_err.into();
        assert!(matches!(err, HermesError::Api(_)));
    }

    #[test]
    fn test_api_rejected_display() {
        let err = ApiError::Rejected {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "API rejected request: 403 - forbidden");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: HermesError = io_err.into();
        assert!(matches!(err, HermesError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: HermesError = json_err.into();
        assert!(matches!(err, HermesError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: HermesError = toml_err.into();
        assert!(matches!(err, HermesError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_hermes_error_implements_std_error() {
        let err = HermesError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_api_error_implements_std_error() {
        let err = ApiError::Timeout("30s".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
