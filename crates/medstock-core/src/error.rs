//! Error types for the MedStock catalog engine.
//!
//! Collaborator failures (store reads/writes, mail sends) stay locally
//! recoverable: nothing here escalates to a process-level fatal condition.

use thiserror::Error;

/// Main error type for MedStock operations.
#[derive(Debug, Error)]
pub enum MedstockError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    // Document store errors
    #[error("Store error ({collection}): {message}")]
    Store {
        collection: String,
        message: String,
    },

    #[error("Document not found: {collection}/{id}")]
    DocumentNotFound { collection: String, id: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    // Export errors
    #[error("Nothing to export: the filtered result set is empty")]
    ExportEmpty,

    // Mail errors
    #[error("Mail delivery failed: {message}")]
    Mail { message: String },

    // Identity errors
    #[error("Sign-in failed: {message}")]
    SignIn { message: String },

    #[error("Admin privileges required")]
    NotAdmin,

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for MedStock operations.
pub type Result<T> = std::result::Result<T, MedstockError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for MedstockError {
    fn from(err: serde_json::Error) -> Self {
        MedstockError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for MedstockError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MedstockError::Timeout(crate::config::NetworkConfig::REQUEST_TIMEOUT)
        } else {
            MedstockError::Network {
                message: err.to_string(),
                cause: Some(err.to_string()),
            }
        }
    }
}

impl MedstockError {
    /// Create a store error with collection context.
    pub fn store(collection: impl Into<String>, message: impl Into<String>) -> Self {
        MedstockError::Store {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MedstockError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for failures the user can fix by simply retrying the action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MedstockError::Network { .. }
                | MedstockError::Timeout(_)
                | MedstockError::Store { .. }
                | MedstockError::Mail { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MedstockError::DocumentNotFound {
            collection: "products".into(),
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "Document not found: products/abc123");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(MedstockError::Timeout(std::time::Duration::from_secs(5)).is_retryable());
        assert!(!MedstockError::ExportEmpty.is_retryable());
        assert!(!MedstockError::NotAdmin.is_retryable());
    }
}
