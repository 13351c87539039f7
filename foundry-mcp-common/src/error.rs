//! Error types for the common library.
//!
//! This module provides a unified error hierarchy using `thiserror` so every
//! failure on the tool path can be turned into a descriptive message at the
//! handler boundary.
//!
//! # Error Categories
//!
//! - `ConfigError`: Missing or invalid configuration, including credentials
//! - `StorageError`: Blob storage operations
//! - `Error::Api`: Image service errors (includes endpoint and status)
//! - `Error::Validation`: Input validation failures
//! - `Error::Client`: The image client could not be constructed

use thiserror::Error;

/// Unified error type for the common library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (invalid values, missing credentials)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Blob storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// API errors with endpoint and HTTP status context
    ///
    /// A status code of `0` means the request never produced a response
    /// (connection failure, timeout).
    #[error("API error for {endpoint} (HTTP {status_code}): {message}")]
    Api {
        /// The API endpoint that was called
        endpoint: String,
        /// HTTP status code returned by the API
        status_code: u16,
        /// Error message from the API or describing the failure
        message: String,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external image client is unavailable
    #[error("Image client not available: {0}")]
    Client(String),
}

impl Error {
    /// Create a new API error with endpoint, status code, and message.
    ///
    /// # Example
    ///
    /// ```
    /// use foundry_mcp_common::error::Error;
    ///
    /// let err = Error::api(
    ///     "https://example.openai.azure.com/openai/deployments/flux-pro-2/images/generations",
    ///     429,
    ///     "Rate limit exceeded"
    /// );
    /// assert!(err.to_string().contains("flux-pro-2"));
    /// assert!(err.to_string().contains("429"));
    /// ```
    pub fn api(endpoint: impl Into<String>, status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            endpoint: endpoint.into(),
            status_code,
            message: message.into(),
        }
    }

    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```
    /// use foundry_mcp_common::error::Error;
    ///
    /// let err = Error::validation("prompt cannot be empty");
    /// assert!(err.to_string().contains("prompt cannot be empty"));
    /// ```
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Create a new client-unavailable error.
    pub fn client(message: impl Into<String>) -> Self {
        Error::Client(message.into())
    }

    /// Whether the error was caused by the caller's input rather than the
    /// environment or an upstream service.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Configuration errors.
///
/// These errors occur when loading configuration from environment variables
/// or when a tool call needs a value that was never configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Endpoint and/or API key for the image service are absent
    #[error("Azure OpenAI credentials not configured (missing: {})", .0.join(", "))]
    MissingCredentials(Vec<String>),
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Storage operation type for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    /// Upload operation
    Upload,
}

impl std::fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageOperation::Upload => write!(f, "upload"),
        }
    }
}

/// Blob storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A storage operation failed with context about the path and operation type
    #[error("Blob {operation} failed for {path}: {message}")]
    OperationFailed {
        /// The blob path that was being accessed
        path: String,
        /// The type of operation that failed
        operation: StorageOperation,
        /// Error message describing the failure
        message: String,
    },
}

impl StorageError {
    /// Create a new operation failed error with full context.
    ///
    /// # Example
    ///
    /// ```
    /// use foundry_mcp_common::error::{StorageError, StorageOperation};
    ///
    /// let err = StorageError::operation_failed(
    ///     "fluxjob/agentvideo/v1/img-v1-scene0-talk0.png",
    ///     StorageOperation::Upload,
    ///     "Failed with status 403 Forbidden"
    /// );
    /// assert!(err.to_string().contains("fluxjob/agentvideo"));
    /// assert!(err.to_string().contains("upload"));
    /// ```
    pub fn operation_failed(
        path: impl Into<String>,
        operation: StorageOperation,
        message: impl Into<String>,
    ) -> Self {
        StorageError::OperationFailed {
            path: path.into(),
            operation,
            message: message.into(),
        }
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
