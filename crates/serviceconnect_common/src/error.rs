// --- File: crates/serviceconnect_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all ServiceConnect errors.
///
/// Domain crates convert their own errors into this type at the HTTP
/// boundary, where [`HttpStatusCode`] picks the response status.
#[derive(Error, Debug)]
pub enum ServiceConnectError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation of client input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to a conflict (e.g., slot already taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The requested feature is switched off in the runtime configuration
    #[error("Feature disabled: {0}")]
    FeatureDisabled(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ServiceConnectError {
    fn status_code(&self) -> u16 {
        match self {
            ServiceConnectError::ParseError(_) => 400,
            ServiceConnectError::ConfigError(_) => 500,
            ServiceConnectError::ValidationError(_) => 400,
            ServiceConnectError::ConflictError(_) => 409,
            ServiceConnectError::NotFoundError(_) => 404,
            ServiceConnectError::FeatureDisabled(_) => 503,
            ServiceConnectError::InternalError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for ServiceConnectError {
    fn from(err: serde_json::Error) -> Self {
        ServiceConnectError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ServiceConnectError {
    fn from(err: std::io::Error) -> Self {
        ServiceConnectError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> ServiceConnectError {
    ServiceConnectError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> ServiceConnectError {
    ServiceConnectError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> ServiceConnectError {
    ServiceConnectError::ConflictError(message.to_string())
}

pub fn feature_disabled<T: fmt::Display>(message: T) -> ServiceConnectError {
    ServiceConnectError::FeatureDisabled(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> ServiceConnectError {
    ServiceConnectError::InternalError(message.to_string())
}
