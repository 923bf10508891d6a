//! Client error types

use shared::models::OrderStatus;
use thiserror::Error;

use crate::dispatch::OrderAction;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend returned a non-success envelope
    #[error("Backend error {code}: {message}")]
    Backend { code: String, message: String },

    /// Order action not permitted from the current status.
    /// Rejected before any network call is made.
    #[error("Cannot {action} an order in status {from}")]
    InvalidTransition { from: OrderStatus, action: OrderAction },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
