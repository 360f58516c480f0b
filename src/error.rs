//! Error types for the Behave API client.
//!
//! Failures fall into two groups: request errors (a single call to the API
//! failed at the network, HTTP or decoding level) and configuration errors
//! (the client or an operation was set up with invalid input and no request
//! was sent).

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Behave operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Behave API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: status={status}, code={code:?}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Optional error code from the API
        code: Option<String>,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The API token was rejected (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error, raised before any request is sent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if a request was attempted and failed.
    ///
    /// Pagination stops on the first such error; nothing is retried.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Json(_)
                | Error::Api { .. }
                | Error::Unauthorized(_)
                | Error::NotFound(_)
        )
    }

    /// Returns `true` if the operation was rejected before any request was sent.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_) | Error::UrlParse(_))
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Unauthorized(_) => true,
            Error::Api { status, .. } => *status == 403,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => (400..500).contains(status),
            Error::Unauthorized(_) | Error::NotFound(_) => true,
            Error::Config(_) | Error::UrlParse(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create an API error from a response body.
    ///
    /// The service reports errors either as a plain string in `error` or as
    /// an object carrying `code` and `message`.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let error = body.get("error");

        let code = error
            .and_then(|e| e.get("code"))
            .and_then(|c| match c {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });

        let message = error
            .and_then(|e| match e {
                Value::String(s) => Some(s.clone()),
                Value::Object(_) => e.get("message").and_then(|m| m.as_str()).map(String::from),
                _ => None,
            })
            .or_else(|| body.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| "Unknown API error".to_string());

        Error::Api {
            status,
            code,
            message,
            body,
        }
    }
}
