//! Error types for LavvieBot API calls.
//!
//! Every failure surfaces as a distinct [`LavviebotError`] variant so callers
//! can react differently to each:
//!
//! - [`LavviebotError::Auth`]: bad credentials or cookie-stage failure, prompt re-login
//! - [`LavviebotError::RateLimited`]: the service is throttling, slow down polling
//! - [`LavviebotError::Api`]: any other GraphQL error, log and skip
//! - [`LavviebotError::Transport`]: non-2xx response or unreadable body
//! - [`LavviebotError::Network`]: connection failure or timeout
//! - [`LavviebotError::UnexpectedResponse`]: `data` did not have the expected shape
//! - [`LavviebotError::Config`]: the client could not be built
//!
//! # Example
//!
//! ```rust,ignore
//! use lavviebot_api::LavviebotError;
//!
//! match client.fetch_data().await {
//!     Ok(data) => println!("{} litter boxes", data.litter_boxes.len()),
//!     Err(LavviebotError::RateLimited { .. }) => { /* poll less often */ }
//!     Err(LavviebotError::Auth { message }) => eprintln!("login rejected: {message}"),
//!     Err(other) => eprintln!("poll failed: {other}"),
//! }
//! ```

use thiserror::Error;

use crate::error::ConfigError;

/// Error returned when the service answers with a non-2xx status or a body
/// that cannot be read as JSON.
///
/// # Example
///
/// ```rust
/// use lavviebot_api::clients::TransportError;
///
/// let error = TransportError {
///     code: 502,
///     body: "Bad Gateway".to_string(),
/// };
/// assert_eq!(error.to_string(), "LavvieBot API error 502: Bad Gateway");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("LavvieBot API error {code}: {body}")]
pub struct TransportError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
}

/// Unified error type for all LavvieBot API operations.
#[derive(Debug, Error)]
pub enum LavviebotError {
    /// Authentication failed: the cookie could not be obtained or the
    /// service rejected the credentials. Never retried.
    #[error("Authentication failed: {message}")]
    Auth {
        /// The server-supplied message, verbatim where one exists.
        message: String,
    },

    /// The service reported that requests are being throttled.
    #[error("Rate limited by the PurrSong API: {message}")]
    RateLimited {
        /// The server-supplied message.
        message: String,
        /// The HTTP status code the message arrived with.
        status: u16,
    },

    /// The service returned a GraphQL error.
    #[error("PurrSong API error: {message}")]
    Api {
        /// The server-supplied message, verbatim.
        message: String,
    },

    /// Non-2xx response or unreadable body.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response `data` did not match the expected shape.
    #[error("Unexpected response to {operation}: {message}")]
    UnexpectedResponse {
        /// The GraphQL operation name.
        operation: String,
        /// What was wrong with the response.
        message: String,
    },

    /// The client could not be built from its configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LavviebotError {
    pub(crate) fn unexpected(operation: &str, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
