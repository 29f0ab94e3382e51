//! Configuration error types for the LavvieBot API client.
//!
//! Every validated configuration value returns `Result<T, ConfigError>` from
//! its constructor, so a bad email or endpoint is rejected before any request
//! is sent.
//!
//! # Example
//!
//! ```rust
//! use lavviebot_api::{ConfigError, Email};
//!
//! let result = Email::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidEmail { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The account email is empty or malformed.
    #[error("Invalid email '{email}'. Please provide the email used to sign in to the PurrSong app.")]
    InvalidEmail {
        /// The rejected email.
        email: String,
    },

    /// The account password is empty.
    #[error("Password cannot be empty. Please provide the PurrSong app account password.")]
    EmptyPassword,

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Expected an http or https URL (e.g., 'https://api.purrsong.co/purrsong').")]
    InvalidEndpointUrl {
        /// The rejected URL.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClient {
        /// Why the client could not be built.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_email_error_message() {
        let error = ConfigError::InvalidEmail {
            email: "not-an-email".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not-an-email"));
        assert!(message.contains("PurrSong app"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "password" };
        let message = error.to_string();
        assert!(message.contains("password"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_endpoint_error_message() {
        let error = ConfigError::InvalidEndpointUrl {
            url: "ftp://nope".to_string(),
        };
        assert!(error.to_string().contains("ftp://nope"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyPassword;
        let _: &dyn std::error::Error = &error;
    }
}
