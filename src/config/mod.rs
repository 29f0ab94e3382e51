//! Configuration types for the LavvieBot API client.
//!
//! # Overview
//!
//! - [`LavviebotConfig`]: credentials, endpoint, timeout and the app identity
//!   values sent to the PurrSong service
//! - [`LavviebotConfigBuilder`]: a builder for [`LavviebotConfig`]
//! - [`Email`], [`Password`], [`EndpointUrl`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use lavviebot_api::{Email, LavviebotConfig, Password};
//! use std::time::Duration;
//!
//! let config = LavviebotConfig::builder()
//!     .email(Email::new("owner@example.com").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.timeout(), Duration::from_secs(30));
//! ```

mod newtypes;

pub use newtypes::{Email, EndpointUrl, Password};

use std::time::Duration;

use crate::error::ConfigError;

/// Production GraphQL endpoint of the PurrSong service.
pub const DEFAULT_ENDPOINT: &str = "https://api.purrsong.co/purrsong";

/// Default per-request timeout (five minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// App version reported at login.
pub const DEFAULT_APP_VERSION: &str = "3.6.5";

/// Language reported to the server status check.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Timezone reported at login.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Timezone country reported at login.
pub const DEFAULT_TIMEZONE_COUNTRY: &str = "US";

/// User agent of the PurrSong iOS app.
pub const DEFAULT_USER_AGENT: &str = "purrsongAppV3/1 CFNetwork/1325.0.1 Darwin/21.1.0";

/// Configuration for a [`LavviebotClient`](crate::LavviebotClient).
///
/// `LavviebotConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct LavviebotConfig {
    email: Email,
    password: Password,
    endpoint: EndpointUrl,
    timeout: Duration,
    app_version: String,
    language: String,
    timezone: String,
    timezone_country: String,
    user_agent: String,
}

impl LavviebotConfig {
    /// Creates a new builder for constructing a `LavviebotConfig`.
    #[must_use]
    pub fn builder() -> LavviebotConfigBuilder {
        LavviebotConfigBuilder::new()
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the account password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the app version sent at login.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Returns the language sent to the server status check.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the timezone sent at login.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Returns the timezone country sent at login.
    #[must_use]
    pub fn timezone_country(&self) -> &str {
        &self.timezone_country
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

// Verify LavviebotConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LavviebotConfig>();
};

/// Builder for constructing [`LavviebotConfig`] instances.
///
/// `email` and `password` are required.
///
/// # Defaults
///
/// - `endpoint`: [`DEFAULT_ENDPOINT`]
/// - `timeout`: [`DEFAULT_TIMEOUT`]
/// - `app_version`: [`DEFAULT_APP_VERSION`]
/// - `language`: [`DEFAULT_LANGUAGE`]
/// - `timezone`: [`DEFAULT_TIMEZONE`]
/// - `timezone_country`: [`DEFAULT_TIMEZONE_COUNTRY`]
/// - `user_agent`: [`DEFAULT_USER_AGENT`]
#[derive(Debug, Default)]
pub struct LavviebotConfigBuilder {
    email: Option<Email>,
    password: Option<Password>,
    endpoint: Option<EndpointUrl>,
    timeout: Option<Duration>,
    app_version: Option<String>,
    language: Option<String>,
    timezone: Option<String>,
    timezone_country: Option<String>,
    user_agent: Option<String>,
}

impl LavviebotConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account email (required).
    #[must_use]
    pub fn email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the account password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Overrides the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the app version sent at login.
    #[must_use]
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    /// Sets the language sent to the server status check.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the timezone sent at login.
    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the timezone country sent at login.
    #[must_use]
    pub fn timezone_country(mut self, country: impl Into<String>) -> Self {
        self.timezone_country = Some(country.into());
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the [`LavviebotConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `email` or `password`
    /// are not set.
    pub fn build(self) -> Result<LavviebotConfig, ConfigError> {
        let email = self
            .email
            .ok_or(ConfigError::MissingRequiredField { field: "email" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;
        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => EndpointUrl::new(DEFAULT_ENDPOINT)?,
        };

        Ok(LavviebotConfig {
            email,
            password,
            endpoint,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            app_version: self
                .app_version
                .unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            language: self.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            timezone: self.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            timezone_country: self
                .timezone_country
                .unwrap_or_else(|| DEFAULT_TIMEZONE_COUNTRY.to_string()),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}
