//! HTTP transport for the PurrSong GraphQL endpoint.
//!
//! This module provides the [`HttpClient`] type, which sends one POST per
//! call with the fixed app headers, the session's cookie and token, and the
//! configured timeout. It performs no retries and no error classification;
//! that is the job of [`LavviebotClient`](crate::LavviebotClient).

use std::collections::HashMap;

use crate::auth::Session;
use crate::clients::errors::LavviebotError;
use crate::clients::http_request::Payload;
use crate::clients::http_response::HttpResponse;
use crate::config::{EndpointUrl, LavviebotConfig};
use crate::error::ConfigError;

/// `Accept` header sent by the PurrSong app.
pub const ACCEPT: &str = "*/*";
/// `Accept-Encoding` header sent by the PurrSong app.
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";
/// `Accept-Language` header sent by the PurrSong app.
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
/// `Connection` header sent by the PurrSong app.
pub const CONNECTION: &str = "keep-alive";
/// `Content-Type` of every request body.
pub const CONTENT_TYPE: &str = "application/json";

/// HTTP transport for the PurrSong endpoint.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and is shared by all concurrent calls of a
/// [`LavviebotClient`](crate::LavviebotClient).
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The GraphQL endpoint.
    endpoint: EndpointUrl,
    /// Headers included in every request.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a transport for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &LavviebotConfig) -> Result<Self, ConfigError> {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), ACCEPT.to_string());
        default_headers.insert("Accept-Encoding".to_string(), ACCEPT_ENCODING.to_string());
        default_headers.insert("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string());
        default_headers.insert("Connection".to_string(), CONNECTION.to_string());
        default_headers.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());
        default_headers.insert("User-Agent".to_string(), config.user_agent().to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint().clone(),
            default_headers,
        })
    }

    /// Returns the endpoint this client posts to.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns the headers included in every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full header set for a request made with `session`.
    ///
    /// `Cookie` and `Authorization` are added only when the session holds
    /// them. The token is sent as-is, without a `Bearer` prefix.
    #[must_use]
    pub fn headers_for(&self, session: &Session) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();
        if let Some(cookie) = &session.cookie {
            headers.insert("Cookie".to_string(), cookie.clone());
        }
        if let Some(token) = &session.bearer_token {
            headers.insert("Authorization".to_string(), token.clone());
        }
        headers
    }

    /// Sends one POST carrying `payload`.
    ///
    /// Any HTTP status is returned as a response; only failures to obtain a
    /// response at all are errors.
    ///
    /// # Errors
    ///
    /// Returns [`LavviebotError::Network`] on connection failure or timeout.
    pub(crate) async fn post(
        &self,
        payload: Payload<'_>,
        session: &Session,
    ) -> Result<HttpResponse, LavviebotError> {
        let mut req_builder = self.client.post(self.endpoint.as_ref());
        for (key, value) in self.headers_for(session) {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.body(payload.to_json().to_string());

        tracing::debug!("POST {} ({})", self.endpoint, payload.describe());
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!("{} answered {}", payload.describe(), code);
        Ok(HttpResponse::new(code, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
