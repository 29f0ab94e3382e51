//! The LavvieBot API client and its request dispatcher.
//!
//! This module provides [`LavviebotClient`], which owns the session for one
//! PurrSong account and routes every GraphQL operation through the same
//! protocol:
//!
//! ```text
//! Idle -> (needs auth?) -> Authenticating -> Sent -> Success
//!                                                -> SessionExpired -> Authenticating -> Sent -> Success | ApiError
//!                                                -> RateLimited | TransportError | ApiError
//! ```

use serde_json::Value;

use crate::auth::login;
use crate::auth::store::SessionStore;
use crate::auth::Session;
use crate::clients::errors::LavviebotError;
use crate::clients::graphql::classify::{classify, Outcome};
use crate::clients::http_request::{OperationRequest, Payload};
use crate::clients::HttpClient;
use crate::config::LavviebotConfig;

/// Client for one PurrSong account.
///
/// The client logs in lazily: the first call that needs credentials runs the
/// login sequence. When the service reports an expired session the client
/// logs in again and re-sends the call exactly once.
///
/// # Thread Safety
///
/// `LavviebotClient` is `Send + Sync`. Calls may run concurrently; a
/// re-login triggered by one call is shared with every other call that was
/// sent with the same expired session.
///
/// # Example
///
/// ```rust,ignore
/// use lavviebot_api::{Email, LavviebotClient, LavviebotConfig, Password};
///
/// let config = LavviebotConfig::builder()
///     .email(Email::new("owner@example.com")?)
///     .password(Password::new("secret")?)
///     .build()?;
///
/// let client = LavviebotClient::new(config)?;
/// let data = client.fetch_data().await?;
/// for (id, litter_box) in &data.litter_boxes {
///     println!("{id}: {} ({:?})", litter_box.device_name, litter_box.last_used);
/// }
/// ```
#[derive(Debug)]
pub struct LavviebotClient {
    config: LavviebotConfig,
    http: HttpClient,
    store: SessionStore,
}

// Verify LavviebotClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LavviebotClient>();
};

impl LavviebotClient {
    /// Creates a client with an empty session.
    ///
    /// No request is sent until the first call.
    ///
    /// # Errors
    ///
    /// Returns [`LavviebotError::Config`] if the HTTP client cannot be built.
    pub fn new(config: LavviebotConfig) -> Result<Self, LavviebotError> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            config,
            http,
            store: SessionStore::new(),
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &LavviebotConfig {
        &self.config
    }

    /// Returns a copy of the current session.
    pub async fn session(&self) -> Session {
        self.store.snapshot().await.session
    }

    /// Logs in: fetches a fresh cookie, exchanges the configured credentials
    /// for a user token, and stores both. Returns the account's user id.
    ///
    /// Always runs the full sequence, even if the session is already
    /// authenticated. On failure the stored session is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`LavviebotError::Auth`] if the cookie cannot be obtained or the
    ///   credentials are rejected (never retried)
    /// - [`LavviebotError::RateLimited`] if the service is throttling
    /// - [`LavviebotError::Network`] on connection failure
    pub async fn authenticate(&self) -> Result<i64, LavviebotError> {
        let _gate = self.store.lock_gate().await;
        self.authenticate_locked().await
    }

    /// Sends one operation and returns its response body.
    ///
    /// # Errors
    ///
    /// - [`LavviebotError::RateLimited`] if the service is throttling
    /// - [`LavviebotError::Api`] for any other GraphQL error, including a
    ///   second expired-session signal right after logging in again
    /// - [`LavviebotError::Transport`] for a non-2xx status or unreadable body
    /// - [`LavviebotError::Auth`] if the (re-)login fails
    /// - [`LavviebotError::Network`] on connection failure
    pub async fn call(&self, request: &OperationRequest) -> Result<Value, LavviebotError> {
        let mut bodies = self.dispatch(Payload::Single(request)).await?;
        bodies
            .pop()
            .ok_or_else(|| LavviebotError::unexpected(&request.operation_name, "empty response"))
    }

    /// Sends several operations in one batched request and returns one body
    /// per operation, in order.
    ///
    /// All bodies come from the same server round trip. An error in any of
    /// them fails the whole batch.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn call_batch(
        &self,
        requests: &[OperationRequest],
    ) -> Result<Vec<Value>, LavviebotError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        self.dispatch(Payload::Batch(requests)).await
    }

    async fn dispatch(&self, payload: Payload<'_>) -> Result<Vec<Value>, LavviebotError> {
        if payload.requires_auth() {
            self.ensure_authenticated().await?;
        }

        let mut reauthenticated = false;
        loop {
            let snapshot = self.store.snapshot().await;
            let response = self.http.post(payload, &snapshot.session).await?;

            match classify(&response, payload) {
                Ok(Outcome::Success(bodies)) => return Ok(bodies),
                Ok(Outcome::SessionExpired(message)) if reauthenticated => {
                    tracing::warn!(
                        "{} still reports an expired session after logging in again",
                        payload.describe()
                    );
                    return Err(LavviebotError::Api { message });
                }
                Ok(Outcome::SessionExpired(_)) => {
                    tracing::warn!(
                        "{} reported an expired session, logging in again",
                        payload.describe()
                    );
                    self.reauthenticate(snapshot.generation).await?;
                    reauthenticated = true;
                }
                Err(error) => {
                    if let LavviebotError::RateLimited { status, .. } = &error {
                        tracing::warn!("{} was rate limited ({status})", payload.describe());
                    }
                    return Err(error);
                }
            }
        }
    }

    /// Logs in unless the session already holds cookie and token.
    async fn ensure_authenticated(&self) -> Result<(), LavviebotError> {
        if self.store.snapshot().await.session.is_authenticated() {
            return Ok(());
        }

        let _gate = self.store.lock_gate().await;
        // Another call may have logged in while we waited for the gate.
        if self.store.snapshot().await.session.is_authenticated() {
            return Ok(());
        }
        tracing::debug!("No PurrSong session yet, logging in");
        self.authenticate_locked().await.map(|_| ())
    }

    /// Logs in again unless the session moved past `seen_generation` already.
    async fn reauthenticate(&self, seen_generation: u64) -> Result<(), LavviebotError> {
        let _gate = self.store.lock_gate().await;
        if self.store.snapshot().await.generation != seen_generation {
            tracing::debug!("Session was already refreshed by another call");
            return Ok(());
        }
        self.authenticate_locked().await.map(|_| ())
    }

    /// Caller must hold the gate.
    async fn authenticate_locked(&self) -> Result<i64, LavviebotError> {
        let (session, user_id) = login::authenticate(&self.http, &self.config).await?;
        self.store.replace(session).await;
        Ok(user_id)
    }
}
