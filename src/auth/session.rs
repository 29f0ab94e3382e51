//! Session state for PurrSong API calls.
//!
//! This module provides the [`Session`] type holding the credentials every
//! authenticated call sends, and [`LoginResponse`], the payload of the
//! `Login` mutation that populates it.

use std::fmt;

use serde::Deserialize;

use crate::resources::de::id;

/// Credentials and account metadata used by every outgoing call.
///
/// A session starts empty and is filled in by
/// [`LavviebotClient::authenticate`](crate::LavviebotClient::authenticate).
/// `bearer_token` is only ever set together with `cookie`, since the login
/// mutation needs the cookie issued by the server status check.
///
/// The `Debug` implementation masks the cookie and token.
///
/// # Example
///
/// ```rust
/// use lavviebot_api::Session;
///
/// let session = Session::default();
/// assert!(!session.is_authenticated());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// The session cookie issued by the server status check.
    pub cookie: Option<String>,

    /// The user token issued at login, sent as the `Authorization` header.
    pub bearer_token: Option<String>,

    /// The account's user id.
    pub user_id: Option<i64>,

    /// Whether the account has cats registered.
    pub has_cat: Option<bool>,
}

impl Session {
    /// Builds an authenticated session from a cookie and a login response.
    #[must_use]
    pub fn from_login_response(cookie: String, response: LoginResponse) -> Self {
        Self {
            cookie: Some(cookie),
            bearer_token: Some(response.user_token),
            user_id: Some(response.user_id),
            has_cat: Some(response.has_cat),
        }
    }

    /// Returns `true` if the session holds both cookie and bearer token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.cookie.is_some() && self.bearer_token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |value: &Option<String>| value.as_ref().map(|_| "*****");
        f.debug_struct("Session")
            .field("cookie", &mask(&self.cookie))
            .field("bearer_token", &mask(&self.bearer_token))
            .field("user_id", &self.user_id)
            .field("has_cat", &self.has_cat)
            .finish()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

/// The `login` field of a successful `Login` mutation.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The account's user id.
    #[serde(deserialize_with = "id")]
    pub user_id: i64,
    /// The user token for subsequent calls.
    pub user_token: String,
    /// Whether the account has cats registered.
    #[serde(default)]
    pub has_cat: bool,
}
