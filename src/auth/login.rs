//! Cookie acquisition and credential exchange.
//!
//! Logging in to PurrSong takes two requests:
//!
//! 1. `CheckServerStatus`, sent without credentials, whose response sets the
//!    session cookie.
//! 2. `Login`, sent with that cookie, which returns the user token, user id
//!    and has-cat flag.
//!
//! A rejected login is terminal: [`authenticate`] never retries it, so wrong
//! credentials cannot loop. Connection failures surface as
//! [`LavviebotError::Network`] rather than as an authentication failure.

use crate::auth::session::LoginResponse;
use crate::auth::Session;
use crate::clients::graphql::classify::{error_message, is_rate_limited, rate_limit_message};
use crate::clients::{HttpClient, HttpResponse, LavviebotError, Payload};
use crate::config::LavviebotConfig;
use crate::operations;

/// Runs the full cookie + login sequence and returns the new session along
/// with the user id it belongs to.
///
/// # Errors
///
/// - [`LavviebotError::Auth`] if either step is rejected
/// - [`LavviebotError::RateLimited`] if the service is throttling
/// - [`LavviebotError::Network`] on connection failure
/// - [`LavviebotError::UnexpectedResponse`] if the login payload is malformed
pub(crate) async fn authenticate(
    http: &HttpClient,
    config: &LavviebotConfig,
) -> Result<(Session, i64), LavviebotError> {
    let cookie = fetch_cookie(http, config).await?;
    let login = exchange_credentials(http, config, &cookie).await?;
    let user_id = login.user_id;
    tracing::debug!("Logged in to PurrSong as user {}", user_id);
    Ok((Session::from_login_response(cookie, login), user_id))
}

/// Step 1: obtains the session cookie from the server status check.
async fn fetch_cookie(
    http: &HttpClient,
    config: &LavviebotConfig,
) -> Result<String, LavviebotError> {
    let request = operations::check_server_status(config.language());
    let response = http
        .post(Payload::Single(&request), &Session::default())
        .await?;

    checked_body(&response, "Server status check")?;

    response.cookie().ok_or_else(|| LavviebotError::Auth {
        message: "Server status check did not set a session cookie".to_string(),
    })
}

/// Step 2: exchanges email and password for a user token.
async fn exchange_credentials(
    http: &HttpClient,
    config: &LavviebotConfig,
    cookie: &str,
) -> Result<LoginResponse, LavviebotError> {
    let request = operations::login(config);
    let session = Session {
        cookie: Some(cookie.to_string()),
        ..Session::default()
    };
    let response = http.post(Payload::Single(&request), &session).await?;

    let body = checked_body(&response, "Login")?;
    let login = body
        .pointer("/data/login")
        .cloned()
        .ok_or_else(|| LavviebotError::unexpected("Login", "missing `data.login`"))?;
    serde_json::from_value(login).map_err(|e| LavviebotError::unexpected("Login", e.to_string()))
}

/// Returns the body of a successful authentication step.
///
/// Non-2xx, non-JSON and GraphQL error responses are rejected. A throttling
/// message becomes [`LavviebotError::RateLimited`] on any status.
fn checked_body(response: &HttpResponse, step: &str) -> Result<serde_json::Value, LavviebotError> {
    if !response.is_ok() {
        if let Some(message) = rate_limit_message(response) {
            return Err(LavviebotError::RateLimited {
                message,
                status: response.code,
            });
        }
        let message = response
            .json()
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("{step} failed with status {}", response.code));
        return Err(LavviebotError::Auth { message });
    }

    let body = response.json().map_err(|e| LavviebotError::Auth {
        message: format!("{step} returned a body that is not JSON: {e}"),
    })?;

    match error_message(&body) {
        Some(message) if is_rate_limited(&message) => Err(LavviebotError::RateLimited {
            message,
            status: response.code,
        }),
        Some(message) => Err(LavviebotError::Auth { message }),
        None => Ok(body),
    }
}
