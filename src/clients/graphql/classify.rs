//! Response classification for dispatched operations.
//!
//! Turns a raw [`HttpResponse`] into either the response bodies, the internal
//! session-expired signal, or one of the terminal [`LavviebotError`] kinds.

use serde_json::Value;

use crate::clients::errors::{LavviebotError, TransportError};
use crate::clients::http_request::Payload;
use crate::clients::http_response::{first_error_message, HttpResponse};

/// Message the service returns when the user token has expired.
pub const SESSION_EXPIRED_MESSAGE: &str = "Please login again.";

/// Message the service returns when it is throttling the account.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Returns `true` if `message` is the session-expired sentinel.
#[must_use]
pub fn is_session_expired(message: &str) -> bool {
    message.trim() == SESSION_EXPIRED_MESSAGE
}

/// Returns `true` if `message` is the rate-limit sentinel.
#[must_use]
pub fn is_rate_limited(message: &str) -> bool {
    message.trim() == RATE_LIMITED_MESSAGE
}

/// Non-terminal outcome of one dispatched request.
#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    /// One body per operation in the payload.
    Success(Vec<Value>),
    /// The service asked for a fresh login.
    SessionExpired(String),
}

/// First error message carried by a body, looking into batch elements too.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    match body {
        Value::Array(items) => items.iter().find_map(first_error_message),
        other => first_error_message(other),
    }
}

/// Returns the rate-limit message of a response, if it carries one.
pub(crate) fn rate_limit_message(response: &HttpResponse) -> Option<String> {
    response
        .json()
        .ok()
        .as_ref()
        .and_then(error_message)
        .filter(|message| is_rate_limited(message))
}

/// Classifies the response to `payload`.
pub(crate) fn classify(
    response: &HttpResponse,
    payload: Payload<'_>,
) -> Result<Outcome, LavviebotError> {
    if !response.is_ok() {
        if let Some(message) = rate_limit_message(response) {
            return Err(LavviebotError::RateLimited {
                message,
                status: response.code,
            });
        }
        return Err(transport_error(response));
    }

    let body = response.json().map_err(|_| transport_error(response))?;

    if let Some(message) = error_message(&body) {
        if is_session_expired(&message) {
            return Ok(Outcome::SessionExpired(message));
        }
        if is_rate_limited(&message) {
            return Err(LavviebotError::RateLimited {
                message,
                status: response.code,
            });
        }
        return Err(LavviebotError::Api { message });
    }

    match (payload, body) {
        (Payload::Single(_), body) => Ok(Outcome::Success(vec![body])),
        (Payload::Batch(requests), Value::Array(bodies)) if bodies.len() == requests.len() => {
            Ok(Outcome::Success(bodies))
        }
        (Payload::Batch(_), _) => Err(transport_error(response)),
    }
}

fn transport_error(response: &HttpResponse) -> LavviebotError {
    LavviebotError::Transport(TransportError {
        code: response.code,
        body: response.body.clone(),
    })
}
