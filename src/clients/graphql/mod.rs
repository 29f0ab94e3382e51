//! GraphQL dispatch against the PurrSong endpoint.
//!
//! # Overview
//!
//! - [`LavviebotClient`]: owns the session and sends every operation through
//!   one request loop
//! - [`is_session_expired`] / [`is_rate_limited`]: the two error messages the
//!   service uses as control signals
//!
//! # Session expiry
//!
//! When a response carries [`SESSION_EXPIRED_MESSAGE`] the client logs in
//! again and re-sends the same payload once. A second expiry on the retried
//! call is reported as [`LavviebotError::Api`](crate::LavviebotError::Api).
//!
//! # Rate limiting
//!
//! A response carrying [`RATE_LIMITED_MESSAGE`] is never retried and never
//! triggers a login; it surfaces as
//! [`LavviebotError::RateLimited`](crate::LavviebotError::RateLimited) so the
//! caller can back off.
//!
//! # Example
//!
//! ```rust,ignore
//! use lavviebot_api::{operations, LavviebotClient};
//!
//! let client = LavviebotClient::new(config)?;
//! let body = client.call(&operations::discover_litter_boxes()).await?;
//! println!("{}", body["data"]["iotMainDrawerLocations"]);
//! ```

pub(crate) mod classify;
mod client;

pub use classify::{
    is_rate_limited, is_session_expired, RATE_LIMITED_MESSAGE, SESSION_EXPIRED_MESSAGE,
};
pub use client::LavviebotClient;
