//! Authentication for the PurrSong API.
//!
//! # Overview
//!
//! - [`Session`]: the cookie, bearer token and account metadata every
//!   authenticated call sends
//! - [`LoginResponse`]: the payload of the `Login` mutation
//!
//! The login sequence itself (server status check for the cookie, then the
//! `Login` mutation) runs inside
//! [`LavviebotClient::authenticate`](crate::LavviebotClient::authenticate),
//! which is also invoked lazily before the first authenticated call and once
//! more whenever the service reports an expired session.
//!
//! # Example
//!
//! ```rust,ignore
//! use lavviebot_api::LavviebotClient;
//!
//! let client = LavviebotClient::new(config)?;
//! let user_id = client.authenticate().await?;
//! assert!(client.session().await.is_authenticated());
//! ```

pub(crate) mod login;
pub mod session;
pub(crate) mod store;

pub use session::{LoginResponse, Session};
