//! HTTP and GraphQL client types for the PurrSong API.
//!
//! This module provides the transport and dispatch layers every resource
//! call goes through.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`LavviebotClient`]: the account client; logs in lazily and retries once
//!   on session expiry
//! - [`HttpClient`]: the single-POST transport with the app's fixed headers
//! - [`OperationRequest`]: one GraphQL operation (name, variables, query)
//! - [`HttpResponse`]: status, lowercased headers and raw body of a response
//! - [`LavviebotError`]: every failure a call can end in
//!
//! # Example
//!
//! ```rust,ignore
//! use lavviebot_api::clients::{LavviebotClient, OperationRequest};
//! use serde_json::json;
//!
//! let client = LavviebotClient::new(config)?;
//! let request = OperationRequest::builder("GetLavviebotDetails", query)
//!     .variables(json!({"data": {"iotId": 42}}))
//!     .build();
//! let body = client.call(&request).await?;
//! ```

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{LavviebotError, TransportError};
pub use http_client::{
    HttpClient, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE,
};
pub use http_request::{OperationRequest, OperationRequestBuilder};
pub use http_response::{first_error_message, HttpResponse};

pub use graphql::LavviebotClient;

pub(crate) use http_request::Payload;
