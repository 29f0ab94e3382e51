//! # LavvieBot API
//!
//! An async Rust client for the PurrSong cloud service behind LavvieBot S
//! litter boxes.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`LavviebotConfig`] and [`LavviebotConfigBuilder`]
//! - Validated newtypes for the account email, password and endpoint
//! - Lazy login (server status cookie, then the `Login` mutation)
//! - One automatic re-login and retry when the service reports an expired session
//! - A distinct [`LavviebotError::RateLimited`] error when the service throttles
//! - Typed litter box and cat records, and an aggregate fetch over both
//!
//! ## Quick Start
//!
//! ```rust
//! use lavviebot_api::{Email, LavviebotConfig, Password};
//!
//! let config = LavviebotConfig::builder()
//!     .email(Email::new("owner@example.com").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.language(), "en");
//! ```
//!
//! ## Fetching Data
//!
//! ```rust,ignore
//! use lavviebot_api::{LavviebotClient, LavviebotError};
//!
//! let client = LavviebotClient::new(config)?;
//!
//! match client.fetch_data().await {
//!     Ok(data) => {
//!         for litter_box in data.litter_boxes.values() {
//!             println!("{}: last used by {:?}", litter_box.device_name, litter_box.last_cat_used_name);
//!         }
//!     }
//!     Err(LavviebotError::RateLimited { .. }) => {
//!         // back off before polling again
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Low-level Calls
//!
//! Any operation can be sent through the same session handling:
//!
//! ```rust,ignore
//! use lavviebot_api::operations;
//!
//! let bodies = client
//!     .call_batch(&[operations::litter_box_details(42), operations::litter_box_usage(42)])
//!     .await?;
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]. It installs no subscriber.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod operations;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::Session;
pub use config::{Email, EndpointUrl, LavviebotConfig, LavviebotConfigBuilder, Password};
pub use error::ConfigError;

// Re-export client types
pub use clients::graphql::{
    is_rate_limited, is_session_expired, RATE_LIMITED_MESSAGE, SESSION_EXPIRED_MESSAGE,
};
pub use clients::{LavviebotClient, LavviebotError, OperationRequest, TransportError};

// Re-export record types
pub use resources::{
    Cat, CatSubject, DiscoveredCat, DiscoveredLitterBox, LavviebotData, LitterBox, UNKNOWN_CAT_NAME,
};
