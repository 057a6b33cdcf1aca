//! Citizen incident feed client.
//!
//! This crate fetches the public incident feed over HTTP and exposes the
//! loosely-typed records it returns. Records are decoded one at a time so a
//! single malformed entry never poisons the rest of a batch.
//!
//! # Example
//!
//! ```no_run
//! use citizen_feed::{FeedClient, FeedConfig, FeedSource};
//!
//! # async fn example() -> Result<(), citizen_feed::FeedError> {
//! let client = FeedClient::new(FeedConfig::default())?;
//! let response = client.fetch("https://citizen.com/api/incident/trending").await?;
//!
//! for record in response.incidents() {
//!     match record {
//!         Ok(incident) => println!("{}: {}", incident.key, incident.title),
//!         Err(e) => eprintln!("skipping record: {}", e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{FeedClient, FeedSource};
pub use config::FeedConfig;
pub use error::FeedError;
pub use types::{DecodedUpdate, FeedResponse, RawIncident, RawUpdate};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
