//! Twitch query - request descriptors for the Twitch v5 API.
//!
//! Endpoint functions such as [`ingests::ingests`] return a [`Query`] that
//! describes a request without performing it. [`TwitchClient`] executes
//! descriptors and decodes the JSON response.

#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod ingests;
pub mod models;
pub mod query;

pub use client::TwitchClient;
pub use error::{ErrorCode, TwitchError, TwitchResult};
pub use models::{Ingest, IngestList};
pub use query::{ApiVersion, Credentials, Query};
