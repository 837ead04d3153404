//! Sonos AVTransport plumbing.
//!
//! # Module Structure
//!
//! - `types` - Transport state enum
//! - `services` - UPnP service definitions (URNs, paths)
//! - `traits` - `SonosDevice` abstraction for testability
//! - `client` - `SonosClientImpl` SOAP-backed implementation
//! - `didl` - DIDL-Lite metadata decoding and encoding
//! - `gena_client` - GENA subscribe/renew/unsubscribe
//! - `gena_parser` - NOTIFY body parsing into `TransportEvent`
//! - `soap` - Low-level SOAP protocol implementation
//! - `utils` - Shared XML and URL helpers

pub mod client;
pub mod didl;
pub mod gena_client;
pub mod gena_parser;
pub(crate) mod retry;
pub mod services;
pub mod soap;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::SonosClientImpl;
pub use services::SonosService;
pub use traits::SonosDevice;
