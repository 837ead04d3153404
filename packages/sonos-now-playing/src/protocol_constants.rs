//! Fixed protocol constants that should NOT be changed.
//!
//! These values are defined by the Sonos firmware and the UPnP/GENA
//! specifications. Changing them breaks interoperability with real speakers.

// ─────────────────────────────────────────────────────────────────────────────
// Sonos Device
// ─────────────────────────────────────────────────────────────────────────────

/// Port every Sonos speaker serves UPnP control, events and artwork on.
pub const SONOS_PORT: u16 = 1400;

/// Prefix of the placeholder strings the firmware emits while a value is
/// still being resolved (e.g. `ZPSTR_CONNECTING`, `ZPSTR_BUFFERING`).
pub const SENTINEL_PREFIX: &str = "ZPSTR_";

/// Separator between a radio show name and its show identifier.
///
/// TuneIn reports shows as `"Drivetime,p239255"`.
pub const RADIO_SHOW_ID_SEPARATOR: &str = ",p";

// ─────────────────────────────────────────────────────────────────────────────
// GENA (UPnP General Event Notification Architecture)
// ─────────────────────────────────────────────────────────────────────────────

/// GENA subscription timeout requested from speaker (seconds).
pub const GENA_SUBSCRIPTION_TIMEOUT_SECS: u64 = 3600;

/// Time before subscription expiry to trigger renewal (seconds).
pub const GENA_RENEWAL_BUFFER_SECS: u64 = 300;

/// Maximum size of GENA notification body (bytes).
pub const MAX_GENA_BODY_SIZE: usize = 64 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// HTTP/SOAP
// ─────────────────────────────────────────────────────────────────────────────

/// Timeout for SOAP HTTP requests (seconds).
///
/// 10 seconds is reasonable for LAN operations.
pub const SOAP_TIMEOUT_SECS: u64 = 10;

/// Retry delays for transient SOAP errors (exponential backoff).
pub const SOAP_RETRY_DELAYS_MS: [u64; 3] = [200, 500, 1000];
