//! Machine-readable codes for the library's error types.
//!
//! Each concern keeps its own `thiserror` enum next to the code that raises
//! it. This module only maps them onto stable string codes for hosts that
//! report errors to another process.

use crate::drain::QueueError;
use crate::sonos::didl::DidlError;
use crate::sonos::gena_client::GenaError;
use crate::sonos::soap::SoapError;

/// Trait for error types that provide machine-readable error codes.
pub trait ErrorCode {
    /// Returns a stable, snake_case error code.
    fn code(&self) -> &'static str;
}

impl ErrorCode for SoapError {
    fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http_request_failed",
            Self::HttpStatus(_, _) => "http_error_status",
            Self::Fault(_) => "soap_fault",
            Self::MissingField(_) => "soap_missing_field",
        }
    }
}

impl ErrorCode for GenaError {
    fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http_request_failed",
            Self::SubscriptionFailed(_) => "gena_subscription_failed",
            Self::RenewalFailed(_) => "gena_renewal_failed",
            Self::MissingSid => "gena_missing_sid",
        }
    }
}

impl ErrorCode for DidlError {
    fn code(&self) -> &'static str {
        match self {
            Self::Xml(_) => "didl_malformed",
            Self::NotDidl => "didl_not_didl",
        }
    }
}

impl ErrorCode for QueueError {
    fn code(&self) -> &'static str {
        match self {
            Self::Disconnected => "queue_disconnected",
        }
    }
}
