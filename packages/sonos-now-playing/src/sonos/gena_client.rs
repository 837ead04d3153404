//! GENA HTTP client for subscription operations.
//!
//! Handles the HTTP side of UPnP eventing: SUBSCRIBE, renewal, and
//! UNSUBSCRIBE. Incoming NOTIFY bodies are parsed by `gena_parser.rs`.

use reqwest::{Client, Method};
use thiserror::Error;

use super::services::SonosService;
use super::utils::build_sonos_url;
use crate::protocol_constants::GENA_SUBSCRIPTION_TIMEOUT_SECS;

/// Errors that can occur during GENA subscription operations.
#[derive(Debug, Error)]
pub enum GenaError {
    /// HTTP request to the speaker failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Speaker rejected the SUBSCRIBE request.
    #[error("Subscription failed with status {0}")]
    SubscriptionFailed(u16),

    /// Speaker rejected the renewal request.
    #[error("Renewal failed with status {0}")]
    RenewalFailed(u16),

    /// Speaker accepted the subscription but returned no SID header.
    #[error("Subscription response missing SID header")]
    MissingSid,
}

/// Convenient Result alias for GENA operations.
pub type GenaResult<T> = Result<T, GenaError>;

/// Response from a successful GENA subscription.
#[derive(Debug, Clone)]
pub struct SubscribeResponse {
    /// The subscription ID returned by the speaker.
    pub sid: String,
    /// The timeout value in seconds for this subscription.
    pub timeout_secs: u64,
}

/// HTTP client for GENA (UPnP eventing) operations.
pub struct GenaClient {
    client: Client,
}

impl GenaClient {
    /// Creates a new GENA client with the given HTTP client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn subscribe_method() -> Method {
        // SAFETY: "SUBSCRIBE" is a valid HTTP method name
        Method::from_bytes(b"SUBSCRIBE").expect("SUBSCRIBE is a valid method")
    }

    fn unsubscribe_method() -> Method {
        // SAFETY: "UNSUBSCRIBE" is a valid HTTP method name
        Method::from_bytes(b"UNSUBSCRIBE").expect("UNSUBSCRIBE is a valid method")
    }

    /// Sends a SUBSCRIBE request to create a new subscription.
    ///
    /// # Arguments
    /// * `ip` - Speaker IP address
    /// * `service` - The UPnP service to subscribe to
    /// * `callback_url` - URL where NOTIFY events should be sent
    pub async fn subscribe(
        &self,
        ip: &str,
        service: SonosService,
        callback_url: &str,
    ) -> GenaResult<SubscribeResponse> {
        let url = build_sonos_url(ip, service.event_path());

        let response = self
            .client
            .request(Self::subscribe_method(), &url)
            .header("CALLBACK", format!("<{}>", callback_url))
            .header("NT", "upnp:event")
            .header("TIMEOUT", timeout_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenaError::SubscriptionFailed(response.status().as_u16()));
        }

        let sid = response
            .headers()
            .get("SID")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or(GenaError::MissingSid)?;

        let timeout_secs = parse_timeout_secs(
            response
                .headers()
                .get("TIMEOUT")
                .and_then(|v| v.to_str().ok()),
        );

        log::info!(
            "[GENA] Subscribed to {} on {} (sid={}, timeout={}s)",
            service.name(),
            ip,
            sid,
            timeout_secs
        );

        Ok(SubscribeResponse { sid, timeout_secs })
    }

    /// Renews an existing subscription and returns the new timeout.
    pub async fn renew(&self, ip: &str, service: SonosService, sid: &str) -> GenaResult<u64> {
        let url = build_sonos_url(ip, service.event_path());

        let response = self
            .client
            .request(Self::subscribe_method(), &url)
            .header("SID", sid)
            .header("TIMEOUT", timeout_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenaError::RenewalFailed(response.status().as_u16()));
        }

        Ok(parse_timeout_secs(
            response
                .headers()
                .get("TIMEOUT")
                .and_then(|v| v.to_str().ok()),
        ))
    }

    /// Cancels a subscription.
    ///
    /// Returns `false` if the request failed; the subscription is dead on our
    /// side either way, so callers only log the outcome.
    pub async fn unsubscribe(&self, ip: &str, service: SonosService, sid: &str) -> bool {
        let url = build_sonos_url(ip, service.event_path());

        match self
            .client
            .request(Self::unsubscribe_method(), &url)
            .header("SID", sid)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("[GENA] UNSUBSCRIBE {} failed: {}", sid, e);
                false
            }
        }
    }
}

fn timeout_header() -> String {
    format!("Second-{}", GENA_SUBSCRIPTION_TIMEOUT_SECS)
}

/// Parses a GENA `TIMEOUT` header of the form `Second-N`.
///
/// Falls back to the requested timeout when the header is missing or malformed.
fn parse_timeout_secs(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.strip_prefix("Second-"))
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(GENA_SUBSCRIPTION_TIMEOUT_SECS)
}
