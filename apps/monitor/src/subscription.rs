//! AVTransport event subscription lifecycle.
//!
//! Subscribes at startup, renews ahead of expiry, re-subscribes when a
//! renewal is refused or the first attempt failed, and unsubscribes on
//! shutdown. The active SID is
//! shared with the NOTIFY listener so it can reject stale notifications.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::Client;
use sonos_now_playing::protocol_constants::GENA_RENEWAL_BUFFER_SECS;
use sonos_now_playing::{GenaClient, GenaResult, SonosService};

/// Wait before retrying after both renewal and re-subscription failed.
const RESUBSCRIBE_RETRY_SECS: u64 = 30;

/// Timeout that makes [`renewal_delay`] wait exactly [`RESUBSCRIBE_RETRY_SECS`].
const RETRY_TIMEOUT_SECS: u64 = RESUBSCRIBE_RETRY_SECS + GENA_RENEWAL_BUFFER_SECS;

pub struct AvTransportSubscription {
    gena: GenaClient,
    speaker_ip: String,
    callback_url: String,
    active_sid: Arc<RwLock<Option<String>>>,
}

impl AvTransportSubscription {
    pub fn new(
        client: Client,
        speaker_ip: impl Into<String>,
        callback_url: impl Into<String>,
        active_sid: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            gena: GenaClient::new(client),
            speaker_ip: speaker_ip.into(),
            callback_url: callback_url.into(),
            active_sid,
        }
    }

    /// Subscribes and records the new SID. Returns the granted timeout.
    async fn subscribe(&self) -> GenaResult<u64> {
        let response = self
            .gena
            .subscribe(&self.speaker_ip, SonosService::AVTransport, &self.callback_url)
            .await?;
        *self.active_sid.write() = Some(response.sid);
        Ok(response.timeout_secs)
    }

    /// Subscribes, then keeps the subscription alive until the task is
    /// cancelled. A failed first attempt is retried like a failed renewal.
    pub async fn run(&self) {
        let mut timeout_secs = match self.subscribe().await {
            Ok(timeout) => {
                log::info!("[GENA] Subscribed to AVTransport on {}", self.speaker_ip);
                timeout
            }
            Err(e) => {
                log::warn!("[GENA] Event subscription failed, polling only for now: {}", e);
                RETRY_TIMEOUT_SECS
            }
        };
        loop {
            tokio::time::sleep(renewal_delay(timeout_secs)).await;
            timeout_secs = self.renew_or_resubscribe().await;
        }
    }

    async fn renew_or_resubscribe(&self) -> u64 {
        let sid = self.active_sid.read().clone();
        if let Some(sid) = sid {
            match self
                .gena
                .renew(&self.speaker_ip, SonosService::AVTransport, &sid)
                .await
            {
                Ok(timeout) => {
                    log::debug!("[GENA] Renewed {} (timeout={}s)", sid, timeout);
                    return timeout;
                }
                Err(e) => log::warn!("[GENA] Renewal of {} failed: {}", sid, e),
            }
        }

        match self.subscribe().await {
            Ok(timeout) => timeout,
            Err(e) => {
                log::warn!("[GENA] Re-subscription failed: {}", e);
                *self.active_sid.write() = None;
                RETRY_TIMEOUT_SECS
            }
        }
    }

    /// Cancels the subscription, if any.
    pub async fn unsubscribe(&self) {
        let sid = self.active_sid.write().take();
        let Some(sid) = sid else {
            return;
        };

        if self
            .gena
            .unsubscribe(&self.speaker_ip, SonosService::AVTransport, &sid)
            .await
        {
            log::info!("[GENA] Unsubscribed {}", sid);
        } else {
            log::debug!("[GENA] Speaker did not confirm UNSUBSCRIBE for {}", sid);
        }
    }
}

/// How long to wait before renewing a subscription granted for `timeout_secs`.
///
/// Renews [`GENA_RENEWAL_BUFFER_SECS`] before expiry, or at half-life for
/// timeouts shorter than that buffer.
pub fn renewal_delay(timeout_secs: u64) -> Duration {
    let secs = if timeout_secs > GENA_RENEWAL_BUFFER_SECS {
        timeout_secs - GENA_RENEWAL_BUFFER_SECS
    } else {
        timeout_secs / 2
    };
    Duration::from_secs(secs.max(1))
}
