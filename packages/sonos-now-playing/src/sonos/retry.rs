//! Retry logic for transient SOAP errors.

use std::time::Duration;

use crate::protocol_constants::SOAP_RETRY_DELAYS_MS;
use crate::sonos::soap::SoapResult;

/// Executes a SOAP request, retrying transient faults with backoff.
///
/// Retries on transient SOAP faults (701, 714, 716) and timeouts, waiting
/// 200ms, 500ms, then 1000ms between attempts. Non-transient errors are
/// returned immediately.
pub(crate) async fn with_retry<F, Fut>(action: &str, mut operation: F) -> SoapResult<String>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = SoapResult<String>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(r) => return Ok(r),
            Err(e) if e.is_transient() && attempt < SOAP_RETRY_DELAYS_MS.len() => {
                let delay_ms = SOAP_RETRY_DELAYS_MS[attempt];
                attempt += 1;
                log::warn!(
                    "[Sonos] {} transient error: {} (retry {}/{} in {}ms)",
                    action,
                    e,
                    attempt,
                    SOAP_RETRY_DELAYS_MS.len(),
                    delay_ms
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sonos::soap::SoapError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn retries_transient_faults_until_success() {
        let calls = AtomicUsize::new(0);
        let result = with_retry("SetPlayMode", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(SoapError::Fault("UPnPError (701)".into()))
                } else {
                    Ok("ok".to_string())
                }
            }
        })
        .await;

        assert_eq!(result.expect("should succeed"), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_last_delay() {
        let calls = AtomicUsize::new(0);
        let result = with_retry("SetPlayMode", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<String, _>(SoapError::Fault("UPnPError (716)".into())) }
        })
        .await;

        assert!(matches!(result, Err(SoapError::Fault(_))));
        assert_eq!(calls.load(Ordering::SeqCst), SOAP_RETRY_DELAYS_MS.len() + 1);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let calls = AtomicUsize::new(0);
        let result = with_retry("GetTransportSettings", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<String, _>(SoapError::HttpStatus(404, String::new())) }
        })
        .await;

        assert!(matches!(result, Err(SoapError::HttpStatus(404, _))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
