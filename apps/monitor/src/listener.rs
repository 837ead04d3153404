//! GENA NOTIFY callback endpoint.
//!
//! The speaker POSTs AVTransport changes here. Each valid notification is
//! parsed into a [`TransportEvent`] and queued for the next polling tick.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use parking_lot::RwLock;
use sonos_now_playing::protocol_constants::MAX_GENA_BODY_SIZE;
use sonos_now_playing::{parse_av_transport_event, TransportEvent};
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;

/// Path the speaker is asked to deliver events to.
pub const NOTIFY_PATH: &str = "/gena/avtransport";

/// Rejections sent back to the speaker.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// SID does not belong to the active subscription.
    #[error("unknown subscription {0}")]
    UnknownSubscription(String),
}

impl IntoResponse for ListenerError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnknownSubscription(_) => StatusCode::PRECONDITION_FAILED,
        };
        (status, self.to_string()).into_response()
    }
}

/// Shared state of the callback endpoint.
#[derive(Clone)]
pub struct ListenerState {
    /// SID of the active subscription; `None` accepts any SID.
    pub active_sid: Arc<RwLock<Option<String>>>,
    pub events: Sender<Arc<TransportEvent>>,
}

/// Creates the router serving [`NOTIFY_PATH`].
pub fn create_router(state: ListenerState) -> Router {
    Router::new()
        .route(NOTIFY_PATH, any(handle_notify))
        .with_state(state)
}

/// Validates required GENA headers and extracts SID and SEQ values.
fn validate_gena_headers(headers: &HeaderMap) -> Result<(String, String), ListenerError> {
    let nt = headers.get("NT").and_then(|v| v.to_str().ok());
    if nt != Some("upnp:event") {
        log::warn!("[GENA] NOTIFY missing or invalid NT header: {:?}", nt);
        return Err(ListenerError::InvalidRequest(
            "Missing or invalid NT header".into(),
        ));
    }

    let nts = headers.get("NTS").and_then(|v| v.to_str().ok());
    if nts != Some("upnp:propchange") {
        log::warn!("[GENA] NOTIFY missing or invalid NTS header: {:?}", nts);
        return Err(ListenerError::InvalidRequest(
            "Missing or invalid NTS header".into(),
        ));
    }

    let sid = match headers.get("SID").and_then(|v| v.to_str().ok()) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            log::warn!("[GENA] NOTIFY missing SID header");
            return Err(ListenerError::InvalidRequest("Missing SID header".into()));
        }
    };

    let seq = headers
        .get("SEQ")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("?")
        .to_string();

    Ok((sid, seq))
}

async fn handle_notify(
    State(state): State<ListenerState>,
    req: Request<Body>,
) -> Result<StatusCode, ListenerError> {
    let (parts, body) = req.into_parts();

    if parts.method.as_str() != "NOTIFY" {
        return Err(ListenerError::InvalidRequest(format!(
            "Expected NOTIFY method, got {}",
            parts.method
        )));
    }

    let (sid, seq) = validate_gena_headers(&parts.headers)?;

    let stale = state
        .active_sid
        .read()
        .as_deref()
        .is_some_and(|active| active != sid);
    if stale {
        log::debug!("[GENA] NOTIFY for stale subscription {}", sid);
        return Err(ListenerError::UnknownSubscription(sid));
    }

    let body_bytes = axum::body::to_bytes(body, MAX_GENA_BODY_SIZE)
        .await
        .map_err(|e| {
            log::warn!("[GENA] Failed to read NOTIFY body: {}", e);
            ListenerError::InvalidRequest("Failed to read body".into())
        })?;

    let Some(event) = parse_av_transport_event(&String::from_utf8_lossy(&body_bytes)) else {
        log::trace!("[GENA] NOTIFY from {} (SEQ: {}) - no LastChange", sid, seq);
        return Ok(StatusCode::OK);
    };

    log::debug!(
        "[GENA] NOTIFY from {} (SEQ: {}) - state {:?}",
        sid,
        seq,
        event.transport_state
    );

    match state.events.try_send(Arc::new(event)) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            log::warn!("[GENA] Event queue full, dropping event SEQ {}", seq);
        }
        Err(TrySendError::Closed(_)) => {
            log::debug!("[GENA] Event queue closed, dropping event SEQ {}", seq);
        }
    }

    Ok(StatusCode::OK)
}
