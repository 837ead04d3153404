//! GENA event XML parsing.
//!
//! Pure parsing functions for AVTransport NOTIFY payloads. Subscription
//! lifecycle lives in `gena_client.rs`.

use crate::event::{DidlMetadata, TransportEvent};
use crate::sonos::utils::{extract_empty_val_attrs, extract_xml_text};

const TRANSPORT_STATE: &str = "TransportState";
const CURRENT_TRACK_URI: &str = "CurrentTrackURI";
const CURRENT_TRACK_META_DATA: &str = "CurrentTrackMetaData";
const NEXT_TRACK_META_DATA: &str = "NextTrackMetaData";
const ENQUEUED_TRANSPORT_URI_META_DATA: &str = "EnqueuedTransportURIMetaData";

/// Parses an AVTransport NOTIFY body into a [`TransportEvent`].
///
/// Returns `None` when the body has no `LastChange` property (e.g. the
/// initial notification of some firmware versions). Metadata variables that
/// are reported with an empty value are treated as absent.
#[must_use]
pub fn parse_av_transport_event(body: &str) -> Option<TransportEvent> {
    let last_change = extract_xml_text(body, "LastChange")?;

    let mut attrs = extract_empty_val_attrs(
        &last_change,
        &[
            TRANSPORT_STATE,
            CURRENT_TRACK_URI,
            CURRENT_TRACK_META_DATA,
            NEXT_TRACK_META_DATA,
            ENQUEUED_TRANSPORT_URI_META_DATA,
        ],
    );

    let mut take = |name: &str| attrs.remove(name).filter(|v| !v.is_empty());

    Some(TransportEvent {
        transport_state: take(TRANSPORT_STATE).and_then(|v| v.parse().ok()),
        current_track_uri: take(CURRENT_TRACK_URI),
        enqueued_transport_uri_meta_data: take(ENQUEUED_TRANSPORT_URI_META_DATA)
            .map(DidlMetadata::new),
        current_track_meta_data: take(CURRENT_TRACK_META_DATA).map(DidlMetadata::new),
        next_track_meta_data: take(NEXT_TRACK_META_DATA).map(DidlMetadata::new),
    })
}
