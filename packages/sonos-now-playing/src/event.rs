//! Typed AVTransport event record.
//!
//! A [`TransportEvent`] is what the speaker reports in one AVTransport
//! `LastChange` notification. Metadata sub-structures are kept as raw
//! DIDL-Lite and decoded on access, so a malformed fragment only fails the
//! consumer that actually reads it.

use crate::sonos::didl::{format_didl_lite, parse_didl_lite, DidlResult, TrackMetaData};
use crate::sonos::types::TransportState;

/// Raw DIDL-Lite metadata as delivered by the speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DidlMetadata(String);

impl DidlMetadata {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Encodes already-known metadata, e.g. for replaying a cached event.
    pub fn from_meta(meta: &TrackMetaData) -> Self {
        Self(format_didl_lite(meta))
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Decodes the metadata fields.
    ///
    /// # Errors
    /// Fails when the fragment is not well-formed DIDL-Lite.
    pub fn decode(&self) -> DidlResult<TrackMetaData> {
        parse_didl_lite(&self.0)
    }
}

/// One AVTransport state-change event.
///
/// Every field is optional: absence means the variable was not part of this
/// notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportEvent {
    /// `TransportState`
    pub transport_state: Option<TransportState>,
    /// `CurrentTrackURI`
    pub current_track_uri: Option<String>,
    /// `r:EnqueuedTransportURIMetaData` - what the user picked (station, playlist).
    pub enqueued_transport_uri_meta_data: Option<DidlMetadata>,
    /// `CurrentTrackMetaData` - the item playing right now.
    pub current_track_meta_data: Option<DidlMetadata>,
    /// `r:NextTrackMetaData` - the upcoming queue item.
    pub next_track_meta_data: Option<DidlMetadata>,
}

impl TransportEvent {
    /// Returns true if the event carries any track metadata.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.enqueued_transport_uri_meta_data.is_some()
            || self.current_track_meta_data.is_some()
            || self.next_track_meta_data.is_some()
    }
}
