//! Now-playing track record.

use std::sync::Arc;

use crate::event::TransportEvent;

/// What a speaker is playing, as assembled on one polling tick.
///
/// Text fields use the empty string for "unset". `last_event_details` keeps
/// the event that filled this record so the next tick can reuse it when no
/// fresh event arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// URI of the playing item; identifies the track across ticks.
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Album art URI. Absolute once it has been through the merge.
    pub album_art: String,
    /// Event used to populate this record, if any.
    pub last_event_details: Option<Arc<TransportEvent>>,
    pub next_artist: String,
    pub next_album: String,
    pub next_title: String,
    pub next_art_uri: String,
}

impl Track {
    /// Creates an otherwise empty record for the given URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    /// Short "artist - title" form for log lines.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.artist.is_empty(), self.title.is_empty()) {
            (false, false) => format!("{} - {}", self.artist, self.title),
            (true, false) => self.title.clone(),
            (false, true) => self.artist.clone(),
            (true, true) => self.uri.clone(),
        }
    }
}
