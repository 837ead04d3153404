//! Track change detection between polling ticks.

use crate::track::Track;

/// Decides whether `new` should be announced as a change from `old`.
///
/// A missing `new` record is never a change; the host keeps showing what it
/// has. When the URI is unchanged but `new` lost the event details `old`
/// had, the tick is treated as unchanged: a tick without a fresh event
/// carries less information, not different information.
#[must_use]
pub fn has_track_changed(old: Option<&Track>, new: Option<&Track>) -> bool {
    let Some(new) = new else {
        return false;
    };
    let Some(old) = old else {
        return true;
    };

    if old.uri != new.uri {
        return true;
    }

    if new.last_event_details.is_none() && old.last_event_details.is_some() {
        return false;
    }

    old.title != new.title
        || old.album_art != new.album_art
        || old.artist != new.artist
        || old.album != new.album
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::event::{DidlMetadata, TransportEvent};
    use crate::sonos::test_fixtures::DIDL_TRACK_CURRENT;

    fn track() -> Track {
        Track {
            uri: "x-sonos-spotify:1".into(),
            title: "Heroes".into(),
            artist: "David Bowie".into(),
            album: "\"Heroes\"".into(),
            ..Default::default()
        }
    }

    fn event() -> Arc<TransportEvent> {
        Arc::new(TransportEvent {
            current_track_meta_data: Some(DidlMetadata::new(DIDL_TRACK_CURRENT)),
            ..Default::default()
        })
    }

    #[test]
    fn new_absent_is_unchanged() {
        let t = track();
        assert!(!has_track_changed(Some(&t), None));
        assert!(!has_track_changed(None, None));
    }

    #[test]
    fn old_absent_is_changed() {
        let t = track();
        assert!(has_track_changed(None, Some(&t)));
    }

    #[test]
    fn identical_tracks_are_unchanged() {
        let t = track();
        assert!(!has_track_changed(Some(&t), Some(&t.clone())));
    }

    #[test]
    fn uri_difference_is_changed() {
        let old = track();
        let new = Track {
            uri: "x-sonos-spotify:2".into(),
            ..track()
        };
        assert!(has_track_changed(Some(&old), Some(&new)));
    }

    #[test]
    fn uri_difference_wins_over_dropped_event_details() {
        let old = Track {
            last_event_details: Some(event()),
            ..track()
        };
        let new = Track {
            uri: "x-sonos-spotify:2".into(),
            ..track()
        };
        assert!(has_track_changed(Some(&old), Some(&new)));
    }

    #[test]
    fn displayed_fields_are_compared() {
        let old = track();
        let edits: [fn(&mut Track); 4] = [
            |t| t.title = "Other".into(),
            |t| t.album_art = "http://art".into(),
            |t| t.artist = "Other".into(),
            |t| t.album = "Other".into(),
        ];

        for (i, edit) in edits.iter().enumerate() {
            let mut new = old.clone();
            edit(&mut new);
            assert!(has_track_changed(Some(&old), Some(&new)), "field #{}", i);
        }
    }

    #[test]
    fn next_track_fields_are_not_compared() {
        let old = track();
        let new = Track {
            next_title: "Sons of the Silent Age".into(),
            next_artist: "David Bowie".into(),
            ..track()
        };
        assert!(!has_track_changed(Some(&old), Some(&new)));
    }

    #[test]
    fn dropped_event_details_suppress_changes() {
        let old = Track {
            last_event_details: Some(event()),
            ..track()
        };
        let new = Track {
            artist: String::new(),
            ..track()
        };
        assert!(!has_track_changed(Some(&old), Some(&new)));
    }

    #[test]
    fn gained_event_details_still_compare_fields() {
        let old = track();
        let new = Track {
            artist: "Bowie".into(),
            last_event_details: Some(event()),
            ..track()
        };
        assert!(has_track_changed(Some(&old), Some(&new)));
    }
}
