//! Track/event metadata merge.
//!
//! `GetPositionInfo` alone is often incomplete: radio streams report the
//! stream URL as title and nothing as artist, and the upcoming track is not
//! reported at all. The AVTransport event for the same moment carries the
//! missing pieces, so each polled [`Track`] is patched from the latest event.
//!
//! Rules, applied in this order:
//!
//! 1. Fields are only filled when empty; nothing already set is overwritten.
//! 2. The first source that provides a value wins.
//! 3. `ZPSTR_*` placeholders are never accepted for title, artist or album.

use std::sync::Arc;

use crate::event::TransportEvent;
use crate::protocol_constants::{RADIO_SHOW_ID_SEPARATOR, SENTINEL_PREFIX};
use crate::sonos::didl::DidlResult;
use crate::sonos::utils::qualify_album_art_uri;
use crate::track::Track;

/// Merges event metadata into `track`.
///
/// When `event` is `None`, the event stored on `previous` is reused as long
/// as `previous` describes the same URI; otherwise `track.last_event_details`
/// is cleared and the track is left as polled.
///
/// `device_ip` qualifies relative album art served by the speaker.
///
/// # Errors
/// Returns the decoding error of the first malformed metadata fragment.
/// Fields filled before that fragment are kept in `track`.
pub fn merge_track_and_event(
    track: &mut Track,
    event: Option<Arc<TransportEvent>>,
    previous: Option<&Track>,
    device_ip: &str,
) -> DidlResult<()> {
    let event = match event {
        Some(event) => {
            log::debug!("[Merge] Event details set for merge");
            event
        }
        None => match previous.filter(|p| p.uri == track.uri) {
            Some(Track {
                last_event_details: Some(prev_event),
                ..
            }) => {
                log::debug!("[Merge] Using previous event details for merge");
                Arc::clone(prev_event)
            }
            _ => {
                log::debug!("[Merge] Event details not set for merge");
                track.last_event_details = None;
                return Ok(());
            }
        },
    };

    track.last_event_details = Some(Arc::clone(&event));
    apply_event(track, &event, device_ip)
}

fn apply_event(track: &mut Track, event: &TransportEvent, device_ip: &str) -> DidlResult<()> {
    if let Some(meta) = &event.enqueued_transport_uri_meta_data {
        let enqueued = meta.decode()?;
        log::debug!("[Merge] enqueued_transport_uri_meta_data = {:?}", enqueued);

        // Radio: the enqueued item is the station, which makes the best title
        if let Some(title) = resolved(&enqueued.title) {
            fill(&mut track.title, title);
        }
    }

    if let Some(meta) = &event.current_track_meta_data {
        let current = meta.decode()?;
        log::debug!("[Merge] current_track_meta_data = {:?}", current);

        match reported(&current.radio_show) {
            Some(show) => {
                if !is_sentinel(show) {
                    fill(&mut track.album, strip_show_id(show));
                }
            }
            None => {
                if let Some(album) = resolved(&current.album) {
                    fill(&mut track.album, album);
                }
            }
        }

        // Radio "now playing" text; ZPSTR_CONNECTING/_BUFFERING during transitions
        match reported(&current.stream_content) {
            Some(content) => {
                if !is_sentinel(content) {
                    fill(&mut track.artist, content);
                }
            }
            None => {
                if let Some(creator) = resolved(&current.creator) {
                    fill(&mut track.artist, creator);
                }
            }
        }

        // A radio title from the enqueued station is already in place by now
        if let Some(title) = resolved(&current.title) {
            fill(&mut track.title, title);
        }

        if track.album_art.is_empty() {
            if let Some(art) = reported(&current.album_art_uri) {
                track.album_art = qualify_album_art_uri(art, device_ip);
            }
        }
    }

    if let Some(meta) = &event.next_track_meta_data {
        let next = meta.decode()?;
        log::debug!("[Merge] next_track_meta_data = {:?}", next);

        if let Some(artist) = reported(&next.creator) {
            fill(&mut track.next_artist, artist);
        }
        if let Some(album) = reported(&next.album) {
            fill(&mut track.next_album, album);
        }
        if let Some(title) = reported(&next.title) {
            fill(&mut track.next_title, title);
        }
        if let Some(art) = reported(&next.album_art_uri) {
            fill(&mut track.next_art_uri, art);
        }
    }

    Ok(())
}

/// A value the speaker reported, ignoring empty strings.
fn reported(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A reported value that is also not a firmware placeholder.
pub(crate) fn resolved(value: &Option<String>) -> Option<&str> {
    reported(value).filter(|v| !is_sentinel(v))
}

fn is_sentinel(value: &str) -> bool {
    value.starts_with(SENTINEL_PREFIX)
}

fn fill(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

/// Drops the show identifier from a radio show name.
///
/// `"Drivetime,p239255"` becomes `"Drivetime"`. A name that would end up
/// empty is returned whole.
fn strip_show_id(show: &str) -> &str {
    match show.split_once(RADIO_SHOW_ID_SEPARATOR) {
        Some((name, _)) if !name.is_empty() => name,
        _ => show,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DidlMetadata;
    use crate::sonos::didl::TrackMetaData;
    use crate::sonos::test_fixtures::{
        DIDL_MALFORMED, DIDL_RADIO_CONNECTING, DIDL_RADIO_CURRENT, DIDL_RADIO_ENQUEUED,
        DIDL_TRACK_CURRENT, DIDL_TRACK_NEXT,
    };

    const IP: &str = "192.168.1.10";

    fn event(
        enqueued: Option<&str>,
        current: Option<&str>,
        next: Option<&str>,
    ) -> Arc<TransportEvent> {
        Arc::new(TransportEvent {
            enqueued_transport_uri_meta_data: enqueued.map(DidlMetadata::new),
            current_track_meta_data: current.map(DidlMetadata::new),
            next_track_meta_data: next.map(DidlMetadata::new),
            ..Default::default()
        })
    }

    fn current_only(meta: TrackMetaData) -> Arc<TransportEvent> {
        Arc::new(TransportEvent {
            current_track_meta_data: Some(DidlMetadata::from_meta(&meta)),
            ..Default::default()
        })
    }

    fn polled_track() -> Track {
        Track {
            uri: "x-sonos-spotify:spotify%3atrack%3a7Jh1".into(),
            title: "Heroes".into(),
            ..Default::default()
        }
    }

    #[test]
    fn no_event_and_no_previous_clears_event_details() {
        let stale = event(None, Some(DIDL_TRACK_CURRENT), None);
        let mut track = polled_track();
        track.last_event_details = Some(stale);
        let before = Track {
            last_event_details: None,
            ..track.clone()
        };

        merge_track_and_event(&mut track, None, None, IP).expect("never fails without event");

        assert_eq!(track, before);
    }

    #[test]
    fn no_event_reuses_previous_event_for_same_uri() {
        let ev = event(None, Some(DIDL_TRACK_CURRENT), Some(DIDL_TRACK_NEXT));
        let previous = Track {
            last_event_details: Some(Arc::clone(&ev)),
            ..polled_track()
        };

        let mut track = polled_track();
        merge_track_and_event(&mut track, None, Some(&previous), IP).expect("valid metadata");

        let reused = track.last_event_details.as_ref().expect("event reused");
        assert!(Arc::ptr_eq(reused, &ev));
        assert_eq!(track.artist, "David Bowie");
        assert_eq!(track.next_title, "Sons of the Silent Age");
    }

    #[test]
    fn no_event_ignores_previous_for_different_uri() {
        let previous = Track {
            uri: "x-sonos-spotify:other".into(),
            last_event_details: Some(event(None, Some(DIDL_TRACK_CURRENT), None)),
            ..Default::default()
        };

        let mut track = polled_track();
        merge_track_and_event(&mut track, None, Some(&previous), IP).expect("no event");

        assert!(track.last_event_details.is_none());
        assert!(track.artist.is_empty());
    }

    #[test]
    fn no_event_with_previous_lacking_details_clears() {
        let previous = polled_track();
        let mut track = polled_track();
        track.last_event_details = Some(event(None, None, None));

        merge_track_and_event(&mut track, None, Some(&previous), IP).expect("no event");

        assert!(track.last_event_details.is_none());
    }

    #[test]
    fn music_track_fills_missing_fields_and_qualifies_art() {
        let ev = event(None, Some(DIDL_TRACK_CURRENT), Some(DIDL_TRACK_NEXT));
        let mut track = polled_track();

        merge_track_and_event(&mut track, Some(Arc::clone(&ev)), None, IP).expect("valid");

        assert_eq!(track.title, "Heroes");
        assert_eq!(track.artist, "David Bowie");
        assert_eq!(track.album, "\"Heroes\"");
        assert_eq!(
            track.album_art,
            "http://192.168.1.10:1400/getaa?s=1&u=x-sonos-spotify%3aspotify%3atrack%3a7Jh1bpe76CNTCgdgAdBw4Z"
        );
        assert_eq!(track.next_artist, "David Bowie");
        assert_eq!(track.next_album, "\"Heroes\"");
        assert_eq!(track.next_title, "Sons of the Silent Age");
        assert_eq!(track.next_art_uri, "https://i.scdn.co/image/ab67616d0000b273");
        assert!(Arc::ptr_eq(track.last_event_details.as_ref().expect("set"), &ev));
    }

    #[test]
    fn radio_stream_uses_station_show_and_stream_content() {
        let ev = event(Some(DIDL_RADIO_ENQUEUED), Some(DIDL_RADIO_CURRENT), None);
        let mut track = Track::new("x-sonosapi-stream:s2846?sid=254&flags=8224&sn=0");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        // Station name wins over the stream URL the current item reports as title
        assert_eq!(track.title, "BBC Radio 2");
        assert_eq!(track.album, "Drivetime");
        assert_eq!(track.artist, "Blondie - Atomic");
        assert_eq!(
            track.album_art,
            "http://192.168.1.10:1400/getaa?s=1&u=x-sonosapi-stream%3as2846%3fsid%3d254"
        );
    }

    #[test]
    fn existing_fields_are_never_overwritten() {
        let ev = event(Some(DIDL_RADIO_ENQUEUED), Some(DIDL_RADIO_CURRENT), Some(DIDL_TRACK_NEXT));
        let mut track = Track {
            uri: "x-sonosapi-stream:s2846".into(),
            title: "Polled title".into(),
            artist: "Polled artist".into(),
            album: "Polled album".into(),
            album_art: "https://example.com/polled.jpg".into(),
            next_title: "Polled next".into(),
            ..Default::default()
        };

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert_eq!(track.title, "Polled title");
        assert_eq!(track.artist, "Polled artist");
        assert_eq!(track.album, "Polled album");
        assert_eq!(track.album_art, "https://example.com/polled.jpg");
        assert_eq!(track.next_title, "Polled next");
        assert_eq!(track.next_artist, "David Bowie");
    }

    #[test]
    fn merge_is_idempotent() {
        let ev = event(Some(DIDL_RADIO_ENQUEUED), Some(DIDL_RADIO_CURRENT), Some(DIDL_TRACK_NEXT));
        let mut once = Track::new("x-sonosapi-stream:s2846");
        merge_track_and_event(&mut once, Some(Arc::clone(&ev)), None, IP).expect("valid");

        let mut twice = once.clone();
        merge_track_and_event(&mut twice, Some(ev), None, IP).expect("valid");

        assert_eq!(once, twice);
    }

    #[test]
    fn sentinels_never_reach_title_artist_or_album() {
        let ev = event(None, Some(DIDL_RADIO_CONNECTING), None);
        let mut track = Track::new("x-sonosapi-stream:s2846");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert!(track.title.is_empty());
        assert!(track.artist.is_empty());
        assert!(track.album.is_empty());
    }

    #[test]
    fn sentinel_station_title_falls_through_to_current_title() {
        let enqueued = DidlMetadata::from_meta(&TrackMetaData {
            title: Some("ZPSTR_CONNECTING".into()),
            ..Default::default()
        });
        let ev = Arc::new(TransportEvent {
            enqueued_transport_uri_meta_data: Some(enqueued),
            current_track_meta_data: Some(DidlMetadata::new(DIDL_TRACK_CURRENT)),
            ..Default::default()
        });
        let mut track = Track::new("x-sonos-spotify:1");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert_eq!(track.title, "Heroes");
    }

    #[test]
    fn radio_show_suffix_is_stripped() {
        let ev = current_only(TrackMetaData {
            radio_show: Some("Drivetime,p239255".into()),
            album: Some("Ignored album".into()),
            ..Default::default()
        });
        let mut track = Track::new("x-sonosapi-stream:s2846");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert_eq!(track.album, "Drivetime");
    }

    #[test]
    fn radio_show_without_name_is_kept_whole() {
        let ev = current_only(TrackMetaData {
            radio_show: Some(",p239255".into()),
            ..Default::default()
        });
        let mut track = Track::new("x-sonosapi-stream:s2846");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert_eq!(track.album, ",p239255");
    }

    #[test]
    fn sentinel_radio_show_does_not_fall_back_to_album() {
        let ev = current_only(TrackMetaData {
            radio_show: Some("ZPSTR_BUFFERING".into()),
            album: Some("Real album".into()),
            ..Default::default()
        });
        let mut track = Track::new("x-sonosapi-stream:s2846");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert!(track.album.is_empty());
    }

    #[test]
    fn empty_stream_content_falls_back_to_creator() {
        // DIDL_TRACK_CURRENT has an empty <r:streamContent/>
        let ev = event(None, Some(DIDL_TRACK_CURRENT), None);
        let mut track = Track::new("x-sonos-spotify:1");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert_eq!(track.artist, "David Bowie");
    }

    #[test]
    fn absolute_album_art_is_kept() {
        let ev = current_only(TrackMetaData {
            album_art_uri: Some("https://cdn.example.com/cover.jpg".into()),
            ..Default::default()
        });
        let mut track = Track::new("x-sonos-http:1");

        merge_track_and_event(&mut track, Some(ev), None, IP).expect("valid");

        assert_eq!(track.album_art, "https://cdn.example.com/cover.jpg");
    }

    #[test]
    fn malformed_fragment_keeps_earlier_fields() {
        let ev = event(Some(DIDL_RADIO_ENQUEUED), Some(DIDL_MALFORMED), Some(DIDL_TRACK_NEXT));
        let mut track = Track::new("x-sonosapi-stream:s2846");

        let result = merge_track_and_event(&mut track, Some(Arc::clone(&ev)), None, IP);

        assert!(result.is_err());
        assert_eq!(track.title, "BBC Radio 2");
        // Resolution stops at the bad fragment, so the next track is not read
        assert!(track.next_title.is_empty());
        assert!(track.last_event_details.is_some());
    }

    #[test]
    fn strip_show_id_cuts_at_first_separator() {
        assert_eq!(strip_show_id("Drivetime,p239255"), "Drivetime");
        assert_eq!(strip_show_id("Rock,pop,p12"), "Rock");
        assert_eq!(strip_show_id("No suffix"), "No suffix");
    }
}
