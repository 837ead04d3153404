//! DIDL-Lite metadata decoding and encoding.
//!
//! Sonos describes the current, next, and enqueued items as DIDL-Lite XML
//! fragments. Besides the standard `dc:`/`upnp:` fields, radio streams carry
//! two Rincon extensions:
//!
//! - `r:streamContent` - "now playing" text of a radio stream (used as artist)
//! - `r:radioShowMd` - show name with a trailing show id (used as album)

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;

use crate::sonos::utils::escape_xml;

/// Errors raised while decoding a DIDL-Lite fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DidlError {
    /// The XML itself is malformed.
    #[error("malformed DIDL-Lite: {0}")]
    Xml(String),

    /// The payload parsed but is not a DIDL-Lite document (e.g. `NOT_IMPLEMENTED`).
    #[error("not a DIDL-Lite document")]
    NotDidl,
}

/// Convenient Result alias for DIDL-Lite decoding.
pub type DidlResult<T> = Result<T, DidlError>;

/// Fields of a single DIDL-Lite item that the now-playing merge cares about.
///
/// Every field is optional; absence means the speaker did not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetaData {
    /// `dc:title`
    pub title: Option<String>,
    /// `dc:creator`
    pub creator: Option<String>,
    /// `upnp:album`
    pub album: Option<String>,
    /// `upnp:albumArtURI`, possibly relative to the speaker.
    pub album_art_uri: Option<String>,
    /// `r:radioShowMd`
    pub radio_show: Option<String>,
    /// `r:streamContent`
    pub stream_content: Option<String>,
}

/// Decodes the first item of a DIDL-Lite document.
///
/// A document without any item decodes to an empty [`TrackMetaData`].
///
/// # Errors
/// Returns [`DidlError::NotDidl`] when the root element is not `DIDL-Lite`
/// and [`DidlError::Xml`] when the XML is malformed.
pub fn parse_didl_lite(xml: &str) -> DidlResult<TrackMetaData> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut meta = TrackMetaData::default();
    let mut seen_root = false;
    let mut in_item = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = e.local_name();
                let local = local.as_ref();

                if !seen_root {
                    if local != b"DIDL-Lite" {
                        return Err(DidlError::NotDidl);
                    }
                    seen_root = true;
                } else if local == b"item" || local == b"container" {
                    if in_item {
                        // Only the first item is relevant
                        break;
                    }
                    in_item = true;
                } else if in_item {
                    let slot = match local {
                        b"title" => Some(&mut meta.title),
                        b"creator" => Some(&mut meta.creator),
                        b"album" => Some(&mut meta.album),
                        b"albumArtURI" => Some(&mut meta.album_art_uri),
                        b"radioShowMd" => Some(&mut meta.radio_show),
                        b"streamContent" => Some(&mut meta.stream_content),
                        _ => None,
                    };

                    if let Some(slot) = slot {
                        let text = reader
                            .read_text(e.name())
                            .map_err(|err| DidlError::Xml(err.to_string()))?;
                        // First occurrence wins (items may list several creators)
                        if slot.is_none() {
                            *slot = Some(html_escape::decode_html_entities(&text).into_owned());
                        }
                    }
                }
            }
            Ok(Event::Empty(ref e)) if !seen_root => {
                if e.local_name().as_ref() != b"DIDL-Lite" {
                    return Err(DidlError::NotDidl);
                }
                seen_root = true;
            }
            Ok(Event::End(ref e)) => {
                let local = e.local_name();
                if local.as_ref() == b"item" || local.as_ref() == b"container" {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(DidlError::Xml(err.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(DidlError::NotDidl);
    }

    Ok(meta)
}

/// Encodes metadata as a single-item DIDL-Lite document.
///
/// Produces the same shape the speaker sends in `CurrentTrackMetaData`, so the
/// output round-trips through [`parse_didl_lite`].
#[must_use]
pub fn format_didl_lite(meta: &TrackMetaData) -> String {
    let mut didl = String::from(
        r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/">"#,
    );
    didl.push_str(r#"<item id="-1" parentID="-1" restricted="true">"#);

    let fields = [
        ("dc:title", &meta.title),
        ("dc:creator", &meta.creator),
        ("upnp:album", &meta.album),
        ("upnp:albumArtURI", &meta.album_art_uri),
        ("r:radioShowMd", &meta.radio_show),
        ("r:streamContent", &meta.stream_content),
    ];
    for (tag, value) in fields {
        if let Some(value) = value {
            didl.push_str(&format!("<{tag}>{}</{tag}>", escape_xml(value)));
        }
    }

    didl.push_str("<upnp:class>object.item</upnp:class>");
    didl.push_str("</item>");
    didl.push_str("</DIDL-Lite>");

    didl
}
