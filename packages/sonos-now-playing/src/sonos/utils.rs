//! Shared XML and URL helpers for talking to Sonos speakers.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::protocol_constants::SONOS_PORT;

// ─────────────────────────────────────────────────────────────────────────────
// XML Parsing Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Extracts text content from the first occurrence of an XML element.
///
/// Searches for an element by its local name (ignoring namespace prefixes)
/// and returns its decoded text content.
///
/// # Example
/// ```ignore
/// let xml = r#"<u:CurrentPlayMode>SHUFFLE</u:CurrentPlayMode>"#;
/// assert_eq!(extract_xml_text(xml, "CurrentPlayMode"), Some("SHUFFLE".to_string()));
/// ```
pub fn extract_xml_text(xml: &str, element_name: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let target_bytes = element_name.as_bytes();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == target_bytes => {
                if let Ok(text) = reader.read_text(e.name()) {
                    let decoded = html_escape::decode_html_entities(&text);
                    return Some(decoded.to_string());
                }
            }
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == target_bytes => {
                return Some(String::new());
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    None
}

/// Extracts `val` attributes from empty XML elements.
///
/// UPnP `LastChange` payloads convey state as empty elements with a `val`
/// attribute:
/// ```xml
/// <TransportState val="PLAYING"/>
/// <r:NextTrackMetaData val="&lt;DIDL-Lite ..."/>
/// ```
///
/// Element names are matched by local name, so `r:`-prefixed variables are
/// found by their bare name. The first occurrence of each name wins.
pub fn extract_empty_val_attrs(xml: &str, element_names: &[&str]) -> HashMap<String, String> {
    let mut result = HashMap::new();
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => {
                let local = e.local_name();
                if let Some(&name) = element_names
                    .iter()
                    .find(|&&n| n.as_bytes() == local.as_ref())
                {
                    if let Some(val) = get_xml_attr(e, b"val") {
                        result.entry(name.to_string()).or_insert(val);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    result
}

/// Gets an attribute value from an XML element, with entities decoded.
pub fn get_xml_attr(elem: &BytesStart, attr_name: &[u8]) -> Option<String> {
    elem.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == attr_name)
        .map(|a| {
            let raw = String::from_utf8_lossy(&a.value);
            html_escape::decode_html_entities(&raw).into_owned()
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// URL Building
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a Sonos speaker URL for the given IP and endpoint.
pub fn build_sonos_url(ip: &str, endpoint: &str) -> String {
    format!("http://{}:{}{}", ip, SONOS_PORT, endpoint)
}

/// Makes an album art URI absolute.
///
/// Speakers report artwork they serve themselves as a path
/// (`/getaa?s=1&u=...`); those are resolved against the speaker's own
/// HTTP port. Anything already carrying an `http:`/`https:` scheme is
/// returned untouched.
///
/// # Example
/// ```ignore
/// assert_eq!(
///     qualify_album_art_uri("/getaa?s=1", "192.168.1.10"),
///     "http://192.168.1.10:1400/getaa?s=1"
/// );
/// ```
pub fn qualify_album_art_uri(uri: &str, ip: &str) -> String {
    if uri.starts_with("http:") || uri.starts_with("https:") {
        uri.to_string()
    } else {
        build_sonos_url(ip, uri)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// XML Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Escapes XML special characters for embedding in XML content.
///
/// Used for SOAP arguments and DIDL-Lite metadata values.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
