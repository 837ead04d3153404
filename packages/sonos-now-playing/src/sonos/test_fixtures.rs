//! Shared test fixtures for DIDL-Lite metadata and UPnP payloads.
//!
//! These constants are used by multiple test modules to avoid duplication.

use crate::sonos::utils::escape_xml;

/// CurrentTrackMetaData for a Spotify track queued on the speaker.
pub const DIDL_TRACK_CURRENT: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="-1" parentID="-1" restricted="true"><res protocolInfo="sonos.com-spotify:*:audio/x-spotify:*" duration="0:06:10">x-sonos-spotify:spotify%3atrack%3a7Jh1bpe76CNTCgdgAdBw4Z?sid=9&amp;flags=8224&amp;sn=1</res><r:streamContent></r:streamContent><upnp:albumArtURI>/getaa?s=1&amp;u=x-sonos-spotify%3aspotify%3atrack%3a7Jh1bpe76CNTCgdgAdBw4Z</upnp:albumArtURI><dc:title>Heroes</dc:title><upnp:class>object.item.audioItem.musicTrack</upnp:class><dc:creator>David Bowie</dc:creator><upnp:album>&quot;Heroes&quot;</upnp:album></item></DIDL-Lite>"#;

/// NextTrackMetaData following [`DIDL_TRACK_CURRENT`].
pub const DIDL_TRACK_NEXT: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="-1" parentID="-1" restricted="true"><upnp:albumArtURI>https://i.scdn.co/image/ab67616d0000b273</upnp:albumArtURI><dc:title>Sons of the Silent Age</dc:title><upnp:class>object.item.audioItem.musicTrack</upnp:class><dc:creator>David Bowie</dc:creator><upnp:album>&quot;Heroes&quot;</upnp:album></item></DIDL-Lite>"#;

/// CurrentTrackMetaData of a TuneIn radio stream mid-show.
pub const DIDL_RADIO_CURRENT: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="-1" parentID="-1" restricted="true"><res protocolInfo="x-rincon-mp3radio:*:*:*">x-rincon-mp3radio://bbcmedia.ic.llnwd.net/stream/bbcmedia_radio2_mf_p</res><r:streamContent>Blondie - Atomic</r:streamContent><r:radioShowMd>Drivetime,p239255</r:radioShowMd><upnp:albumArtURI>/getaa?s=1&amp;u=x-sonosapi-stream%3as2846%3fsid%3d254</upnp:albumArtURI><dc:title>x-sonosapi-stream:s2846?sid=254&amp;flags=8224&amp;sn=0</dc:title><upnp:class>object.item</upnp:class></item></DIDL-Lite>"#;

/// EnqueuedTransportURIMetaData naming the radio station.
pub const DIDL_RADIO_ENQUEUED: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="F00092020s2846" parentID="L" restricted="true"><dc:title>BBC Radio 2</dc:title><upnp:class>object.item.audioItem.audioBroadcast</upnp:class></item></DIDL-Lite>"#;

/// CurrentTrackMetaData while a radio stream is still connecting.
pub const DIDL_RADIO_CONNECTING: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="-1" parentID="-1" restricted="true"><r:streamContent>ZPSTR_CONNECTING</r:streamContent><r:radioShowMd>ZPSTR_CONNECTING</r:radioShowMd><dc:title>ZPSTR_CONNECTING</dc:title><dc:creator>ZPSTR_CONNECTING</dc:creator><upnp:album>ZPSTR_CONNECTING</upnp:album><upnp:class>object.item</upnp:class></item></DIDL-Lite>"#;

/// Truncated metadata as occasionally sent by older firmware.
pub const DIDL_MALFORMED: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/"><item><dc:title>Cut off</dc:creator></item></DIDL-Lite>"#;

/// GetTransportSettings response with a shuffle+repeat play mode.
pub const TRANSPORT_SETTINGS_RESPONSE: &str = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:GetTransportSettingsResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1"><PlayMode>SHUFFLE</PlayMode><RecQualityMode>NOT_IMPLEMENTED</RecQualityMode></u:GetTransportSettingsResponse></s:Body></s:Envelope>"#;

/// Builds a GetPositionInfo response carrying the given track URI and metadata.
pub fn position_info_response(track_uri: &str, track_metadata: &str) -> String {
    format!(
        r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:GetPositionInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1"><Track>1</Track><TrackDuration>0:06:10</TrackDuration><TrackMetaData>{}</TrackMetaData><TrackURI>{}</TrackURI><RelTime>0:01:02</RelTime><AbsTime>NOT_IMPLEMENTED</AbsTime><RelCount>2147483647</RelCount><AbsCount>2147483647</AbsCount></u:GetPositionInfoResponse></s:Body></s:Envelope>"#,
        escape_xml(track_metadata),
        escape_xml(track_uri)
    )
}

/// Builds an AVTransport NOTIFY body whose LastChange carries the given variables.
///
/// Names may include the `r:` prefix used for Rincon-specific variables.
/// Values are escaped once for the attribute and the whole event once more
/// for the `LastChange` element, exactly as the speaker does.
pub fn av_transport_notify(vars: &[(&str, &str)]) -> String {
    let mut inner = String::from(
        r#"<Event xmlns="urn:schemas-upnp-org:metadata-1-0/AVT/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/"><InstanceID val="0">"#,
    );
    for (name, val) in vars {
        inner.push_str(&format!(r#"<{} val="{}"/>"#, name, escape_xml(val)));
    }
    inner.push_str("</InstanceID></Event>");

    format!(
        r#"<?xml version="1.0"?><e:propertyset xmlns:e="urn:schemas-upnp-org:event-1-0"><e:property><LastChange>{}</LastChange></e:property></e:propertyset>"#,
        escape_xml(&inner)
    )
}
