//! SOAP-backed [`SonosDevice`] implementation.

use async_trait::async_trait;
use reqwest::Client;

use crate::merge::resolved;
use crate::play_mode::PlayMode;
use crate::sonos::didl::parse_didl_lite;
use crate::sonos::retry::with_retry;
use crate::sonos::services::SonosService;
use crate::sonos::soap::{SoapError, SoapRequestBuilder, SoapResult};
use crate::sonos::traits::SonosDevice;
use crate::sonos::utils::{extract_xml_text, qualify_album_art_uri};
use crate::track::Track;

/// A single speaker reached over its AVTransport control URL.
pub struct SonosClientImpl {
    client: Client,
    ip: String,
}

impl SonosClientImpl {
    /// Creates a client for the speaker at `ip`, sharing `client`'s pool.
    pub fn new(client: Client, ip: impl Into<String>) -> Self {
        Self {
            client,
            ip: ip.into(),
        }
    }
}

#[async_trait]
impl SonosDevice for SonosClientImpl {
    fn ip_address(&self) -> &str {
        &self.ip
    }

    async fn play_mode(&self) -> SoapResult<String> {
        let response = with_retry("GetTransportSettings", || {
            SoapRequestBuilder::new(&self.client, &self.ip)
                .service(SonosService::AVTransport)
                .action("GetTransportSettings")
                .instance_id()
                .send()
        })
        .await?;

        parse_play_mode_response(&response)
    }

    async fn set_play_mode(&self, mode: PlayMode) -> SoapResult<()> {
        with_retry("SetPlayMode", || {
            SoapRequestBuilder::new(&self.client, &self.ip)
                .service(SonosService::AVTransport)
                .action("SetPlayMode")
                .instance_id()
                .arg("NewPlayMode", mode.as_str())
                .send()
        })
        .await?;

        log::info!("[Sonos] Play mode on {} set to {}", self.ip, mode);
        Ok(())
    }

    async fn track_info(&self) -> SoapResult<Track> {
        let response = with_retry("GetPositionInfo", || {
            SoapRequestBuilder::new(&self.client, &self.ip)
                .service(SonosService::AVTransport)
                .action("GetPositionInfo")
                .instance_id()
                .send()
        })
        .await?;

        parse_position_info_response(&response, &self.ip)
    }
}

/// Extracts `PlayMode` from a `GetTransportSettings` response.
pub(crate) fn parse_play_mode_response(xml: &str) -> SoapResult<String> {
    extract_xml_text(xml, "PlayMode").ok_or(SoapError::MissingField("PlayMode"))
}

/// Builds a [`Track`] from a `GetPositionInfo` response.
///
/// Line-in and some radio sources report `NOT_IMPLEMENTED` instead of
/// DIDL-Lite; such tracks keep only their URI. `ZPSTR_*` placeholders are
/// left out so a later event can still fill those fields.
pub(crate) fn parse_position_info_response(xml: &str, ip: &str) -> SoapResult<Track> {
    let uri = extract_xml_text(xml, "TrackURI").ok_or(SoapError::MissingField("TrackURI"))?;
    let mut track = Track::new(uri);

    let raw_meta = extract_xml_text(xml, "TrackMetaData").unwrap_or_default();
    if raw_meta.is_empty() {
        return Ok(track);
    }

    match parse_didl_lite(&raw_meta) {
        Ok(meta) => {
            track.title = resolved(&meta.title).unwrap_or_default().to_string();
            track.artist = resolved(&meta.creator).unwrap_or_default().to_string();
            track.album = resolved(&meta.album).unwrap_or_default().to_string();
            if let Some(art) = meta.album_art_uri.filter(|a| !a.is_empty()) {
                track.album_art = qualify_album_art_uri(&art, ip);
            }
        }
        Err(e) => {
            log::debug!("[Sonos] No track metadata for {}: {}", track.uri, e);
        }
    }

    Ok(track)
}
