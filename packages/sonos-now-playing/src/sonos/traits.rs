//! Trait abstraction over a single Sonos speaker.
//!
//! The controller depends on [`SonosDevice`] rather than on the SOAP client,
//! so tests can substitute a scripted speaker.

use async_trait::async_trait;

use crate::play_mode::PlayMode;
use crate::sonos::soap::SoapResult;
use crate::track::Track;

/// AVTransport operations the now-playing controller needs.
#[async_trait]
pub trait SonosDevice: Send + Sync {
    /// IP address of the speaker, used to qualify relative album art.
    fn ip_address(&self) -> &str;

    /// Reads the raw `PlayMode` from `GetTransportSettings`.
    async fn play_mode(&self) -> SoapResult<String>;

    /// Sends `SetPlayMode`.
    async fn set_play_mode(&self, mode: PlayMode) -> SoapResult<()>;

    /// Reads the current track from `GetPositionInfo`.
    ///
    /// The returned [`Track`] has no event details attached.
    async fn track_info(&self) -> SoapResult<Track>;
}
