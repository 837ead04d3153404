//! Now-playing controller.
//!
//! Ties a speaker, a notifier and the pure merge/change/drain functions
//! together for a host polling loop:
//!
//! ```ignore
//! let mut previous: Option<Track> = None;
//! loop {
//!     let event = controller.latest_event(&mut events);
//!     let polled = controller.current_track().await?;
//!     let track = controller.merge_track_info_and_event(polled, event, previous.as_ref());
//!     if controller.has_track_changed(previous.as_ref(), Some(&track)) {
//!         display(&track);
//!     }
//!     previous = Some(track);
//! }
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use crate::change::has_track_changed;
use crate::drain::{latest_event, EventSource};
use crate::event::TransportEvent;
use crate::merge::merge_track_and_event;
use crate::notify::{Notice, NotificationLatch, Notifier};
use crate::play_mode::PlayMode;
use crate::sonos::soap::SoapResult;
use crate::sonos::traits::SonosDevice;
use crate::track::Track;

/// Long-lived state for polling one speaker.
///
/// Owns the one-shot latch for the "metadata unreadable" notice, so each
/// controller notifies at most once.
pub struct NowPlayingController {
    device: Arc<dyn SonosDevice>,
    notifier: Arc<dyn Notifier>,
    notice: Notice,
    latch: NotificationLatch,
}

impl NowPlayingController {
    pub fn new(device: Arc<dyn SonosDevice>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            device,
            notifier,
            notice: Notice::default(),
            latch: NotificationLatch::new(),
        }
    }

    /// Replaces the notice shown when event metadata cannot be read.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = notice;
        self
    }

    pub fn device(&self) -> &Arc<dyn SonosDevice> {
        &self.device
    }

    /// Reads the play mode as `(is_random, is_loop)`.
    ///
    /// Modes without a boolean equivalent read as `(false, false)`.
    pub async fn get_play_mode(&self) -> SoapResult<(bool, bool)> {
        let raw = self.device.play_mode().await?;
        Ok(PlayMode::from_device(&raw).flags())
    }

    /// Sets the play mode from `(is_random, is_loop)`.
    pub async fn set_play_mode(&self, is_random: bool, is_loop: bool) -> SoapResult<()> {
        self.device
            .set_play_mode(PlayMode::from_flags(is_random, is_loop))
            .await
    }

    /// Polls the speaker for the current track.
    pub async fn current_track(&self) -> SoapResult<Track> {
        self.device.track_info().await
    }

    /// Completes `track` from `event`, falling back to `previous`'s event.
    ///
    /// Never fails. Unreadable event metadata is logged, the partially
    /// merged track is returned, and the first such failure raises the
    /// configured notice.
    #[must_use]
    pub fn merge_track_info_and_event(
        &self,
        mut track: Track,
        event: Option<Arc<TransportEvent>>,
        previous: Option<&Track>,
    ) -> Track {
        if let Err(e) =
            merge_track_and_event(&mut track, event, previous, self.device.ip_address())
        {
            log::debug!("[Merge] Failed to update using event details: {}", e);
            if self.latch.trip() {
                self.notifier.notify(&self.notice);
            }
        }
        track
    }

    /// See [`has_track_changed`].
    #[must_use]
    pub fn has_track_changed(&self, old: Option<&Track>, new: Option<&Track>) -> bool {
        has_track_changed(old, new)
    }

    /// See [`latest_event`].
    pub fn latest_event<T, S>(&self, source: &mut S) -> Option<T>
    where
        T: Debug,
        S: EventSource<T> + ?Sized,
    {
        latest_event(source)
    }
}
