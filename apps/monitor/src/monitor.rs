//! Now-playing polling loop.

use std::sync::Arc;
use std::time::Duration;

use sonos_now_playing::{NowPlayingController, TransportEvent, Track};
use tokio::sync::mpsc::Receiver;
use tokio::time::MissedTickBehavior;

/// Polls one speaker and announces track changes.
pub struct Monitor {
    controller: NowPlayingController,
    events: Receiver<Arc<TransportEvent>>,
    poll_interval: Duration,
    previous: Option<Track>,
}

impl Monitor {
    pub fn new(
        controller: NowPlayingController,
        events: Receiver<Arc<TransportEvent>>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            controller,
            events,
            poll_interval,
            previous: None,
        }
    }

    /// Runs one polling tick. Returns `true` when the track changed.
    ///
    /// A failed poll is logged and leaves the previous track and any queued
    /// events in place for the next tick.
    pub async fn tick(&mut self) -> bool {
        let polled = match self.controller.current_track().await {
            Ok(track) => track,
            Err(e) => {
                log::warn!("[Monitor] Failed to read track info: {}", e);
                return false;
            }
        };

        let event = self.controller.latest_event(&mut self.events);

        let track = self
            .controller
            .merge_track_info_and_event(polled, event, self.previous.as_ref());
        let changed = self
            .controller
            .has_track_changed(self.previous.as_ref(), Some(&track));

        if changed {
            log::info!("Now playing: {}", track.display_name());
            if !track.album.is_empty() {
                log::info!("  Album: {}", track.album);
            }
            if !track.next_title.is_empty() {
                log::info!("  Up next: {} - {}", track.next_artist, track.next_title);
            }
        }

        self.previous = Some(track);
        changed
    }

    pub fn current(&self) -> Option<&Track> {
        self.previous.as_ref()
    }

    /// Polls until the task is cancelled.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}
