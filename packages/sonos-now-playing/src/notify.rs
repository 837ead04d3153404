//! User-facing notifications.
//!
//! The library never talks to a UI directly. Hosts plug in a [`Notifier`];
//! the controller raises a [`Notice`] through it when event metadata turns
//! out to be unreadable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Content of a host notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub heading: String,
    pub message: String,
    /// Icon path or name understood by the host.
    pub icon: String,
    /// How long the host should keep the notice visible.
    pub duration: Duration,
}

impl Default for Notice {
    fn default() -> Self {
        Self {
            heading: "Sonos".to_string(),
            message: "Track metadata from the speaker could not be read".to_string(),
            icon: String::new(),
            duration: Duration::from_secs(5),
        }
    }
}

/// Sink for user-facing notifications.
///
/// # Example
///
/// ```ignore
/// struct Desktop;
///
/// impl Notifier for Desktop {
///     fn notify(&self, notice: &Notice) {
///         show_toast(&notice.heading, &notice.message);
///     }
/// }
/// ```
pub trait Notifier: Send + Sync {
    /// Presents `notice` to the user.
    fn notify(&self, notice: &Notice);
}

/// Writes notices to the log at warn level.
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, notice: &Notice) {
        log::warn!("[Notice] {}: {}", notice.heading, notice.message);
    }
}

/// Discards every notice.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: &Notice) {}
}

/// One-shot flag guarding the "metadata unreadable" notice.
///
/// Trips at most once per controller lifetime.
#[derive(Debug, Default)]
pub struct NotificationLatch {
    tripped: AtomicBool,
}

impl NotificationLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the latch as tripped.
    ///
    /// Returns `true` only for the call that tripped it.
    pub fn trip(&self) -> bool {
        !self.tripped.swap(true, Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }
}
