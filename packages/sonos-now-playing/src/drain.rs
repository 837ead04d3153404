//! Drains an event queue down to its newest item.
//!
//! Events arrive faster than the host polls. Only the newest one matters for
//! the merge, so each tick empties the queue and keeps the last item.

use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};

/// Error raised by a queue that can no longer deliver events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Every sender is gone; no further events will arrive.
    #[error("event queue disconnected")]
    Disconnected,
}

/// A queue that can be polled without blocking.
pub trait EventSource<T> {
    /// Returns the next queued item, or `Ok(None)` when the queue is empty.
    ///
    /// # Errors
    /// Returns [`QueueError`] when the queue can no longer produce items.
    fn try_next(&mut self) -> Result<Option<T>, QueueError>;
}

impl<T> EventSource<T> for Receiver<T> {
    fn try_next(&mut self) -> Result<Option<T>, QueueError> {
        map_try_recv(self.try_recv())
    }
}

impl<T> EventSource<T> for UnboundedReceiver<T> {
    fn try_next(&mut self) -> Result<Option<T>, QueueError> {
        map_try_recv(self.try_recv())
    }
}

fn map_try_recv<T>(result: Result<T, TryRecvError>) -> Result<Option<T>, QueueError> {
    match result {
        Ok(item) => Ok(Some(item)),
        Err(TryRecvError::Empty) => Ok(None),
        Err(TryRecvError::Disconnected) => Err(QueueError::Disconnected),
    }
}

/// Empties `source` and returns the last item taken, or `None` if it was empty.
///
/// Never blocks. A queue error ends the drain quietly; items taken before it
/// still count.
pub fn latest_event<T, S>(source: &mut S) -> Option<T>
where
    T: std::fmt::Debug,
    S: EventSource<T> + ?Sized,
{
    let mut latest = None;
    loop {
        match source.try_next() {
            Ok(Some(item)) => {
                log::debug!("[Events] Got event {:?}", item);
                latest = Some(item);
            }
            Ok(None) => break,
            Err(e) => {
                log::debug!("[Events] Queue drain stopped: {}", e);
                break;
            }
        }
    }
    latest
}
