//! Sonos now-playing - track metadata merging for Sonos speakers.
//!
//! A host polls a speaker for its current track and receives AVTransport
//! events over GENA. Neither source is complete on its own; this crate
//! merges the two into one [`Track`] per polling tick and decides when the
//! result is worth redisplaying.
//!
//! # Architecture
//!
//! - [`merge`]: Fill-if-empty merge of event metadata into a polled track
//! - [`change`]: Track change detection between ticks
//! - [`drain`]: Non-blocking drain of an event queue to its newest item
//! - [`play_mode`]: Shuffle/repeat flags to and from the AVTransport play mode
//! - [`controller`]: Composition of the above around one speaker
//! - [`notify`]: Host notification seam and one-shot latch
//! - [`sonos`]: SOAP, GENA and DIDL-Lite plumbing
//! - [`error`]: Machine-readable error codes
//!
//! # Abstraction Traits
//!
//! - [`SonosDevice`](sonos::SonosDevice): Speaker operations the controller needs
//! - [`Notifier`](notify::Notifier): User-facing notifications
//! - [`EventSource`](drain::EventSource): Non-blocking event queues

#![warn(clippy::all)]

pub mod change;
pub mod controller;
pub mod drain;
pub mod error;
pub mod event;
pub mod merge;
pub mod notify;
pub mod play_mode;
pub mod protocol_constants;
pub mod sonos;
pub mod track;

pub use change::has_track_changed;
pub use controller::NowPlayingController;
pub use drain::{latest_event, EventSource, QueueError};
pub use error::ErrorCode;
pub use event::{DidlMetadata, TransportEvent};
pub use merge::merge_track_and_event;
pub use notify::{LoggingNotifier, NoopNotifier, Notice, NotificationLatch, Notifier};
pub use play_mode::{ParsePlayModeError, PlayMode};
pub use sonos::didl::{DidlError, DidlResult, TrackMetaData};
pub use sonos::gena_client::{GenaClient, GenaError, GenaResult, SubscribeResponse};
pub use sonos::gena_parser::parse_av_transport_event;
pub use sonos::soap::{SoapError, SoapResult};
pub use sonos::types::TransportState;
pub use sonos::{SonosClientImpl, SonosDevice, SonosService};
pub use track::Track;
