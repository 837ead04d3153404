//! Combined shuffle/repeat play mode.
//!
//! Sonos exposes shuffle and repeat as one enumerated AVTransport variable.
//! Hosts think in two booleans, so this module maps between the two views.

use thiserror::Error;

/// AVTransport play mode values understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayMode {
    Normal,
    Shuffle,
    ShuffleNoRepeat,
    RepeatAll,
}

impl PlayMode {
    /// Maps the host's `(is_random, is_loop)` pair onto a play mode.
    #[must_use]
    pub fn from_flags(is_random: bool, is_loop: bool) -> Self {
        match (is_random, is_loop) {
            (false, false) => Self::Normal,
            (true, true) => Self::Shuffle,
            (true, false) => Self::ShuffleNoRepeat,
            (false, true) => Self::RepeatAll,
        }
    }

    /// Returns `(is_random, is_loop)` for this mode.
    #[must_use]
    pub fn flags(self) -> (bool, bool) {
        match self {
            Self::Normal => (false, false),
            Self::Shuffle => (true, true),
            Self::ShuffleNoRepeat => (true, false),
            Self::RepeatAll => (false, true),
        }
    }

    /// Interprets a raw device value.
    ///
    /// Modes this crate does not model (`REPEAT_ONE`, `SHUFFLE_REPEAT_ONE`)
    /// and garbage read as [`PlayMode::Normal`].
    #[must_use]
    pub fn from_device(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            log::debug!("[Sonos] Unrecognised play mode {:?}, treating as NORMAL", value);
            Self::Normal
        })
    }

    /// The AVTransport string for this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Shuffle => "SHUFFLE",
            Self::ShuffleNoRepeat => "SHUFFLE_NOREPEAT",
            Self::RepeatAll => "REPEAT_ALL",
        }
    }
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown play mode string.
#[derive(Debug, Clone, Error)]
#[error("unknown play mode: {0}")]
pub struct ParsePlayModeError(pub String);

impl std::str::FromStr for PlayMode {
    type Err = ParsePlayModeError;

    /// Parses a play mode, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "SHUFFLE" => Ok(Self::Shuffle),
            "SHUFFLE_NOREPEAT" => Ok(Self::ShuffleNoRepeat),
            "REPEAT_ALL" => Ok(Self::RepeatAll),
            _ => Err(ParsePlayModeError(s.to_string())),
        }
    }
}
