//! Response models.

use serde::{Deserialize, Serialize};

/// Placeholder in [`Ingest::url_template`] replaced by the stream key.
pub const STREAM_KEY_PLACEHOLDER: &str = "{stream_key}";

/// A regional RTMP ingest server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingest {
    #[serde(rename = "_id")]
    pub id: u64,
    /// Load indicator reported by Twitch; higher is better.
    pub availability: f64,
    /// Whether Twitch recommends this server by default.
    pub default: bool,
    pub name: String,
    /// RTMP URL containing `{stream_key}`.
    pub url_template: String,
}

impl Ingest {
    /// Builds the RTMP URL for `stream_key`.
    #[must_use]
    pub fn stream_url(&self, stream_key: &str) -> String {
        self.url_template.replace(STREAM_KEY_PLACEHOLDER, stream_key)
    }
}

/// Body of the ingests endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestList {
    pub ingests: Vec<Ingest>,
}
