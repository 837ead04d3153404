//! Monitor configuration.
//!
//! Supports loading from YAML files with environment variable overrides.

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use sonos_now_playing::Notice;

/// Monitor configuration loaded from YAML with environment overrides.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// IP address of the speaker to follow.
    /// Override: `SONOS_MONITOR_SPEAKER_IP`
    pub speaker_ip: Option<IpAddr>,

    /// Port the GENA callback listener binds to.
    /// Override: `SONOS_MONITOR_BIND_PORT`
    pub bind_port: u16,

    /// IP address the speaker should send events to.
    /// If not specified, auto-detection will be attempted.
    /// Override: `SONOS_MONITOR_ADVERTISE_IP`
    pub advertise_ip: Option<IpAddr>,

    /// Milliseconds between track polls.
    /// Override: `SONOS_MONITOR_POLL_INTERVAL_MS`
    pub poll_interval_ms: u64,

    /// Events buffered between two polls before new ones are dropped.
    pub event_queue_capacity: usize,

    /// Notice raised when event metadata cannot be read.
    pub notice: NoticeConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            speaker_ip: None,
            bind_port: 49410,
            advertise_ip: None,
            poll_interval_ms: 1000,
            event_queue_capacity: 32,
            notice: NoticeConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    pub heading: String,
    pub message: String,
    pub icon: String,
    pub duration_secs: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        let notice = Notice::default();
        Self {
            heading: notice.heading,
            message: notice.message,
            icon: notice.icon,
            duration_secs: notice.duration.as_secs(),
        }
    }
}

impl MonitorConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; unparsable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ip) = lookup("SONOS_MONITOR_SPEAKER_IP").and_then(|v| v.parse().ok()) {
            self.speaker_ip = Some(ip);
        }

        if let Some(port) = lookup("SONOS_MONITOR_BIND_PORT").and_then(|v| v.parse().ok()) {
            self.bind_port = port;
        }

        if let Some(ip) = lookup("SONOS_MONITOR_ADVERTISE_IP").and_then(|v| v.parse().ok()) {
            self.advertise_ip = Some(ip);
        }

        if let Some(ms) = lookup("SONOS_MONITOR_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.poll_interval_ms = ms;
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Converts the notice section to the library's [`Notice`].
    pub fn to_notice(&self) -> Notice {
        Notice {
            heading: self.notice.heading.clone(),
            message: self.notice.message.clone(),
            icon: self.notice.icon.clone(),
            duration: Duration::from_secs(self.notice.duration_secs),
        }
    }
}
