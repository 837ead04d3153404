//! Sonos Monitor - headless now-playing monitor for a Sonos speaker.
//!
//! Polls a speaker for its current track, completes it from AVTransport
//! events delivered over GENA, and logs every change.

mod config;
mod listener;
mod monitor;
mod subscription;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::RwLock;
use sonos_now_playing::{LoggingNotifier, NowPlayingController, SonosClientImpl};
use tokio::signal;
use tokio::sync::mpsc;

use crate::config::MonitorConfig;
use crate::listener::{create_router, ListenerState, NOTIFY_PATH};
use crate::monitor::Monitor;
use crate::subscription::AvTransportSubscription;

/// Sonos Monitor - follow what a Sonos speaker is playing.
#[derive(Parser, Debug)]
#[command(name = "sonos-monitor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "info", env = "SONOS_MONITOR_LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// Speaker IP address (overrides config file).
    #[arg(short, long)]
    speaker: Option<IpAddr>,

    /// Callback port (overrides config file).
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Advertise IP address (overrides config file).
    #[arg(short = 'a', long)]
    advertise_ip: Option<IpAddr>,

    /// Turn shuffle on or off at startup.
    #[arg(long, value_name = "BOOL")]
    shuffle: Option<bool>,

    /// Turn repeat on or off at startup.
    #[arg(long, value_name = "BOOL")]
    repeat: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Sonos Monitor v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        MonitorConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Apply CLI overrides
    if let Some(ip) = args.speaker {
        config.speaker_ip = Some(ip);
    }
    if let Some(port) = args.port {
        config.bind_port = port;
    }
    if let Some(ip) = args.advertise_ip {
        config.advertise_ip = Some(ip);
    }

    let speaker_ip = config.speaker_ip.context(
        "No speaker configured. \
         Please specify --speaker or set SONOS_MONITOR_SPEAKER_IP.",
    )?;

    // Resolve advertise IP: use explicit config, or fall back to auto-detection
    let advertise_ip = match config.advertise_ip {
        Some(ip) => ip,
        None => local_ip_address::local_ip().context(
            "Failed to auto-detect local IP address. \
             Please specify --advertise-ip or set SONOS_MONITOR_ADVERTISE_IP to the IP \
             address the speaker can reach.",
        )?,
    };

    log::info!(
        "Configuration: speaker={}, bind_port={}, advertise_ip={}, poll_interval={}ms",
        speaker_ip,
        config.bind_port,
        advertise_ip,
        config.poll_interval_ms
    );

    let http = reqwest::Client::new();
    let device = Arc::new(SonosClientImpl::new(http.clone(), speaker_ip.to_string()));
    let controller = NowPlayingController::new(device, Arc::new(LoggingNotifier))
        .with_notice(config.to_notice());

    apply_play_mode(&controller, args.shuffle, args.repeat).await;

    // Start the NOTIFY listener before subscribing so no event is missed
    let (tx, rx) = mpsc::channel(config.event_queue_capacity.max(1));
    let active_sid = Arc::new(RwLock::new(None));
    let state = ListenerState {
        active_sid: Arc::clone(&active_sid),
        events: tx,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.bind_port));
    let tcp = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind callback listener on {}", addr))?;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(tcp, create_router(state)).await {
            log::error!("Server error: {}", e);
        }
    });

    let callback_url = format!("http://{}:{}{}", advertise_ip, config.bind_port, NOTIFY_PATH);
    log::info!("Listening for events on {}", callback_url);

    let subscription = Arc::new(AvTransportSubscription::new(
        http,
        speaker_ip.to_string(),
        callback_url,
        active_sid,
    ));

    // Polling still works without events, just with less complete metadata
    let renewal_handle = {
        let subscription = Arc::clone(&subscription);
        tokio::spawn(async move { subscription.run().await })
    };

    let monitor = Monitor::new(controller, rx, config.poll_interval());
    let monitor_handle = tokio::spawn(monitor.run());

    shutdown_signal().await;

    log::info!("Shutdown signal received, cleaning up...");

    monitor_handle.abort();
    renewal_handle.abort();
    subscription.unsubscribe().await;
    server_handle.abort();

    log::info!("Shutdown complete");
    Ok(())
}

/// Applies `--shuffle`/`--repeat`, keeping the current value of a flag that
/// was not given. Failures are logged; monitoring continues regardless.
async fn apply_play_mode(
    controller: &NowPlayingController,
    shuffle: Option<bool>,
    repeat: Option<bool>,
) {
    let current = match controller.get_play_mode().await {
        Ok(flags) => flags,
        Err(e) => {
            log::warn!("Failed to read play mode: {}", e);
            return;
        }
    };
    log::info!("Play mode: shuffle={}, repeat={}", current.0, current.1);

    if shuffle.is_none() && repeat.is_none() {
        return;
    }

    let wanted = (shuffle.unwrap_or(current.0), repeat.unwrap_or(current.1));
    if wanted == current {
        return;
    }

    match controller.set_play_mode(wanted.0, wanted.1).await {
        Ok(()) => log::info!("Play mode set: shuffle={}, repeat={}", wanted.0, wanted.1),
        Err(e) => log::warn!("Failed to set play mode: {}", e),
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
