//! Shared logging initialization for config-client processes.
//!
//! The library itself only emits `tracing` events. Binaries call [`init`] once
//! at startup, before resolving settings (see the crate-level example).

use std::sync::OnceLock;

/// Environment variable selecting the log level.
pub const LOG_ENV_VAR: &str = "CONFIG_CLIENT_LOG";

static INIT: OnceLock<()> = OnceLock::new();

fn parse_level(raw: Option<&str>) -> tracing::Level {
    match raw.unwrap_or("info").trim().to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Initialize process-level tracing output from `CONFIG_CLIENT_LOG`.
///
/// Only the first call installs a subscriber; later calls are no-ops. Never
/// fails, even when another subscriber is already installed.
pub fn init() {
    if INIT.get().is_some() {
        return;
    }
    let level = parse_level(std::env::var(LOG_ENV_VAR).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
    let _ = INIT.set(());
}
