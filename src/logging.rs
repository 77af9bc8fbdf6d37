//! Logging initialisation.
//!
//! Crate code logs through `tracing`. On Android no tracing subscriber is
//! installed; `tracing`'s `log` feature forwards events to the `log` facade,
//! which `android_logger` routes to logcat. Elsewhere a `tracing_subscriber`
//! fmt layer writes to stderr.

use log::LevelFilter;

use crate::config::LogConfig;

/// Parse a configured level, defaulting to `Info` on unknown input.
pub fn level_filter(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Install the platform logger. Safe to call more than once.
#[cfg(target_os = "android")]
pub fn init(config: &LogConfig) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level_filter(&config.level))
            .with_tag(config.tag.as_str()),
    );
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_os = "android"))]
pub fn init(config: &LogConfig) {
    init_host(&config.level);
}

/// Install a stderr `tracing` subscriber filtered to this crate.
///
/// `RUST_LOG` takes precedence over `level`. A subscriber that is already
/// installed is left in place.
pub fn init_host(level: &str) {
    let level = level_filter(level);
    let filter = format!("llama_android_bridge={level}").to_lowercase();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(true)
        .try_init();
}
