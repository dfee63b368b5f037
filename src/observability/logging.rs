//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Select pretty or JSON output from settings
//!
//! # Design Decisions
//! - `EnvFilter` from RUST_LOG wins over the configured level
//! - Logs go to stderr so rendered artifacts can be piped from stdout

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::{LogFormat, LoggingSettings};

/// Build the filter for `settings`, preferring RUST_LOG when set.
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("proxy_render={}", settings.level).into())
}

/// Install the global tracing subscriber.
pub fn init(settings: &LoggingSettings) {
    let registry = tracing_subscriber::registry().with(env_filter(settings));

    match settings.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
