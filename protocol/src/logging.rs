//! # Structured Logging
//!
//! The library only emits `tracing` events. Embedding nodes call
//! [`init_logging`] once at startup; test harnesses call
//! [`init_test_logging`] so events land in the captured test output.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by [`init_test_logging`] when `RUST_LOG` is unset.
const TEST_LOG_LEVEL: &str = "keel_protocol=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for local development.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

impl LogFormat {
    /// Accepts "json" or "pretty" (case-insensitive). Anything else is
    /// `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `default_level`, e.g.
/// `RUST_LOG=keel_protocol::transaction=trace`. Fails if a global subscriber
/// is already set.
pub fn init_logging(default_level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(default_level));
    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_thread_ids(true))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }
    tracing::debug!(?format, "logging initialized");
    Ok(())
}

/// Route events to the test harness's captured output.
///
/// Safe to call from every test: only the first call installs anything.
pub fn init_test_logging() {
    let _ = tracing_subscriber::registry()
        .with(env_filter(TEST_LOG_LEVEL))
        .with(fmt::layer().with_test_writer())
        .try_init();
}
