//! Tracing initialisation for PhenoAge binaries.
//!
//! Call [`init_tracing`] once at startup to install the global subscriber
//! with an `EnvFilter` and, optionally, JSON-formatted output. Repeat calls
//! are ignored, so tests may call it freely.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence for filtering; `level` is the fallback when
/// it is unset. With `json` the output is newline-delimited JSON, suitable
/// for piping into log tooling alongside the CLI's own JSON output on
/// stdout (logs go to stderr either way).
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .ok();
    }
}
