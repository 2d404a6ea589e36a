//! Tracing initialisation for the snapwatch binary.
//!
//! Logs go to stderr so the status table owns stdout. Safe to call more
//! than once; the global subscriber can only be installed once per process
//! and later calls are ignored.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// * `verbose`: lower the default level from INFO to DEBUG.
/// * `json`: emit newline-delimited JSON log lines.
///
/// `RUST_LOG` overrides the default level when set.
pub fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
