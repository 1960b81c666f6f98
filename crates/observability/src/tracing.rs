//! Tracing/logging initialization.
//!
//! `RUST_LOG` always wins over the default level passed in by the caller.

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable single-line output.
    Compact,
}

/// Initialize tracing with JSON output at `info`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with("info", LogFormat::Json);
}

/// Initialize tracing with an explicit default filter and format.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_with(default_filter: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
