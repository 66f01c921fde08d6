//! Logging initialization

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::{LogFormat, QrLabConfig};

/// Install the global tracing subscriber
///
/// The filter comes from `QRLAB_LOG`, then `RUST_LOG`, then the configured
/// default. Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(config: &QrLabConfig) {
    let env_filter = EnvFilter::try_from_env("QRLAB_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            subscriber.with(json_layer).init();
        }
        LogFormat::Compact => {
            let console_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .compact();
            subscriber.with(console_layer).init();
        }
    }
}
