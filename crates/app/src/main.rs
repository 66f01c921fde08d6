//! QR Lab - QR code capacity and damage explorer

use clap::Parser;
use tracing::info;

use qrlab::cli::{self, Cli};
use qrlab::{QrLabConfig, logging};

fn main() -> anyhow::Result<()> {
    // Parse configuration from environment
    let config = QrLabConfig::default();
    logging::init_logging(&config);

    let cli = Cli::parse();
    info!("Starting QR Lab with {:?} log format", config.log_format);

    cli::run(cli, &config)
}
