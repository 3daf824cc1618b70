//! Receipt validation service.
//!
//! Exposes `POST /receipt/validate`, which classifies a receipt by the
//! parity of its last digit and, for valid receipts, returns an expiry
//! 24 hours out in America/Chicago time.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ net::listener ─▶ http::server ─▶ request id
//!                                                          │
//!                                                          ▼
//!                                            observability::capture
//!                                            (entry log, body capture)
//!                                                          │
//!                                                          ▼
//!                                             http::handler ─▶ receipt
//!                                                          │
//!     Client Response                                      ▼
//!     ◀─────────────── frames forwarded as produced ◀── CaptureBody
//!                                                   (completion log)
//! ```

use std::path::PathBuf;

use clap::Parser;

use receipt_validator::config::{load_config, ServiceConfig};
use receipt_validator::lifecycle::{self, Shutdown};
use receipt_validator::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "receipt-validator")]
#[command(about = "Receipt validation HTTP service", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);
    tracing::info!("receipt-validator v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    if let Err(error) = lifecycle::start(config, &shutdown).await {
        tracing::error!(error = %error, "Fatal error");
        return Err(error.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
