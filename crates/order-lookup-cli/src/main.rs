//! # Order Lookup
//!
//! Reads order identifiers and shows what the order API returns for each.
//!
//! ```bash
//! order-lookup b563feb7b2b84b6test            # one-shot
//! order-lookup --json a b c                    # sequential, JSON lines
//! RUST_LOG=debug order-lookup                  # interactive, one id per line
//! ```
//!
//! In interactive mode each line starts its own lookup without waiting for
//! the previous one; only the most recent line's result is shown.

use clap::Parser;
use order_lookup::tracing::setup_tracing;
use order_lookup::{HttpTransport, OrderLookupWidget};
use order_lookup_cli::{run, Cli, OutputFormat, TerminalSurface};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let cli = Cli::parse();
    let config = cli.config().map_err(|e| e.to_string())?;
    let transport = HttpTransport::new(&config).map_err(|e| e.to_string())?;
    let format = if cli.json {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Text
    };
    let surface = TerminalSurface::new(std::io::stdout(), format);
    let widget = Arc::new(OrderLookupWidget::new(config, transport, surface));
    info!(
        endpoint = %widget.config().endpoint(),
        timeout = ?widget.config().timeout(),
        "Starting order lookup"
    );

    let outcomes = run(widget, &cli.ids, tokio::io::stdin()).await;

    info!(lookups = outcomes.len(), "Done");
    Ok(())
}
