//! # Balance
//!
//! Entry point for the cart-pole viewer. Parses the command line, installs
//! the log subscriber and hands over to [`balance::run`]. Pass `--headless`
//! to run a fixed number of ticks without opening a window.

use anyhow::Result;
use balance::Cli;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    tracing::info!("Starting {:?} view", cli.view);

    if let Err(e) = balance::run(&cli) {
        tracing::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
