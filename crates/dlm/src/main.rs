//! dlm - Entry Point
//!
//! Binary entry point for the lock manager command line.

// Force-link dlm-providers to ensure linkme registrations are included
extern crate dlm_providers;

use clap::Parser;
use dlm::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
