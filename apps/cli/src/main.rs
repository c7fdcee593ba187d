//! # Inventario CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Parse the command line
//! 2. Initialize tracing (stderr)
//! 3. Load configuration, restore the persisted session
//! 4. Run the command

use std::process::ExitCode;

use clap::Parser;

use inventario_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    inventario_cli::init_tracing(cli.verbose);
    inventario_cli::run(cli).await
}
