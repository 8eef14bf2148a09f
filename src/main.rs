//! rulegen
//!
//! Generates request-validation classes from schema-builder migrations.
//!
//! This is the binary entry point: it sets up logging and hands the parsed
//! command line to `rulegen_cli`.

use clap::Parser;
use rulegen_cli::Cli;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v / -q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    rulegen_cli::run(cli)
}
