use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use csv2glozz::cli::Cli;

mod commands;

/// Log to stderr; RUST_LOG wins over the verbosity flags.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    commands::convert::handle(&cli)
}
