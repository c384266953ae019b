//! CLI entrypoint for `trove-roll`.

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trove_roll::{cli::Args, error::RollError, roll};

fn main() -> Result<(), RollError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    roll::run(&args, &mut out)?;
    Ok(())
}
