//! Command-line interface definitions for `trove-roll`.

use camino::Utf8PathBuf;
use clap::Parser;

/// Parsed CLI arguments for `trove-roll`.
#[derive(Debug, Clone, Parser)]
#[command(name = "trove-roll")]
#[command(about = "Roll a loot table and print the generated items as JSON lines")]
#[command(version)]
pub struct Args {
    /// Loot table file (`.json` or `.toml`).
    #[arg(value_name = "path")]
    pub table: Utf8PathBuf,
    /// Seed for the random source; drawn from entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of times to roll the table.
    #[arg(long, default_value_t = 1)]
    pub times: u32,
    /// Luck of the roller, feeding weight quality and bonus rolls.
    #[arg(long, allow_negative_numbers = true)]
    pub luck: Option<f64>,
}
