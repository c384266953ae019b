//! Library interface for the `trove-roll` command.
//!
//! The binary is a thin wrapper: [`cli::Args`] describes the command line and
//! [`roll::run`] loads a loot table, rolls it, and writes one JSON line per
//! generated item.

pub mod cli;
pub mod error;
pub mod roll;
