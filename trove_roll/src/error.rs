//! Error types for `trove-roll`.

use std::sync::Arc;

use thiserror::Error;
use trove::TroveError;

/// Errors surfaced while rolling a table.
#[derive(Debug, Error)]
pub enum RollError {
    /// Loading or rolling the table failed.
    #[error(transparent)]
    Trove(#[from] Arc<TroveError>),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// An item node could not be encoded as JSON.
    #[error("failed to encode item: {0}")]
    Json(#[from] serde_json::Error),
}
