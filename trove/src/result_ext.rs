//! Extensions for mapping errors to `TroveResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(TroveError::from(e)))`
//! patterns when converting external error types into the crate's
//! `TroveResult<T>` alias (`Result<T, Arc<TroveError>>`).
//!
//! # Examples
//!
//! ```
//! use trove::{TroveResult, TroveResultExt};
//!
//! fn encode() -> TroveResult<serde_json::Value> {
//!     // serde_json::Error implements Into<TroveError>
//!     serde_json::to_value(&42).into_trove()
//! }
//! ```

use crate::{TroveError, TroveResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with `E: Into<TroveError>`
/// into a `TroveResult<T>`.
pub trait TroveResultExt<T, E> {
    /// Convert `Result<T, E>` into `TroveResult<T>` using `Into<TroveError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<TroveError>`.
    fn into_trove(self) -> TroveResult<T>;
}

impl<T, E> TroveResultExt<T, E> for Result<T, E>
where
    E: Into<TroveError>,
{
    fn into_trove(self) -> TroveResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
