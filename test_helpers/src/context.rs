//! Context factories for tests.
//!
//! Generation contexts are seeded so rolls are reproducible between runs.
//!
//! # Examples
//!
//! ```
//! use rand::RngCore;
//! use trove_test_helpers::context;
//!
//! let first = context::seeded(3).expect("seeded context");
//! let second = context::seeded(3).expect("seeded context");
//! assert_eq!(first.random().next_u64(), second.random().next_u64());
//! ```

use anyhow::{Context, Result};
use rand::{SeedableRng, rngs::StdRng};
use trove::{ConversionContext, GenerationContext, standard};

/// A generation context drawing from a `StdRng` seeded with `seed`.
///
/// # Errors
///
/// Returns an error if the context cannot be built.
pub fn seeded(seed: u64) -> Result<GenerationContext> {
    GenerationContext::builder()
        .random(StdRng::seed_from_u64(seed))
        .build()
        .context("build seeded generation context")
}

/// A seeded generation context that also carries [`standard::LUCK`].
///
/// # Errors
///
/// Returns an error if the context cannot be built.
pub fn lucky(seed: u64, luck: f64) -> Result<GenerationContext> {
    GenerationContext::builder()
        .random(StdRng::seed_from_u64(seed))
        .with(&standard::LUCK, luck)
        .build()
        .context("build lucky generation context")
}

/// A conversion context around the standard trove.
///
/// # Errors
///
/// Returns an error if the standard trove fails to assemble.
pub fn standard() -> Result<ConversionContext> {
    let trove = standard::trove().context("assemble standard trove")?;
    Ok(ConversionContext::builder().trove(trove).build())
}
