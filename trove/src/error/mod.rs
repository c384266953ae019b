//! Error types produced while building registries, converting nodes, and
//! generating loot.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{ErrorKind, TroveError};
