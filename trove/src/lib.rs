//! Typed conversion registry and loot generation engine.
//!
//! Values move between configuration trees ([`ConfigNode`]) and typed Rust
//! values through converters. A [`ConversionManager`] dispatches a polymorphic
//! family on a key stored inside each node, and a [`Trove`] indexes one
//! converter per type. The generation half ([`Batch`], [`LootGenerator`],
//! [`LootModifier`], [`LootCondition`], [`LootProcessor`]) rolls the loaded
//! definitions against a shared random source.
//!
//! The [`standard`] module wires these pieces into a ready vocabulary of
//! number providers, conditions, modifiers, entries, pools, and tables.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use trove::{ConversionContext, Deserializer, GenerationContext, LootGenerator};
//! use trove::standard::{self, LootTable};
//!
//! # fn main() -> trove::TroveResult<()> {
//! let trove = standard::trove()?;
//! let node = serde_json::json!({
//!     "pools": [{
//!         "rolls": 2,
//!         "entries": [{"type": "minecraft:item", "name": "minecraft:stick"}]
//!     }]
//! });
//! let context = ConversionContext::builder().trove(trove.clone()).build();
//! let table = trove.require::<LootTable>()?.deserialize(&node, &context)?;
//! let rolled = table.generate(
//!     &GenerationContext::builder()
//!         .random(StdRng::seed_from_u64(3))
//!         .build()?,
//! );
//! assert_eq!(rolled.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

mod context;
mod converter;
mod error;
mod generation;
mod manager;
pub mod node;
mod registry;
mod result_ext;
pub mod standard;
mod types;

pub use context::{
    ConversionContext, ConversionContextBuilder, GenerationContext, GenerationContextBuilder,
    Information, Key, KeyedContext, RandomSource,
};
pub use converter::{
    AdditiveConverter, AdditiveSerializer, Conditional, ConditionalConverter, Converter,
    Deserializer, FnAdditive, FnDeserializer, FnSerializer, Joined, KeyedConverter, Serializer,
    additive, conditional, deserializer, join, serializer,
};
pub use error::{AggregatedErrors, ErrorKind, TroveError};
pub use generation::{
    Batch, Filtered, Gated, LootCondition, LootGenerator, LootItem, LootModifier, LootProcessor,
    LootProcessorBuilder, TypedModifier, condition, modifier,
};
pub use manager::{ConversionManager, ConversionManagerBuilder, InitialConverter};
pub use node::ConfigNode;
pub use registry::{Trove, TroveBuilder};
pub use result_ext::TroveResultExt;
pub use types::{AsAny, Subtype, TypeTag};

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so aggregated failures can hold and
/// clone them cheaply.
pub type TroveResult<T> = Result<T, Arc<TroveError>>;
