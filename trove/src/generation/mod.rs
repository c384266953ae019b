//! Generation primitives.
//!
//! Generators turn a [`GenerationContext`](crate::GenerationContext) into a
//! [`Batch`] of type-erased [`LootItem`]s. Modifiers transform items of
//! particular types, conditions gate work on the context, and a
//! [`LootProcessor`] hands each finished item to the first handler that
//! accepts it.

mod batch;
pub mod condition;
mod item;
pub mod modifier;
mod processor;

pub use batch::Batch;
pub use condition::LootCondition;
pub use item::LootItem;
pub use modifier::{Filtered, Gated, LootModifier, TypedModifier};
pub use processor::{LootProcessor, LootProcessorBuilder};

use crate::GenerationContext;

/// Produces loot from a context.
pub trait LootGenerator: Send + Sync {
    /// Generate a batch of items.
    fn generate(&self, context: &GenerationContext) -> Batch;
}
