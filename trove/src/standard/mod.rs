//! Ready-made loot vocabulary built on the conversion and generation core.
//!
//! Each polymorphic family gets a [`ConversionManager`](crate::ConversionManager)
//! with its own discriminator field; [`trove`] assembles them, together with
//! the pool and table converters, into a single [`Trove`]. Composite converters
//! resolve the converters of their fields through the conversion context's
//! trove, so every nested value must be converted with a context built around
//! [`trove`].

mod condition;
mod entry;
mod item;
mod modifier;
mod number;
mod pool;

pub use condition::{AllOf, AnyOf, AtLeast, Inverted, RandomChance, conditions};
pub use entry::{
    AlternativesEntry, EmptyEntry, GroupEntry, ItemEntry, LootChoice, LootEntry, SequenceEntry,
    Weighting, entries,
};
pub use item::{ItemStack, item_stacks};
pub use modifier::{LimitCount, SetCount, modifiers};
pub use number::{Binomial, Constant, LootNumber, NumberRange, Uniform, numbers, ranges};
pub use pool::{LootPool, LootTable, pools, tables};

use tracing::warn;

use crate::{ConfigNode, ConversionContext, Key, Trove, TroveResult, node};

/// Discriminator field of serialized numbers.
pub const NUMBER_KEY_LOCATION: &str = "type";

/// Discriminator field of serialized conditions.
pub const CONDITION_KEY_LOCATION: &str = "condition";

/// Discriminator field of serialized modifiers.
pub const MODIFIER_KEY_LOCATION: &str = "function";

/// Discriminator field of serialized entries.
pub const ENTRY_KEY_LOCATION: &str = "type";

/// Luck of whoever the loot is generated for.
///
/// Raises the weight of entries with quality and adds bonus rolls to pools.
pub const LUCK: Key<f64> = Key::new("minecraft:luck");

/// Most pool rolls or binomial trials drawn by a single call.
///
/// Larger configured counts are clamped to this bound.
pub const MAX_REPETITIONS: i64 = 4096;

/// A trove holding every converter of the standard vocabulary.
///
/// # Errors
///
/// Fails only if the vocabulary itself registers conflicting converters.
pub fn trove() -> TroveResult<Trove> {
    let trove = Trove::builder()
        .add_manager(numbers()?)?
        .add_manager(conditions()?)?
        .add_manager(modifiers()?)?
        .add_manager(entries()?)?
        .add::<NumberRange, _>(ranges())?
        .add::<ItemStack, _>(item_stacks())?
        .add::<LootPool, _>(pools())?
        .add::<LootTable, _>(tables())?
        .build();
    Ok(trove)
}

fn repetitions(count: i64, what: &'static str) -> i64 {
    if count > MAX_REPETITIONS {
        warn!(count, limit = MAX_REPETITIONS, what, "clamping repetitions");
    }
    count.min(MAX_REPETITIONS)
}

fn read<V: 'static>(node: &ConfigNode, field: &str, context: &ConversionContext) -> TroveResult<V> {
    context
        .trove()
        .require::<V>()?
        .deserialize(node::require(node, field)?, context)
}

fn read_optional<V: 'static>(
    node: &ConfigNode,
    field: &str,
    context: &ConversionContext,
) -> TroveResult<Option<V>> {
    let value = node::child(node, field);
    if node::is_absent(value) {
        return Ok(None);
    }
    context
        .trove()
        .require::<V>()?
        .deserialize(value, context)
        .map(Some)
}

fn read_list<V: 'static>(
    node: &ConfigNode,
    field: &str,
    context: &ConversionContext,
) -> TroveResult<Vec<V>> {
    let converter = context.trove().require::<V>()?;
    node::deserialize_list(node, field, &*converter, context)
}

fn write<V: 'static>(
    value: &V,
    result: &mut ConfigNode,
    field: &str,
    context: &ConversionContext,
) -> TroveResult<()> {
    let written = context.trove().require::<V>()?.serialize(value, context)?;
    node::set(node::child_mut(result, field), written);
    Ok(())
}

fn write_list<V: 'static>(
    values: &[V],
    result: &mut ConfigNode,
    field: &str,
    context: &ConversionContext,
) -> TroveResult<()> {
    let converter = context.trove().require::<V>()?;
    let written = node::serialize_list(values, &*converter, context)?;
    node::set(node::child_mut(result, field), written);
    Ok(())
}

#[cfg(test)]
mod tests;
