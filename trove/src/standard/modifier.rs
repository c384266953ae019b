//! Serializable modifiers.

use super::{
    ItemStack, LootNumber, MODIFIER_KEY_LOCATION, NumberRange, read, read_list, read_optional,
    write, write_list,
};
use crate::{
    ConfigNode, ConversionContext, ConversionManager, GenerationContext, KeyedConverter,
    LootCondition, LootItem, LootModifier, TroveResult, TypedModifier, additive, deserializer,
    modifier, node,
};

/// Rebuild `stack` with `count` items, dropping it when none are left.
fn restack(stack: &ItemStack, count: i64) -> Option<LootItem> {
    (count > 0).then(|| LootItem::new(ItemStack::new(stack.id.clone(), count)))
}

/// Sets or adjusts the size of item stacks.
///
/// Items other than [`ItemStack`]s pass through untouched, as does everything
/// when a condition fails. A stack left with no items is dropped.
#[derive(Debug)]
pub struct SetCount {
    /// New count, or the amount to add.
    pub count: Box<dyn LootNumber>,
    /// Whether `count` is added to the current count.
    pub add: bool,
    /// Conditions that must all hold for the modifier to apply.
    pub conditions: Vec<Box<dyn LootCondition>>,
}

impl SetCount {
    /// Discriminator of serialized count modifiers.
    pub const KEY: &'static str = "minecraft:set_count";
}

impl TypedModifier for SetCount {
    type Input = ItemStack;

    fn modify_typed(&self, stack: &ItemStack, context: &GenerationContext) -> Option<LootItem> {
        let base = if self.add { stack.count } else { 0 };
        restack(stack, base.saturating_add(self.count.long(context)))
    }
}

impl LootModifier for SetCount {
    fn modify(&self, input: LootItem, context: &GenerationContext) -> Option<LootItem> {
        modifier::gate(&self.conditions, input, context, |item| {
            modifier::filter(self, item, context)
        })
    }
}

/// Clamps the size of item stacks into a range.
///
/// Like [`SetCount`], it only touches [`ItemStack`]s whose conditions hold,
/// and drops stacks clamped to no items.
#[derive(Debug)]
pub struct LimitCount {
    /// Bounds for the count.
    pub limit: NumberRange,
    /// Conditions that must all hold for the modifier to apply.
    pub conditions: Vec<Box<dyn LootCondition>>,
}

impl LimitCount {
    /// Discriminator of serialized count limits.
    pub const KEY: &'static str = "minecraft:limit_count";
}

impl TypedModifier for LimitCount {
    type Input = ItemStack;

    fn modify_typed(&self, stack: &ItemStack, context: &GenerationContext) -> Option<LootItem> {
        restack(stack, self.limit.limit(stack.count, context))
    }
}

impl LootModifier for LimitCount {
    fn modify(&self, input: LootItem, context: &GenerationContext) -> Option<LootItem> {
        modifier::gate(&self.conditions, input, context, |item| {
            modifier::filter(self, item, context)
        })
    }
}

/// Manager for `dyn LootModifier`, discriminated at
/// [`MODIFIER_KEY_LOCATION`].
///
/// # Errors
///
/// Fails only if the registrations conflict.
pub fn modifiers() -> TroveResult<ConversionManager<dyn LootModifier>> {
    ConversionManager::<dyn LootModifier>::builder()
        .key_location(MODIFIER_KEY_LOCATION)
        .add_converter(KeyedConverter::<SetCount>::join(
            SetCount::KEY,
            additive(write_set_count),
            deserializer(read_set_count),
        ))
        .add_converter(KeyedConverter::<LimitCount>::join(
            LimitCount::KEY,
            additive(write_limit_count),
            deserializer(read_limit_count),
        ))
        .build()
}

fn write_set_count(
    set_count: &SetCount,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    write(&set_count.count, result, "count", context)?;
    node::set(node::child_mut(result, "add"), set_count.add);
    write_list(&set_count.conditions, result, "conditions", context)
}

fn read_set_count(node: &ConfigNode, context: &ConversionContext) -> TroveResult<SetCount> {
    Ok(SetCount {
        count: read(node, "count", context)?,
        add: node::optional_bool(node, "add", false)?,
        conditions: read_list(node, "conditions", context)?,
    })
}

fn write_limit_count(
    limit_count: &LimitCount,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    write(&limit_count.limit, result, "limit", context)?;
    write_list(&limit_count.conditions, result, "conditions", context)
}

fn read_limit_count(node: &ConfigNode, context: &ConversionContext) -> TroveResult<LimitCount> {
    Ok(LimitCount {
        limit: read_optional(node, "limit", context)?.unwrap_or_default(),
        conditions: read_list(node, "conditions", context)?,
    })
}
