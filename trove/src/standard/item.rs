//! The item type produced by the standard entries.

use serde::{Deserialize, Serialize};

use crate::{
    ConfigNode, ConversionContext, Converter, TroveError, TroveResultExt, deserializer, join,
    serializer,
};

/// A stack of identical items.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Namespaced item identifier, such as `minecraft:stick`.
    pub id: String,
    /// Number of items in the stack.
    #[serde(default = "ItemStack::single")]
    pub count: i64,
}

impl ItemStack {
    /// A stack of `count` items called `id`.
    #[must_use]
    pub fn new(id: impl Into<String>, count: i64) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }

    const fn single() -> i64 {
        1
    }
}

/// Converter for [`ItemStack`]s as `{"id": .., "count": ..}` maps.
#[must_use]
pub fn item_stacks() -> impl Converter<ItemStack> {
    join(
        serializer(|stack: &ItemStack, _: &ConversionContext| {
            serde_json::to_value(stack).into_trove()
        }),
        deserializer(|node: &ConfigNode, _: &ConversionContext| {
            ItemStack::deserialize(node)
                .map_err(|e| TroveError::deserialization("item", e.to_string()))
        }),
    )
}
