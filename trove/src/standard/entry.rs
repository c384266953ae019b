//! Pool entries.

use std::fmt;

use super::{ENTRY_KEY_LOCATION, ItemStack, LUCK, read_list, write_list};
use crate::{
    AsAny, Batch, ConfigNode, ConversionContext, ConversionManager, GenerationContext,
    KeyedContext, KeyedConverter, LootCondition, LootGenerator, LootItem, LootModifier, Subtype,
    TroveResult, additive, condition, deserializer, modifier, node,
};

/// One weighted outcome offered to a pool roll.
pub trait LootChoice: LootGenerator {
    /// Relative chance of being picked; pools treat anything below 1 as 1.
    fn weight(&self, context: &GenerationContext) -> i64;
}

/// A node of a pool's entry tree.
///
/// Single-choice entries offer themselves while their conditions hold.
/// Composite entries offer the choices of their children, so a pool draws
/// over the expanded leaves rather than over its direct entries.
pub trait LootEntry: AsAny + fmt::Debug {
    /// The choices this entry offers for the current roll, possibly none.
    fn choices<'a>(&'a self, context: &GenerationContext) -> Vec<&'a dyn LootChoice>;
}

impl<E: LootEntry> Subtype<dyn LootEntry> for E {
    fn upcast(self) -> Box<dyn LootEntry> {
        Box::new(self)
    }
}

/// `choice` alone when every condition holds, otherwise nothing.
fn offer<'a>(
    choice: &'a dyn LootChoice,
    conditions: &[Box<dyn LootCondition>],
    context: &GenerationContext,
) -> Vec<&'a dyn LootChoice> {
    if condition::all(conditions, context) {
        vec![choice]
    } else {
        Vec::new()
    }
}

/// Base weight plus a luck-scaled quality bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weighting {
    /// Weight before luck is applied.
    pub weight: i64,
    /// Weight gained per point of luck; may be negative.
    pub quality: i64,
}

impl Default for Weighting {
    fn default() -> Self {
        Self {
            weight: 1,
            quality: 0,
        }
    }
}

impl Weighting {
    /// `max(1, floor(weight + quality * luck))`, with luck read from
    /// [`LUCK`] and defaulting to zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "luck is fractional; weights are small and the floor saturates"
    )]
    pub fn effective(&self, context: &GenerationContext) -> i64 {
        let luck = context.get_or(&LUCK, 0.0);
        let weight = (self.weight as f64 + self.quality as f64 * luck).floor() as i64;
        weight.max(1)
    }

    fn read(node: &ConfigNode) -> TroveResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            weight: node::optional_i64(node, "weight", defaults.weight)?,
            quality: node::optional_i64(node, "quality", defaults.quality)?,
        })
    }

    fn write(self, result: &mut ConfigNode) {
        node::set(node::child_mut(result, "weight"), self.weight);
        node::set(node::child_mut(result, "quality"), self.quality);
    }
}

/// Yields a single item stack.
#[derive(Debug)]
pub struct ItemEntry {
    /// Identifier of the generated item.
    pub name: String,
    /// Pick weight.
    pub weighting: Weighting,
    /// Modifiers applied to the generated stack.
    pub functions: Vec<Box<dyn LootModifier>>,
    /// Conditions for taking part in a roll.
    pub conditions: Vec<Box<dyn LootCondition>>,
}

impl ItemEntry {
    /// Discriminator of serialized item entries.
    pub const KEY: &'static str = "minecraft:item";

    /// An entry for `name` with default weighting and no modifiers or
    /// conditions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weighting: Weighting::default(),
            functions: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

impl LootGenerator for ItemEntry {
    fn generate(&self, context: &GenerationContext) -> Batch {
        let stack = Batch::of(LootItem::new(ItemStack::new(self.name.clone(), 1)));
        modifier::apply_batch(&self.functions, &stack, context)
    }
}

impl LootChoice for ItemEntry {
    fn weight(&self, context: &GenerationContext) -> i64 {
        self.weighting.effective(context)
    }
}

impl LootEntry for ItemEntry {
    fn choices<'a>(&'a self, context: &GenerationContext) -> Vec<&'a dyn LootChoice> {
        offer(self, &self.conditions, context)
    }
}

/// Yields nothing; its weight makes every roll possibly come up empty.
#[derive(Debug, Default)]
pub struct EmptyEntry {
    /// Pick weight.
    pub weighting: Weighting,
    /// Carried for round trips; there is nothing to modify.
    pub functions: Vec<Box<dyn LootModifier>>,
    /// Conditions for taking part in a roll.
    pub conditions: Vec<Box<dyn LootCondition>>,
}

impl EmptyEntry {
    /// Discriminator of serialized empty entries.
    pub const KEY: &'static str = "minecraft:empty";
}

impl LootGenerator for EmptyEntry {
    fn generate(&self, _context: &GenerationContext) -> Batch {
        Batch::empty()
    }
}

impl LootChoice for EmptyEntry {
    fn weight(&self, context: &GenerationContext) -> i64 {
        self.weighting.effective(context)
    }
}

impl LootEntry for EmptyEntry {
    fn choices<'a>(&'a self, context: &GenerationContext) -> Vec<&'a dyn LootChoice> {
        offer(self, &self.conditions, context)
    }
}

/// Entries holding child entries behind shared conditions.
trait Composite: Sized {
    const KEY: &'static str;

    fn from_parts(
        children: Vec<Box<dyn LootEntry>>,
        conditions: Vec<Box<dyn LootCondition>>,
    ) -> Self;

    fn children(&self) -> &[Box<dyn LootEntry>];

    fn conditions(&self) -> &[Box<dyn LootCondition>];
}

macro_rules! composite_entry {
    ($(#[$doc:meta])* $name:ident, $key:literal) => {
        $(#[$doc])*
        #[derive(Debug, Default)]
        pub struct $name {
            /// Child entries, in order.
            pub children: Vec<Box<dyn LootEntry>>,
            /// Conditions for offering any choice at all.
            pub conditions: Vec<Box<dyn LootCondition>>,
        }

        impl $name {
            /// Discriminator of serialized entries of this kind.
            pub const KEY: &'static str = $key;
        }

        impl Composite for $name {
            const KEY: &'static str = $key;

            fn from_parts(
                children: Vec<Box<dyn LootEntry>>,
                conditions: Vec<Box<dyn LootCondition>>,
            ) -> Self {
                Self {
                    children,
                    conditions,
                }
            }

            fn children(&self) -> &[Box<dyn LootEntry>] {
                &self.children
            }

            fn conditions(&self) -> &[Box<dyn LootCondition>] {
                &self.conditions
            }
        }
    };
}

composite_entry!(
    /// Offers the choices of the first child that offers any.
    AlternativesEntry,
    "minecraft:alternatives"
);

composite_entry!(
    /// Offers the choices of every child.
    GroupEntry,
    "minecraft:group"
);

composite_entry!(
    /// Offers the choices of its children in order, up to the first child
    /// that offers none.
    SequenceEntry,
    "minecraft:sequence"
);

impl LootEntry for AlternativesEntry {
    fn choices<'a>(&'a self, context: &GenerationContext) -> Vec<&'a dyn LootChoice> {
        if !condition::all(&self.conditions, context) {
            return Vec::new();
        }
        self.children
            .iter()
            .map(|child| child.choices(context))
            .find(|choices| !choices.is_empty())
            .unwrap_or_default()
    }
}

impl LootEntry for GroupEntry {
    fn choices<'a>(&'a self, context: &GenerationContext) -> Vec<&'a dyn LootChoice> {
        if !condition::all(&self.conditions, context) {
            return Vec::new();
        }
        self.children
            .iter()
            .flat_map(|child| child.choices(context))
            .collect()
    }
}

impl LootEntry for SequenceEntry {
    fn choices<'a>(&'a self, context: &GenerationContext) -> Vec<&'a dyn LootChoice> {
        if !condition::all(&self.conditions, context) {
            return Vec::new();
        }
        self.children
            .iter()
            .map(|child| child.choices(context))
            .take_while(|choices| !choices.is_empty())
            .flatten()
            .collect()
    }
}

/// Manager for `dyn LootEntry`, discriminated at [`ENTRY_KEY_LOCATION`].
///
/// # Errors
///
/// Fails only if the registrations conflict.
pub fn entries() -> TroveResult<ConversionManager<dyn LootEntry>> {
    ConversionManager::<dyn LootEntry>::builder()
        .key_location(ENTRY_KEY_LOCATION)
        .add_converter(KeyedConverter::<EmptyEntry>::join(
            EmptyEntry::KEY,
            additive(write_empty),
            deserializer(read_empty),
        ))
        .add_converter(KeyedConverter::<ItemEntry>::join(
            ItemEntry::KEY,
            additive(write_item),
            deserializer(read_item),
        ))
        .add_converter(composite::<AlternativesEntry>())
        .add_converter(composite::<GroupEntry>())
        .add_converter(composite::<SequenceEntry>())
        .build()
}

fn composite<E>() -> KeyedConverter<E>
where
    E: Composite + LootEntry,
{
    KeyedConverter::join(
        <E as Composite>::KEY,
        additive(|entry: &E, result: &mut ConfigNode, context: &ConversionContext| {
            write_list(entry.children(), result, "children", context)?;
            write_list(entry.conditions(), result, "conditions", context)
        }),
        deserializer(|node: &ConfigNode, context: &ConversionContext| {
            Ok(E::from_parts(
                read_list(node, "children", context)?,
                read_list(node, "conditions", context)?,
            ))
        }),
    )
}

fn write_empty(
    entry: &EmptyEntry,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    entry.weighting.write(result);
    write_list(&entry.functions, result, "functions", context)?;
    write_list(&entry.conditions, result, "conditions", context)
}

fn read_empty(node: &ConfigNode, context: &ConversionContext) -> TroveResult<EmptyEntry> {
    Ok(EmptyEntry {
        weighting: Weighting::read(node)?,
        functions: read_list(node, "functions", context)?,
        conditions: read_list(node, "conditions", context)?,
    })
}

fn write_item(
    entry: &ItemEntry,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    node::set(node::child_mut(result, "name"), entry.name.as_str());
    entry.weighting.write(result);
    write_list(&entry.functions, result, "functions", context)?;
    write_list(&entry.conditions, result, "conditions", context)
}

fn read_item(node: &ConfigNode, context: &ConversionContext) -> TroveResult<ItemEntry> {
    Ok(ItemEntry {
        name: node::require_str(node, "name")?.to_owned(),
        weighting: Weighting::read(node)?,
        functions: read_list(node, "functions", context)?,
        conditions: read_list(node, "conditions", context)?,
    })
}
