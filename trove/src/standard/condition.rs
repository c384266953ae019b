//! Serializable conditions.

use rand::{Rng, distributions::Standard};

use super::{CONDITION_KEY_LOCATION, read, read_list, write, write_list};
use crate::{
    ConfigNode, ConversionContext, ConversionManager, GenerationContext, KeyedConverter,
    LootCondition, TroveResult, additive, condition, deserializer, node,
};

/// Negates its term.
#[derive(Debug)]
pub struct Inverted {
    /// The negated condition.
    pub term: Box<dyn LootCondition>,
}

impl Inverted {
    /// Discriminator of serialized inversions.
    pub const KEY: &'static str = "minecraft:inverted";
}

impl LootCondition for Inverted {
    fn verify(&self, context: &GenerationContext) -> bool {
        !self.term.verify(context)
    }
}

/// Holds when every term holds.
#[derive(Debug)]
pub struct AllOf {
    /// Terms, verified in order until one fails.
    pub terms: Vec<Box<dyn LootCondition>>,
}

impl AllOf {
    /// Discriminator of serialized conjunctions.
    pub const KEY: &'static str = "minecraft:all_of";
}

impl LootCondition for AllOf {
    fn verify(&self, context: &GenerationContext) -> bool {
        condition::all(&self.terms, context)
    }
}

/// Holds when any term holds.
#[derive(Debug)]
pub struct AnyOf {
    /// Terms, verified in order until one passes.
    pub terms: Vec<Box<dyn LootCondition>>,
}

impl AnyOf {
    /// Discriminator of serialized disjunctions.
    pub const KEY: &'static str = "minecraft:any_of";
}

impl LootCondition for AnyOf {
    fn verify(&self, context: &GenerationContext) -> bool {
        condition::or(&self.terms, context)
    }
}

/// Holds when at least `required` terms hold.
#[derive(Debug)]
pub struct AtLeast {
    /// Candidate terms.
    pub terms: Vec<Box<dyn LootCondition>>,
    /// Threshold; zero or less always holds.
    pub required: i64,
}

impl AtLeast {
    /// Discriminator of serialized thresholds.
    pub const KEY: &'static str = "trove:at_least";
}

impl LootCondition for AtLeast {
    fn verify(&self, context: &GenerationContext) -> bool {
        condition::some(&self.terms, self.required, context)
    }
}

/// Holds with a fixed probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomChance {
    /// Probability of holding, from 0 to 1.
    pub chance: f64,
}

impl RandomChance {
    /// Discriminator of serialized random chances.
    pub const KEY: &'static str = "minecraft:random_chance";
}

impl LootCondition for RandomChance {
    fn verify(&self, context: &GenerationContext) -> bool {
        let roll: f64 = context.random().sample(Standard);
        roll < self.chance
    }
}

/// Manager for `dyn LootCondition`, discriminated at
/// [`CONDITION_KEY_LOCATION`].
///
/// # Errors
///
/// Fails only if the registrations conflict.
pub fn conditions() -> TroveResult<ConversionManager<dyn LootCondition>> {
    ConversionManager::<dyn LootCondition>::builder()
        .key_location(CONDITION_KEY_LOCATION)
        .add_converter(KeyedConverter::<Inverted>::join(
            Inverted::KEY,
            additive(
                |inverted: &Inverted, result: &mut ConfigNode, context: &ConversionContext| {
                    write(&inverted.term, result, "term", context)
                },
            ),
            deserializer(|node: &ConfigNode, context: &ConversionContext| {
                Ok(Inverted {
                    term: read(node, "term", context)?,
                })
            }),
        ))
        .add_converter(KeyedConverter::<AllOf>::join(
            AllOf::KEY,
            additive(
                |all: &AllOf, result: &mut ConfigNode, context: &ConversionContext| {
                    write_list(&all.terms, result, "terms", context)
                },
            ),
            deserializer(|node: &ConfigNode, context: &ConversionContext| {
                Ok(AllOf {
                    terms: read_list(node, "terms", context)?,
                })
            }),
        ))
        .add_converter(KeyedConverter::<AnyOf>::join(
            AnyOf::KEY,
            additive(
                |any: &AnyOf, result: &mut ConfigNode, context: &ConversionContext| {
                    write_list(&any.terms, result, "terms", context)
                },
            ),
            deserializer(|node: &ConfigNode, context: &ConversionContext| {
                Ok(AnyOf {
                    terms: read_list(node, "terms", context)?,
                })
            }),
        ))
        .add_converter(KeyedConverter::<AtLeast>::join(
            AtLeast::KEY,
            additive(write_at_least),
            deserializer(read_at_least),
        ))
        .add_converter(KeyedConverter::<RandomChance>::join(
            RandomChance::KEY,
            additive(
                |random: &RandomChance, result: &mut ConfigNode, _: &ConversionContext| {
                    node::set(node::child_mut(result, "chance"), random.chance);
                    Ok(())
                },
            ),
            deserializer(|node: &ConfigNode, _: &ConversionContext| {
                Ok(RandomChance {
                    chance: node::require_f64(node, "chance")?,
                })
            }),
        ))
        .build()
}

fn write_at_least(
    at_least: &AtLeast,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    write_list(&at_least.terms, result, "terms", context)?;
    node::set(node::child_mut(result, "required"), at_least.required);
    Ok(())
}

fn read_at_least(node: &ConfigNode, context: &ConversionContext) -> TroveResult<AtLeast> {
    Ok(AtLeast {
        terms: read_list(node, "terms", context)?,
        required: node::require_i64(node, "required")?,
    })
}
