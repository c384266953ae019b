//! Pools and tables.

use rand::Rng;

use super::{
    Constant, LUCK, LootChoice, LootEntry, LootNumber, read, read_list, read_optional,
    repetitions, write, write_list,
};
use crate::{
    Batch, ConfigNode, ConversionContext, Converter, GenerationContext, KeyedContext,
    LootCondition, LootGenerator, LootModifier, TroveResult, additive, condition, deserializer,
    join, modifier, node,
};

/// Rolls weighted entries a number of times.
#[derive(Debug)]
pub struct LootPool {
    /// Number of rolls.
    pub rolls: Box<dyn LootNumber>,
    /// Extra rolls per point of luck.
    pub bonus_rolls: Box<dyn LootNumber>,
    /// Candidates for each roll.
    pub entries: Vec<Box<dyn LootEntry>>,
    /// Conditions for the pool to generate anything.
    pub conditions: Vec<Box<dyn LootCondition>>,
    /// Modifiers applied to everything the pool generates.
    pub functions: Vec<Box<dyn LootModifier>>,
}

impl LootPool {
    /// A pool rolling `rolls` times over `entries`, with no bonus rolls,
    /// conditions, or modifiers.
    #[must_use]
    pub fn new(rolls: Box<dyn LootNumber>, entries: Vec<Box<dyn LootEntry>>) -> Self {
        Self {
            rolls,
            bonus_rolls: Box::new(Constant::new(0.0)),
            entries,
            conditions: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "bonus rolls scale with fractional luck and are floored"
    )]
    fn roll_count(&self, context: &GenerationContext) -> i64 {
        let base = self.rolls.long(context);
        let rolls = context.get(&LUCK).map_or(base, |&luck| {
            let bonus = (luck * self.bonus_rolls.double(context)).floor() as i64;
            base.saturating_add(bonus)
        });
        repetitions(rolls, "pool rolls")
    }

    /// Expands every entry into its choices and picks one by weight, or
    /// `None` when nothing is offered.
    fn pick(&self, context: &GenerationContext) -> Option<&dyn LootChoice> {
        let choices: Vec<&dyn LootChoice> = self
            .entries
            .iter()
            .flat_map(|entry| entry.choices(context))
            .collect();
        let &last = choices.last()?;
        let mut total: i64 = 0;
        let mut milestones = Vec::with_capacity(choices.len());
        for choice in &choices {
            total = total.saturating_add(choice.weight(context).max(1));
            milestones.push(total);
        }
        let draw = context.random().gen_range(0..total);
        let picked = milestones
            .iter()
            .zip(&choices)
            .find(|&(&milestone, _)| draw < milestone)
            .map_or(last, |(_, &choice)| choice);
        Some(picked)
    }
}

impl LootGenerator for LootPool {
    fn generate(&self, context: &GenerationContext) -> Batch {
        if !condition::all(&self.conditions, context) {
            return Batch::empty();
        }
        let mut items = Vec::new();
        for _ in 0..self.roll_count(context) {
            if let Some(choice) = self.pick(context) {
                items.extend(choice.generate(context));
            }
        }
        let rolled: Batch = items.into_iter().collect();
        modifier::apply_batch(&self.functions, &rolled, context)
    }
}

/// A set of pools generated together.
#[derive(Debug, Default)]
pub struct LootTable {
    /// Pools, generated in order.
    pub pools: Vec<LootPool>,
    /// Modifiers applied to everything the table generates.
    pub functions: Vec<Box<dyn LootModifier>>,
}

impl LootGenerator for LootTable {
    fn generate(&self, context: &GenerationContext) -> Batch {
        let pooled: Batch = self
            .pools
            .iter()
            .flat_map(|pool| pool.generate(context))
            .collect();
        modifier::apply_batch(&self.functions, &pooled, context)
    }
}

/// Converter for [`LootPool`]s.
///
/// `entries` and `rolls` are required; `bonus_rolls` defaults to zero.
#[must_use]
pub fn pools() -> impl Converter<LootPool> {
    join(additive(write_pool), deserializer(read_pool))
}

/// Converter for [`LootTable`]s. Both fields default to empty lists.
#[must_use]
pub fn tables() -> impl Converter<LootTable> {
    join(additive(write_table), deserializer(read_table))
}

fn write_pool(
    pool: &LootPool,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    write(&pool.rolls, result, "rolls", context)?;
    write(&pool.bonus_rolls, result, "bonus_rolls", context)?;
    write_list(&pool.entries, result, "entries", context)?;
    write_list(&pool.conditions, result, "conditions", context)?;
    write_list(&pool.functions, result, "functions", context)
}

fn read_pool(node: &ConfigNode, context: &ConversionContext) -> TroveResult<LootPool> {
    node::require(node, "entries")?;
    Ok(LootPool {
        rolls: read(node, "rolls", context)?,
        bonus_rolls: read_optional::<Box<dyn LootNumber>>(node, "bonus_rolls", context)?
            .unwrap_or_else(|| Box::new(Constant::new(0.0))),
        entries: read_list(node, "entries", context)?,
        conditions: read_list(node, "conditions", context)?,
        functions: read_list(node, "functions", context)?,
    })
}

fn write_table(
    table: &LootTable,
    result: &mut ConfigNode,
    context: &ConversionContext,
) -> TroveResult<()> {
    write_list(&table.pools, result, "pools", context)?;
    write_list(&table.functions, result, "functions", context)
}

fn read_table(node: &ConfigNode, context: &ConversionContext) -> TroveResult<LootTable> {
    Ok(LootTable {
        pools: read_list(node, "pools", context)?,
        functions: read_list(node, "functions", context)?,
    })
}
