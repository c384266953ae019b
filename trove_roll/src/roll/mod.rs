//! Loading, rolling, and printing loot tables.

use std::{io::Write, sync::Arc};

use camino::Utf8Path;
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};
use trove::{
    ConversionContext, GenerationContext, LootGenerator, LootProcessor, node,
    standard::{self, ItemStack, LootTable},
};

use crate::{cli::Args, error::RollError};

/// A conversion context around the standard vocabulary.
///
/// # Errors
///
/// Returns [`RollError::Trove`] when the vocabulary fails to register.
pub fn conversion_context() -> Result<ConversionContext, RollError> {
    Ok(ConversionContext::builder()
        .trove(standard::trove()?)
        .build())
}

/// Read the loot table at `path`.
///
/// # Errors
///
/// Returns [`RollError::Trove`] when the file cannot be loaded or does not
/// describe a table.
pub fn load_table(path: &Utf8Path, context: &ConversionContext) -> Result<LootTable, RollError> {
    let tree = node::load_file(path)?;
    let table = context
        .trove()
        .require::<LootTable>()?
        .deserialize(&tree, context)?;
    debug!(%path, pools = table.pools.len(), "loaded loot table");
    Ok(table)
}

/// A generation context seeded with `seed`, carrying `luck` when given.
///
/// # Errors
///
/// Returns [`RollError::Trove`] when the context cannot be built.
pub fn generation_context(seed: u64, luck: Option<f64>) -> Result<GenerationContext, RollError> {
    let builder = GenerationContext::builder().random(StdRng::seed_from_u64(seed));
    let lucky = match luck {
        Some(value) => builder.with(&standard::LUCK, value),
        None => builder,
    };
    Ok(lucky.build()?)
}

/// Roll `table` `times` times and collect the generated stacks in order.
///
/// # Errors
///
/// Returns [`RollError::Trove`] when the table generates something other
/// than item stacks.
pub fn roll_table(
    table: &LootTable,
    times: u32,
    context: &GenerationContext,
) -> Result<Vec<ItemStack>, RollError> {
    let rolled = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&rolled);
    let processor = LootProcessor::builder()
        .process_type::<ItemStack, _>(move |stack| sink.lock().push(stack.clone()))
        .build();
    for _ in 0..times {
        processor.accept_batch(&table.generate(context))?;
    }
    let stacks = std::mem::take(&mut *rolled.lock());
    Ok(stacks)
}

/// Run the command: load, roll, and write each stack to `out` as one JSON
/// line. Returns the number of lines written.
///
/// # Errors
///
/// Returns a [`RollError`] when loading, rolling, encoding, or writing fails.
pub fn run(args: &Args, out: &mut impl Write) -> Result<usize, RollError> {
    let conversion = conversion_context()?;
    let table = load_table(&args.table, &conversion)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, times = args.times, "rolling loot table");
    let generation = generation_context(seed, args.luck)?;

    let stacks = roll_table(&table, args.times, &generation)?;
    let converter = conversion.trove().require::<ItemStack>()?;
    for stack in &stacks {
        let encoded = converter.serialize(stack, &conversion)?;
        serde_json::to_writer(&mut *out, &encoded)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(stacks.len())
}
