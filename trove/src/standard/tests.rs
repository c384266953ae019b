//! Unit tests for the standard vocabulary.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::{
    AsAny, Batch, ConversionContext, Converter, Deserializer, ErrorKind, GenerationContext,
    LootCondition, LootGenerator, LootItem, LootModifier, Serializer, TroveError,
};

#[fixture]
fn conversion() -> ConversionContext {
    ConversionContext::builder()
        .trove(trove().expect("standard vocabulary registers cleanly"))
        .build()
}

#[fixture]
fn generation() -> GenerationContext {
    seeded(7)
}

fn seeded(seed: u64) -> GenerationContext {
    GenerationContext::builder()
        .random(StdRng::seed_from_u64(seed))
        .build()
        .expect("random source supplied")
}

fn lucky(luck: f64) -> GenerationContext {
    GenerationContext::builder()
        .random(StdRng::seed_from_u64(1))
        .with(&LUCK, luck)
        .build()
        .expect("random source supplied")
}

fn number(node: &serde_json::Value, context: &ConversionContext) -> Box<dyn LootNumber> {
    context
        .trove()
        .require::<Box<dyn LootNumber>>()
        .expect("numbers registered")
        .deserialize(node, context)
        .expect("valid number")
}

fn condition(node: &serde_json::Value, context: &ConversionContext) -> Box<dyn LootCondition> {
    context
        .trove()
        .require::<Box<dyn LootCondition>>()
        .expect("conditions registered")
        .deserialize(node, context)
        .expect("valid condition")
}

fn stacks(batch: &Batch) -> Vec<ItemStack> {
    batch
        .iter()
        .filter_map(|item| item.downcast_ref::<ItemStack>().cloned())
        .collect()
}

#[rstest]
fn bare_scalars_read_and_write_as_constants(
    conversion: ConversionContext,
    generation: GenerationContext,
) {
    let parsed = number(&json!(2.6), &conversion);
    assert!(AsAny::as_any(&*parsed).is::<Constant>());
    assert_eq!(parsed.long(&generation), 3);
    assert_eq!(parsed.double(&generation), 2.6);

    let keyed = number(&json!({ "type": "minecraft:constant", "value": 4 }), &conversion);
    let written = conversion
        .trove()
        .require::<Box<dyn LootNumber>>()
        .expect("numbers registered")
        .serialize(&keyed, &conversion)
        .expect("constants serialize");
    assert_eq!(written, json!(4.0));
}

#[rstest]
fn uniform_integers_include_both_bounds(conversion: ConversionContext) {
    let uniform = number(
        &json!({ "type": "minecraft:uniform", "min": 1, "max": 3 }),
        &conversion,
    );
    let context = seeded(42);
    let mut seen = [false; 3];
    for _ in 0..200 {
        let value = uniform.long(&context);
        assert!((1..=3).contains(&value), "{value} out of range");
        if let Some(slot) = usize::try_from(value - 1).ok().and_then(|i| seen.get_mut(i)) {
            *slot = true;
        }
    }
    assert_eq!(seen, [true; 3]);
}

#[rstest]
#[case(json!({ "type": "minecraft:uniform", "min": 5, "max": 2 }), 5, 5.0)]
#[case(json!({ "type": "minecraft:uniform", "min": 4, "max": 4 }), 4, 4.0)]
fn degenerate_uniform_ranges_return_the_minimum(
    conversion: ConversionContext,
    generation: GenerationContext,
    #[case] node: serde_json::Value,
    #[case] long: i64,
    #[case] double: f64,
) {
    let uniform = number(&node, &conversion);
    assert_eq!(uniform.long(&generation), long);
    assert_eq!(uniform.double(&generation), double);
}

#[rstest]
fn uniform_floats_stay_below_the_maximum(conversion: ConversionContext) {
    let uniform = number(
        &json!({ "type": "minecraft:uniform", "min": 0.5, "max": 1.5 }),
        &conversion,
    );
    let context = seeded(9);
    for _ in 0..100 {
        let value = uniform.double(&context);
        assert!((0.5..1.5).contains(&value), "{value} out of range");
    }
}

#[rstest]
#[case(0.0, 0)]
#[case(1.0, 6)]
fn binomial_extremes_are_deterministic(
    conversion: ConversionContext,
    generation: GenerationContext,
    #[case] p: f64,
    #[case] expected: i64,
) {
    let binomial = number(
        &json!({ "type": "minecraft:binomial", "n": 6, "p": p }),
        &conversion,
    );
    assert_eq!(binomial.long(&generation), expected);
}

#[rstest]
fn nested_numbers_need_a_nested_value(conversion: ConversionContext) {
    let converter = conversion
        .trove()
        .require::<Box<dyn LootNumber>>()
        .expect("numbers registered");
    let incomplete = converter
        .deserialize(&json!({ "type": "minecraft:uniform", "min": 1 }), &conversion)
        .expect_err("max is missing");
    assert!(matches!(&*incomplete, TroveError::MissingField { field } if field == "max"));
    let unknown = converter
        .deserialize(&json!({ "type": "minecraft:gaussian" }), &conversion)
        .expect_err("unknown provider");
    assert_eq!(unknown.kind(), ErrorKind::Lookup);
}

#[rstest]
#[case(json!({
    "condition": "minecraft:inverted",
    "term": { "condition": "minecraft:random_chance", "chance": 0 }
}), true)]
#[case(json!({ "condition": "minecraft:all_of", "terms": [] }), true)]
#[case(json!({ "condition": "minecraft:any_of", "terms": [] }), false)]
#[case(json!({ "condition": "minecraft:random_chance", "chance": 1 }), true)]
#[case(json!({ "condition": "minecraft:random_chance", "chance": 0 }), false)]
#[case(json!({
    "condition": "trove:at_least",
    "required": 2,
    "terms": [
        { "condition": "minecraft:random_chance", "chance": 1 },
        { "condition": "minecraft:random_chance", "chance": 0 },
        { "condition": "minecraft:random_chance", "chance": 1 }
    ]
}), true)]
#[case(json!({
    "condition": "trove:at_least",
    "required": 3,
    "terms": [
        { "condition": "minecraft:random_chance", "chance": 1 },
        { "condition": "minecraft:random_chance", "chance": 0 },
        { "condition": "minecraft:random_chance", "chance": 1 }
    ]
}), false)]
fn serialized_conditions_verify(
    conversion: ConversionContext,
    generation: GenerationContext,
    #[case] node: serde_json::Value,
    #[case] expected: bool,
) {
    assert_eq!(condition(&node, &conversion).verify(&generation), expected);
}

fn set_count(count: f64, add: bool) -> SetCount {
    SetCount {
        count: Box::new(Constant::new(count)),
        add,
        conditions: Vec::new(),
    }
}

#[rstest]
#[case(set_count(5.0, false), Some(5))]
#[case(set_count(5.0, true), Some(7))]
#[case(set_count(-2.0, true), None)]
#[case(set_count(0.0, false), None)]
fn set_count_adjusts_stacks(
    generation: GenerationContext,
    #[case] modifier: SetCount,
    #[case] expected: Option<i64>,
) {
    let stick = LootItem::new(ItemStack::new("minecraft:stick", 2));
    let result = modifier.modify(stick, &generation);
    let count = result
        .as_ref()
        .and_then(LootItem::downcast_ref::<ItemStack>)
        .map(|stack| stack.count);
    assert_eq!(count, expected);
}

#[rstest]
fn set_count_leaves_other_items_alone(generation: GenerationContext) {
    let modifier = set_count(0.0, false);
    let result = modifier.modify(LootItem::new(7_u8), &generation);
    assert_eq!(result.as_ref().and_then(LootItem::downcast_ref::<u8>), Some(&7));

    let gated = SetCount {
        conditions: vec![Box::new(false)],
        ..set_count(9.0, false)
    };
    let stack = gated.modify(LootItem::new(ItemStack::new("minecraft:stick", 2)), &generation);
    assert_eq!(
        stack.as_ref().and_then(LootItem::downcast_ref::<ItemStack>).map(|s| s.count),
        Some(2)
    );
}

#[rstest]
#[case(Weighting { weight: 3, quality: 0 }, None, 3)]
#[case(Weighting { weight: 1, quality: 2 }, Some(1.5), 4)]
#[case(Weighting { weight: 1, quality: 2 }, None, 1)]
#[case(Weighting { weight: 2, quality: -5 }, Some(1.0), 1)]
#[case(Weighting { weight: 0, quality: 0 }, None, 1)]
fn effective_weight_scales_quality_with_luck(
    #[case] weighting: Weighting,
    #[case] luck: Option<f64>,
    #[case] expected: i64,
) {
    let context = luck.map_or_else(|| seeded(1), lucky);
    assert_eq!(weighting.effective(&context), expected);
}

fn stick_pool(rolls: f64) -> LootPool {
    LootPool::new(
        Box::new(Constant::new(rolls)),
        vec![Box::new(ItemEntry::new("minecraft:stick"))],
    )
}

#[rstest]
fn pools_roll_their_entries(generation: GenerationContext) {
    let rolled = stick_pool(3.0).generate(&generation);
    assert_eq!(stacks(&rolled), vec![ItemStack::new("minecraft:stick", 1); 3]);
}

#[rstest]
fn failed_pool_conditions_generate_nothing(generation: GenerationContext) {
    let pool = LootPool {
        conditions: vec![Box::new(false)],
        ..stick_pool(3.0)
    };
    assert!(pool.generate(&generation).is_empty());
}

#[test]
fn luck_adds_bonus_rolls() {
    let pool = LootPool {
        bonus_rolls: Box::new(Constant::new(2.0)),
        ..stick_pool(1.0)
    };
    assert_eq!(pool.generate(&lucky(1.5)).len(), 4);
    assert_eq!(pool.generate(&seeded(1)).len(), 1);
}

#[rstest]
fn unavailable_entries_are_never_picked(generation: GenerationContext) {
    let mut blocked = ItemEntry::new("minecraft:diamond");
    blocked.conditions.push(Box::new(false));
    blocked.weighting.weight = 1_000;
    let pool = LootPool::new(
        Box::new(Constant::new(20.0)),
        vec![Box::new(blocked), Box::new(ItemEntry::new("minecraft:stick"))],
    );
    let rolled = stacks(&pool.generate(&generation));
    assert_eq!(rolled.len(), 20);
    assert!(rolled.iter().all(|stack| stack.id == "minecraft:stick"));

    let empty = LootPool::new(Box::new(Constant::new(5.0)), Vec::new());
    assert!(empty.generate(&generation).is_empty());
}

#[rstest]
fn tables_concatenate_pools_then_apply_functions(generation: GenerationContext) {
    let table = LootTable {
        pools: vec![stick_pool(1.0), stick_pool(2.0)],
        functions: vec![Box::new(set_count(4.0, false))],
    };
    let rolled = stacks(&table.generate(&generation));
    assert_eq!(rolled, vec![ItemStack::new("minecraft:stick", 4); 3]);
}

fn table_converter(context: &ConversionContext) -> Arc<dyn Converter<LootTable>> {
    context.trove().require::<LootTable>().expect("tables registered")
}

#[rstest]
fn tables_load_from_nodes(conversion: ConversionContext, generation: GenerationContext) {
    let node = json!({
        "pools": [{
            "rolls": { "type": "minecraft:uniform", "min": 2, "max": 2 },
            "entries": [
                {
                    "type": "minecraft:empty",
                    "conditions": [{ "condition": "minecraft:random_chance", "chance": 0 }]
                },
                {
                    "type": "minecraft:item",
                    "name": "minecraft:apple",
                    "functions": [{ "function": "minecraft:set_count", "count": 3 }]
                }
            ]
        }],
        "functions": [{ "function": "minecraft:set_count", "count": 1, "add": true }]
    });
    let table = table_converter(&conversion)
        .deserialize(&node, &conversion)
        .expect("valid table");
    let rolled = stacks(&table.generate(&generation));
    assert_eq!(rolled, vec![ItemStack::new("minecraft:apple", 4); 2]);
}

#[rstest]
fn serialized_tables_read_back_identically(conversion: ConversionContext) {
    let node = json!({
        "pools": [{
            "rolls": 1,
            "bonus_rolls": { "type": "minecraft:binomial", "n": 3, "p": 0.5 },
            "entries": [{
                "type": "minecraft:item",
                "name": "minecraft:bone",
                "quality": 2,
                "conditions": [{
                    "condition": "minecraft:inverted",
                    "term": { "condition": "minecraft:random_chance", "chance": 0.25 }
                }]
            }],
            "conditions": [{ "condition": "minecraft:any_of", "terms": [] }]
        }]
    });
    let converter = table_converter(&conversion);
    let table = converter.deserialize(&node, &conversion).expect("valid table");
    let written = converter.serialize(&table, &conversion).expect("serializes");
    let reread = converter.deserialize(&written, &conversion).expect("reads back");
    assert_eq!(
        converter.serialize(&reread, &conversion).expect("serializes again"),
        written
    );
    assert_eq!(
        written.pointer("/pools/0/entries/0/type"),
        Some(&json!("minecraft:item"))
    );
    assert_eq!(written.pointer("/pools/0/entries/0/weight"), Some(&json!(1)));
}

#[rstest]
fn pools_require_entries(conversion: ConversionContext) {
    let err = table_converter(&conversion)
        .deserialize(&json!({ "pools": [{ "rolls": 1 }] }), &conversion)
        .expect_err("entries are required");
    assert!(matches!(&*err, TroveError::MissingField { field } if field == "entries"));
}

#[test]
fn item_stacks_default_to_a_single_item() {
    let context = ConversionContext::default();
    let converter = item_stacks();
    let stack = Deserializer::<ItemStack>::deserialize(
        &converter,
        &json!({ "id": "minecraft:stick" }),
        &context,
    )
    .expect("count defaults");
    assert_eq!(stack, ItemStack::new("minecraft:stick", 1));
    assert_eq!(
        Serializer::<ItemStack>::serialize(&converter, &stack, &context).expect("serializes"),
        json!({ "id": "minecraft:stick", "count": 1 })
    );
}

#[test]
fn the_trove_knows_every_family() {
    let trove = trove().expect("standard vocabulary registers cleanly");
    assert!(trove.get::<Box<dyn LootNumber>>().is_some());
    assert!(trove.get::<Box<dyn LootCondition>>().is_some());
    assert!(trove.get::<Box<dyn LootModifier>>().is_some());
    assert!(trove.get::<Box<dyn LootEntry>>().is_some());
    assert!(trove.get::<LootPool>().is_some());
    assert!(trove.get::<LootTable>().is_some());
    assert!(trove.get::<NumberRange>().is_some());
    assert_eq!(trove.len(), 8);
}

fn leaf(name: &str, open: bool) -> Box<dyn LootEntry> {
    let mut entry = ItemEntry::new(name);
    entry.conditions.push(Box::new(open));
    Box::new(entry)
}

fn offered(entry: &dyn LootEntry, context: &GenerationContext) -> Vec<String> {
    entry
        .choices(context)
        .iter()
        .flat_map(|choice| stacks(&choice.generate(context)))
        .map(|stack| stack.id)
        .collect()
}

fn children() -> Vec<Box<dyn LootEntry>> {
    vec![leaf("a", false), leaf("b", true), leaf("c", false), leaf("d", true)]
}

#[rstest]
fn alternatives_offer_the_first_child_with_choices(generation: GenerationContext) {
    let alternatives = AlternativesEntry {
        children: children(),
        conditions: Vec::new(),
    };
    assert_eq!(offered(&alternatives, &generation), vec!["b"]);
}

#[rstest]
fn groups_offer_every_child(generation: GenerationContext) {
    let group = GroupEntry {
        children: children(),
        conditions: Vec::new(),
    };
    assert_eq!(offered(&group, &generation), vec!["b", "d"]);
}

#[rstest]
fn sequences_stop_at_the_first_child_without_choices(generation: GenerationContext) {
    let sequence = SequenceEntry {
        children: vec![leaf("a", true), leaf("b", true), leaf("c", false), leaf("d", true)],
        conditions: Vec::new(),
    };
    assert_eq!(offered(&sequence, &generation), vec!["a", "b"]);
    let blocked = SequenceEntry {
        children: children(),
        conditions: Vec::new(),
    };
    assert!(offered(&blocked, &generation).is_empty());
}

#[rstest]
fn failed_composite_conditions_offer_nothing(generation: GenerationContext) {
    let group = GroupEntry {
        children: children(),
        conditions: vec![Box::new(false)],
    };
    assert!(offered(&group, &generation).is_empty());
    assert!(offered(&GroupEntry::default(), &generation).is_empty());
}

#[rstest]
fn pools_draw_over_nested_choices(generation: GenerationContext) {
    let nested = GroupEntry {
        children: vec![
            leaf("minecraft:bone", true),
            Box::new(AlternativesEntry {
                children: vec![leaf("minecraft:gold", false), leaf("minecraft:arrow", true)],
                conditions: Vec::new(),
            }),
        ],
        conditions: Vec::new(),
    };
    let pool = LootPool::new(Box::new(Constant::new(200.0)), vec![Box::new(nested)]);
    let rolled = stacks(&pool.generate(&generation));
    assert_eq!(rolled.len(), 200);
    assert!(rolled.iter().any(|stack| stack.id == "minecraft:bone"));
    assert!(rolled.iter().any(|stack| stack.id == "minecraft:arrow"));
    assert!(rolled.iter().all(|stack| stack.id != "minecraft:gold"));
}

#[rstest]
#[case(AlternativesEntry::KEY)]
#[case(GroupEntry::KEY)]
#[case(SequenceEntry::KEY)]
fn composite_entries_load_and_round_trip(
    conversion: ConversionContext,
    generation: GenerationContext,
    #[case] key: &str,
) {
    let node = json!({
        "pools": [{
            "rolls": 1,
            "entries": [{
                "type": key,
                "children": [
                    { "type": "minecraft:item", "name": "minecraft:apple" }
                ]
            }]
        }]
    });
    let converter = table_converter(&conversion);
    let table = converter.deserialize(&node, &conversion).expect("valid table");
    assert_eq!(
        stacks(&table.generate(&generation)),
        vec![ItemStack::new("minecraft:apple", 1)]
    );
    let written = converter.serialize(&table, &conversion).expect("serializes");
    assert_eq!(written.pointer("/pools/0/entries/0/type"), Some(&json!(key)));
    let reread = converter.deserialize(&written, &conversion).expect("reads back");
    assert_eq!(
        converter.serialize(&reread, &conversion).expect("serializes again"),
        written
    );
}

fn limit_count(min: Option<f64>, max: Option<f64>) -> LimitCount {
    let bound = |value: f64| -> Box<dyn LootNumber> { Box::new(Constant::new(value)) };
    LimitCount {
        limit: NumberRange {
            min: min.map(bound),
            max: max.map(bound),
        },
        conditions: Vec::new(),
    }
}

#[rstest]
#[case(limit_count(Some(3.0), None), Some(3))]
#[case(limit_count(None, Some(1.0)), Some(1))]
#[case(limit_count(Some(1.0), Some(5.0)), Some(2))]
#[case(limit_count(Some(6.0), Some(4.0)), Some(4))]
#[case(limit_count(None, Some(0.0)), None)]
#[case(limit_count(None, None), Some(2))]
fn limit_count_clamps_stacks(
    generation: GenerationContext,
    #[case] modifier: LimitCount,
    #[case] expected: Option<i64>,
) {
    let stick = LootItem::new(ItemStack::new("minecraft:stick", 2));
    let count = modifier
        .modify(stick, &generation)
        .as_ref()
        .and_then(LootItem::downcast_ref::<ItemStack>)
        .map(|stack| stack.count);
    assert_eq!(count, expected);
}

#[rstest]
fn limit_count_skips_other_items_and_failed_conditions(generation: GenerationContext) {
    let modifier = limit_count(None, Some(0.0));
    let passed = modifier.modify(LootItem::new(7_u8), &generation);
    assert_eq!(passed.as_ref().and_then(LootItem::downcast_ref::<u8>), Some(&7));

    let gated = LimitCount {
        conditions: vec![Box::new(false)],
        ..limit_count(None, Some(0.0))
    };
    let stack = gated.modify(LootItem::new(ItemStack::new("minecraft:stick", 2)), &generation);
    assert_eq!(
        stack.as_ref().and_then(LootItem::downcast_ref::<ItemStack>).map(|s| s.count),
        Some(2)
    );
}

#[rstest]
#[case(json!(3), 10, 3)]
#[case(json!({ "min": 4 }), 1, 4)]
#[case(json!({ "max": 2 }), 9, 2)]
#[case(json!({}), 9, 9)]
fn ranges_read_scalars_and_maps(
    conversion: ConversionContext,
    generation: GenerationContext,
    #[case] node: serde_json::Value,
    #[case] value: i64,
    #[case] expected: i64,
) {
    let range = ranges()
        .deserialize(&node, &conversion)
        .expect("valid range");
    assert_eq!(range.limit(value, &generation), expected);
}

#[rstest]
fn ranges_reject_other_shapes(conversion: ConversionContext) {
    let err = ranges()
        .deserialize(&json!("three"), &conversion)
        .expect_err("strings are not ranges");
    assert_eq!(err.kind(), ErrorKind::Deserialization);
}

#[rstest]
fn limit_count_loads_from_nodes(conversion: ConversionContext, generation: GenerationContext) {
    let node = json!({
        "pools": [{
            "rolls": 1,
            "entries": [{
                "type": "minecraft:item",
                "name": "minecraft:arrow",
                "functions": [
                    { "function": "minecraft:set_count", "count": 64 },
                    { "function": "minecraft:limit_count", "limit": { "min": 1, "max": 16 } }
                ]
            }]
        }]
    });
    let converter = table_converter(&conversion);
    let table = converter.deserialize(&node, &conversion).expect("valid table");
    assert_eq!(
        stacks(&table.generate(&generation)),
        vec![ItemStack::new("minecraft:arrow", 16)]
    );
    let written = converter.serialize(&table, &conversion).expect("serializes");
    assert_eq!(
        written.pointer("/pools/0/entries/0/functions/1/limit"),
        Some(&json!({ "min": 1.0, "max": 16.0 }))
    );
}

#[rstest]
fn huge_binomial_trials_are_bounded(conversion: ConversionContext, generation: GenerationContext) {
    let binomial = number(
        &json!({ "type": "minecraft:binomial", "n": 1e18, "p": 1 }),
        &conversion,
    );
    assert_eq!(binomial.long(&generation), MAX_REPETITIONS);
}

#[rstest]
fn huge_roll_counts_are_bounded(generation: GenerationContext) {
    let pool = stick_pool(1e18);
    let rolled = pool.generate(&generation);
    assert_eq!(i64::try_from(rolled.len()).ok(), Some(MAX_REPETITIONS));
}
