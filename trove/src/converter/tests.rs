//! Unit tests for converter composition.

use serde_json::json;

use super::*;
use crate::{TroveError, TypeTag, node};

fn context() -> ConversionContext {
    ConversionContext::default()
}

#[test]
fn additive_serializers_start_from_an_empty_node() {
    let writer = additive(|value: &i64, result: &mut ConfigNode, _: &ConversionContext| {
        node::set(node::child_mut(result, "value"), *value);
        Ok(())
    });
    let serialized = writer.serialize(&3, &context()).expect("serializes");
    assert_eq!(serialized, json!({ "value": 3 }));
}

#[test]
fn additive_serializers_keep_existing_fields() {
    let writer = additive(|value: &i64, result: &mut ConfigNode, _: &ConversionContext| {
        node::set(node::child_mut(result, "value"), *value);
        Ok(())
    });
    let mut result = json!({ "type": "constant" });
    writer
        .serialize_onto(&3, &mut result, &context())
        .expect("serializes");
    assert_eq!(result, json!({ "type": "constant", "value": 3 }));
}

#[test]
fn whole_node_serializers_replace_the_target() {
    let writer = serializer(|value: &str, _: &ConversionContext| Ok(json!(value)));
    let mut result = json!({ "stale": true });
    writer
        .serialize_onto("fresh", &mut result, &context())
        .expect("serializes");
    assert_eq!(result, json!("fresh"));
}

#[test]
fn joined_halves_are_not_checked_against_each_other() {
    let lossy = join(
        serializer(|_: &i64, _: &ConversionContext| Ok(json!(0))),
        deserializer(|node: &ConfigNode, _: &ConversionContext| {
            node.as_i64()
                .ok_or_else(|| TroveError::deserialization("", "expected an integer"))
        }),
    );
    let serialized = Serializer::<i64>::serialize(&lossy, &5, &context()).expect("serializes");
    assert_eq!(serialized, json!(0));
    let value = Deserializer::<i64>::deserialize(&lossy, &json!(5), &context())
        .expect("deserializes");
    assert_eq!(value, 5);
}

#[test]
fn conditional_predicates_are_independent() {
    let scalars = conditional(
        join(
            serializer(|value: &i64, _: &ConversionContext| Ok(json!(value))),
            deserializer(|node: &ConfigNode, _: &ConversionContext| {
                Ok(node.as_i64().unwrap_or_default())
            }),
        ),
        |value: &i64, _: &ConversionContext| *value >= 0,
        |node: &ConfigNode, _: &ConversionContext| node.is_number(),
    );
    let context = context();
    assert!(scalars.can_serialize(&1, &context));
    assert!(!scalars.can_serialize(&-1, &context));
    assert!(scalars.can_deserialize(&json!(2), &context));
    assert!(!scalars.can_deserialize(&json!({ "value": 2 }), &context));
}

#[test]
fn keyed_converters_record_key_and_type() {
    let keyed = KeyedConverter::join(
        "minecraft:constant",
        serializer(|value: &f64, _: &ConversionContext| Ok(json!(value))),
        deserializer(|node: &ConfigNode, _: &ConversionContext| {
            node::require_f64(node, "value")
        }),
    );
    assert_eq!(keyed.key(), "minecraft:constant");
    assert_eq!(keyed.converted_type(), TypeTag::of::<f64>());
    let value = keyed
        .deserialize(&json!({ "value": 1.5 }), &context())
        .expect("deserializes");
    assert_eq!(value, 1.5);
}
