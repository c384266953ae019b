//! Unit tests for manager validation and dispatch.

use std::fmt;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::{
    ErrorKind, KeyedConverter, Serializer, Subtype, additive, conditional, deserializer, join,
    serializer,
};

trait Shape: AsAny + fmt::Debug {
    fn label(&self) -> String;
}

#[derive(Debug, PartialEq)]
struct Circle {
    radius: i64,
}

#[derive(Debug, PartialEq)]
struct Square;

#[derive(Debug)]
struct Unregistered;

impl Shape for Circle {
    fn label(&self) -> String {
        format!("circle {}", self.radius)
    }
}

impl Shape for Square {
    fn label(&self) -> String {
        "square".to_owned()
    }
}

impl Shape for Unregistered {
    fn label(&self) -> String {
        "unregistered".to_owned()
    }
}

impl Subtype<dyn Shape> for Circle {
    fn upcast(self) -> Box<dyn Shape> {
        Box::new(self)
    }
}

impl Subtype<dyn Shape> for Square {
    fn upcast(self) -> Box<dyn Shape> {
        Box::new(self)
    }
}

fn circles(key: &str) -> KeyedConverter<Circle> {
    KeyedConverter::join(
        key,
        additive(|circle: &Circle, result: &mut ConfigNode, _: &ConversionContext| {
            node::set(node::child_mut(result, "radius"), circle.radius);
            Ok(())
        }),
        deserializer(|node: &ConfigNode, _: &ConversionContext| {
            Ok(Circle {
                radius: node::require_i64(node, "radius")?,
            })
        }),
    )
}

fn squares(key: &str) -> KeyedConverter<Square> {
    KeyedConverter::join(
        key,
        additive(|_: &Square, _: &mut ConfigNode, _: &ConversionContext| Ok(())),
        deserializer(|_: &ConfigNode, _: &ConversionContext| Ok(Square)),
    )
}

/// Treats bare integers as circles of that radius.
fn bare_radius(accepts: bool) -> impl ConditionalConverter<Box<dyn Shape>> {
    conditional(
        join(
            serializer(|shape: &Box<dyn Shape>, _: &ConversionContext| {
                let radius = AsAny::as_any(&**shape)
                    .downcast_ref::<Circle>()
                    .map_or(0, |circle| circle.radius);
                Ok(json!(radius))
            }),
            deserializer(|node: &ConfigNode, _: &ConversionContext| {
                let circle: Box<dyn Shape> = Box::new(Circle {
                    radius: node.as_i64().unwrap_or_default(),
                });
                Ok(circle)
            }),
        ),
        move |_: &Box<dyn Shape>, _: &ConversionContext| accepts,
        move |_: &ConfigNode, _: &ConversionContext| accepts,
    )
}

#[fixture]
fn manager() -> ConversionManager<dyn Shape> {
    ConversionManager::builder()
        .key_location("location")
        .add_converter(circles("a"))
        .add_converter(squares("b"))
        .build()
        .expect("valid manager")
}

#[fixture]
fn context() -> ConversionContext {
    ConversionContext::default()
}

#[rstest]
fn deserializes_by_discriminator(
    manager: ConversionManager<dyn Shape>,
    context: ConversionContext,
) {
    let circle = manager
        .deserialize(&json!({ "location": "a", "radius": 2 }), &context)
        .expect("known key");
    assert_eq!(circle.label(), "circle 2");
    let square = manager
        .deserialize(&json!({ "location": "b" }), &context)
        .expect("known key");
    assert!(AsAny::as_any(&*square).is::<Square>());
}

#[rstest]
#[case(json!({ "location": "unknown" }), ErrorKind::Lookup)]
#[case(json!({ "radius": 2 }), ErrorKind::Deserialization)]
#[case(json!(3), ErrorKind::Deserialization)]
#[case(json!({ "location": "a" }), ErrorKind::Deserialization)]
fn rejects_unusable_nodes(
    manager: ConversionManager<dyn Shape>,
    context: ConversionContext,
    #[case] node: ConfigNode,
    #[case] expected: ErrorKind,
) {
    let err = manager.deserialize(&node, &context).expect_err("unusable node");
    assert_eq!(err.kind(), expected);
}

#[rstest]
fn unknown_keys_name_the_key(manager: ConversionManager<dyn Shape>, context: ConversionContext) {
    let err = manager
        .deserialize(&json!({ "location": "unknown" }), &context)
        .expect_err("unknown key");
    assert!(matches!(&*err, TroveError::UnknownKey { key, .. } if key == "unknown"));
}

#[rstest]
fn serializes_fields_and_discriminator(
    manager: ConversionManager<dyn Shape>,
    context: ConversionContext,
) {
    let shape: Box<dyn Shape> = Box::new(Circle { radius: 4 });
    let serialized = manager.serialize(&shape, &context).expect("registered type");
    assert_eq!(serialized, json!({ "location": "a", "radius": 4 }));
    let back = manager.deserialize(&serialized, &context).expect("round trip");
    assert_eq!(
        AsAny::as_any(&*back).downcast_ref::<Circle>(),
        Some(&Circle { radius: 4 })
    );
}

#[rstest]
fn serializing_unregistered_types_fails(
    manager: ConversionManager<dyn Shape>,
    context: ConversionContext,
) {
    let shape: Box<dyn Shape> = Box::new(Unregistered);
    let err = manager.serialize(&shape, &context).expect_err("unregistered");
    assert!(matches!(
        &*err,
        TroveError::UnknownType { type_name, .. } if type_name.ends_with("Unregistered")
    ));
}

#[rstest]
fn matching_initial_converter_short_circuits(context: ConversionContext) {
    let manager = ConversionManager::<dyn Shape>::builder()
        .key_location("location")
        .add_converter(squares("a"))
        .add_initial_converter(bare_radius(true))
        .build()
        .expect("valid manager");
    let shape = manager
        .deserialize(&json!({ "location": "a" }), &context)
        .expect("initial converter");
    assert!(AsAny::as_any(&*shape).is::<Circle>());
    let square: Box<dyn Shape> = Box::new(Square);
    assert_eq!(manager.serialize(&square, &context).expect("initial"), json!(0));
}

#[rstest]
fn rejecting_initial_converter_falls_through(context: ConversionContext) {
    let manager = ConversionManager::<dyn Shape>::builder()
        .key_location("location")
        .add_converter(squares("a"))
        .add_initial_converter(bare_radius(false))
        .build()
        .expect("valid manager");
    let shape = manager
        .deserialize(&json!({ "location": "a" }), &context)
        .expect("keyed converter");
    assert!(AsAny::as_any(&*shape).is::<Square>());
    let square: Box<dyn Shape> = Box::new(Square);
    assert_eq!(
        manager.serialize(&square, &context).expect("keyed"),
        json!({ "location": "a" })
    );
}

#[test]
fn duplicate_keys_fail_the_build() {
    let err = ConversionManager::<dyn Shape>::builder()
        .key_location("location")
        .add_converter(circles("a"))
        .add_converter(squares("a"))
        .build()
        .expect_err("duplicate key");
    assert!(matches!(&*err, TroveError::DuplicateKey { key, .. } if key == "a"));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn duplicate_types_fail_the_build() {
    let err = ConversionManager::<dyn Shape>::builder()
        .key_location("location")
        .add_converter(circles("a"))
        .add_converter(circles("b"))
        .build()
        .expect_err("duplicate type");
    assert!(matches!(
        &*err,
        TroveError::DuplicateType { type_name, .. } if type_name.ends_with("Circle")
    ));
}

#[test]
fn every_violation_is_reported() {
    let err = ConversionManager::<dyn Shape>::builder()
        .key_location("location")
        .add_converter(circles("a"))
        .add_converter(circles("b"))
        .add_converter(squares("a"))
        .build()
        .expect_err("two violations");
    let TroveError::Aggregate(aggregate) = &*err else {
        panic!("expected Aggregate, got {err:?}");
    };
    assert_eq!(aggregate.len(), 2);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
fn key_location_is_required(#[case] location: Option<&str>) {
    let mut builder = ConversionManager::<dyn Shape>::builder().add_converter(circles("a"));
    if let Some(field) = location {
        builder = builder.key_location(field);
    }
    let err = builder.build().expect_err("unusable key location");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[rstest]
fn reports_registrations(manager: ConversionManager<dyn Shape>) {
    assert_eq!(manager.key_location(), "location");
    assert_eq!(manager.base_type(), TypeTag::of::<dyn Shape>());
    assert!(manager.contains_key("a"));
    assert_eq!(manager.key_for(TypeTag::of::<Square>()), Some("b"));
    assert_eq!(manager.key_for(TypeTag::of::<Unregistered>()), None);
}
