//! Configuration node helpers.
//!
//! Converters read and write [`ConfigNode`] trees, which are plain
//! [`serde_json::Value`]s: objects are maps, arrays are lists, every other
//! variant is a scalar, and [`Value::Null`] stands for "no value". The helpers
//! here cover navigation, typed field access with descriptive errors, and
//! lists of nested values.

mod fields;
mod load;

pub use fields::{
    discriminator, field, optional_bool, optional_f64, optional_i64, require, require_f64,
    require_i64, require_str,
};
pub use load::{NodeFormat, load_file, parse};

use serde_json::{Map, Value};

use crate::{ConversionContext, Deserializer, Serializer, TroveError, TroveResult};

/// Generic tree value exchanged with converters.
pub type ConfigNode = Value;

static ABSENT: ConfigNode = ConfigNode::Null;

/// Create a fresh node holding no value.
#[must_use]
pub const fn empty() -> ConfigNode {
    ConfigNode::Null
}

/// Whether `node` holds no value.
#[must_use]
pub const fn is_absent(node: &ConfigNode) -> bool {
    matches!(node, ConfigNode::Null)
}

/// The scalar held by `node`, if it is one.
#[must_use]
pub const fn raw_scalar(node: &ConfigNode) -> Option<&ConfigNode> {
    match node {
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Some(node),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Navigate to the child named `segment`.
///
/// Missing children, and children of non-map nodes, read as absent.
#[must_use]
pub fn child<'a>(node: &'a ConfigNode, segment: &str) -> &'a ConfigNode {
    node.get(segment).unwrap_or(&ABSENT)
}

/// Navigate to the child named `segment` for writing.
///
/// A node that is not a map is replaced by an empty map first, so the child
/// always exists afterwards and starts out absent.
pub fn child_mut<'a>(node: &'a mut ConfigNode, segment: &str) -> &'a mut ConfigNode {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    &mut node[segment]
}

/// Replace the value held by `node`.
pub fn set(node: &mut ConfigNode, value: impl Into<ConfigNode>) {
    *node = value.into();
}

/// Deserialize every element of the list at `field` with `deserializer`.
///
/// An absent field reads as an empty list.
///
/// # Errors
///
/// Returns [`TroveError::Deserialization`] when the field is not a list, or the
/// first error reported by `deserializer`.
pub fn deserialize_list<V, D>(
    node: &ConfigNode,
    field: &str,
    deserializer: &D,
    context: &ConversionContext,
) -> TroveResult<Vec<V>>
where
    D: Deserializer<V> + ?Sized,
{
    match child(node, field) {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| deserializer.deserialize(item, context))
            .collect(),
        _ => Err(TroveError::deserialization(field, "expected a list")),
    }
}

/// Serialize `values` into a list node with `serializer`.
///
/// # Errors
///
/// Returns the first error reported by `serializer`.
pub fn serialize_list<V, S>(
    values: &[V],
    serializer: &S,
    context: &ConversionContext,
) -> TroveResult<ConfigNode>
where
    S: Serializer<V> + ?Sized,
{
    values
        .iter()
        .map(|value| serializer.serialize(value, context))
        .collect::<TroveResult<Vec<_>>>()
        .map(Value::Array)
}

#[cfg(test)]
mod tests;
