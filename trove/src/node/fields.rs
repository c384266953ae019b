//! Typed field access on map nodes.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ConfigNode, child};
use crate::{TroveError, TroveResult};

/// The child at `field`, which must hold a value.
///
/// # Errors
///
/// Returns [`TroveError::MissingField`] when the child is absent.
pub fn require<'a>(node: &'a ConfigNode, field: &str) -> TroveResult<&'a ConfigNode> {
    match child(node, field) {
        Value::Null => Err(TroveError::missing_field(field)),
        value => Ok(value),
    }
}

/// The string at `field`.
///
/// # Errors
///
/// Fails when the field is absent or not a string.
pub fn require_str<'a>(node: &'a ConfigNode, field: &str) -> TroveResult<&'a str> {
    require(node, field)?
        .as_str()
        .ok_or_else(|| TroveError::deserialization(field, "expected a string"))
}

/// The number at `field`, as a float.
///
/// # Errors
///
/// Fails when the field is absent or not a number.
pub fn require_f64(node: &ConfigNode, field: &str) -> TroveResult<f64> {
    require(node, field)?
        .as_f64()
        .ok_or_else(|| TroveError::deserialization(field, "expected a number"))
}

/// The integer at `field`.
///
/// # Errors
///
/// Fails when the field is absent or not an integer.
pub fn require_i64(node: &ConfigNode, field: &str) -> TroveResult<i64> {
    require(node, field)?
        .as_i64()
        .ok_or_else(|| TroveError::deserialization(field, "expected an integer"))
}

/// The number at `field` as a float, or `default` when the field is absent.
///
/// # Errors
///
/// Fails when the field is present but not a number.
pub fn optional_f64(node: &ConfigNode, field: &str, default: f64) -> TroveResult<f64> {
    match child(node, field) {
        Value::Null => Ok(default),
        value => value
            .as_f64()
            .ok_or_else(|| TroveError::deserialization(field, "expected a number")),
    }
}

/// The integer at `field`, or `default` when the field is absent.
///
/// # Errors
///
/// Fails when the field is present but not an integer.
pub fn optional_i64(node: &ConfigNode, field: &str, default: i64) -> TroveResult<i64> {
    match child(node, field) {
        Value::Null => Ok(default),
        value => value
            .as_i64()
            .ok_or_else(|| TroveError::deserialization(field, "expected an integer")),
    }
}

/// The boolean at `field`, or `default` when the field is absent.
///
/// # Errors
///
/// Fails when the field is present but not a boolean.
pub fn optional_bool(node: &ConfigNode, field: &str, default: bool) -> TroveResult<bool> {
    match child(node, field) {
        Value::Null => Ok(default),
        value => value
            .as_bool()
            .ok_or_else(|| TroveError::deserialization(field, "expected a boolean")),
    }
}

/// Deserialize the value at `field` with serde.
///
/// # Errors
///
/// Fails when the field is absent or does not match `T`.
pub fn field<T: DeserializeOwned>(node: &ConfigNode, field: &str) -> TroveResult<T> {
    T::deserialize(require(node, field)?)
        .map_err(|e| TroveError::deserialization(field, e.to_string()))
}

/// The discriminator stored at `location`.
///
/// Numbers and booleans are coerced to their string form.
///
/// # Errors
///
/// Returns [`TroveError::MissingField`] when no discriminator is present and
/// [`TroveError::Deserialization`] when it is a map or a list.
pub fn discriminator<'a>(node: &'a ConfigNode, location: &str) -> TroveResult<Cow<'a, str>> {
    match require(node, location)? {
        Value::String(key) => Ok(Cow::Borrowed(key.as_str())),
        scalar @ (Value::Number(_) | Value::Bool(_)) => Ok(Cow::Owned(scalar.to_string())),
        _ => Err(TroveError::deserialization(
            location,
            "expected a scalar discriminator",
        )),
    }
}
