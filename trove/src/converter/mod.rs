//! Serializer, deserializer, and converter traits.
//!
//! The family is small: a [`Deserializer`] builds a value from a node, an
//! [`AdditiveSerializer`] writes a value onto an existing node, and every
//! additive serializer is a plain [`Serializer`] that starts from a fresh node.
//! [`Converter`] and [`AdditiveConverter`] join both directions, and a
//! [`ConditionalConverter`] adds predicates a caller checks before using it.
//!
//! Closures become converters through [`serializer`], [`additive`],
//! [`deserializer`], [`join`], and [`conditional`]. None of these check that
//! the two halves are inverses of each other.

mod compose;
mod keyed;

pub use compose::{
    Conditional, FnAdditive, FnDeserializer, FnSerializer, Joined, additive, conditional,
    deserializer, join, serializer,
};
pub use keyed::KeyedConverter;

use crate::{ConfigNode, ConversionContext, TroveResult, node};

/// Writes values onto nodes that may already hold content.
pub trait AdditiveSerializer<V: ?Sized>: Send + Sync {
    /// Write `input` onto `result`.
    ///
    /// # Errors
    ///
    /// Fails when a nested value cannot be serialized.
    fn serialize_onto(
        &self,
        input: &V,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()>;
}

/// Turns values into nodes.
///
/// Implemented for every [`AdditiveSerializer`].
pub trait Serializer<V: ?Sized>: Send + Sync {
    /// Serialize `input` into a new node, which may be absent.
    ///
    /// # Errors
    ///
    /// Fails when a nested value cannot be serialized.
    fn serialize(&self, input: &V, context: &ConversionContext) -> TroveResult<ConfigNode>;
}

impl<V, S> Serializer<V> for S
where
    V: ?Sized,
    S: AdditiveSerializer<V> + ?Sized,
{
    fn serialize(&self, input: &V, context: &ConversionContext) -> TroveResult<ConfigNode> {
        let mut result = node::empty();
        self.serialize_onto(input, &mut result, context)?;
        Ok(result)
    }
}

/// Builds values from nodes.
pub trait Deserializer<V>: Send + Sync {
    /// Deserialize a value from `node`.
    ///
    /// # Errors
    ///
    /// Fails with a deserialization error when the node does not have the
    /// expected shape.
    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<V>;
}

/// Both directions of conversion.
pub trait Converter<V>: Serializer<V> + Deserializer<V> {}

impl<V, C> Converter<V> for C where C: Serializer<V> + Deserializer<V> + ?Sized {}

/// Both directions of conversion, serializing additively.
pub trait AdditiveConverter<V>: AdditiveSerializer<V> + Deserializer<V> {}

impl<V, C> AdditiveConverter<V> for C where C: AdditiveSerializer<V> + Deserializer<V> + ?Sized {}

/// A converter that handles only some inputs.
///
/// Callers check [`can_serialize`](Self::can_serialize) or
/// [`can_deserialize`](Self::can_deserialize) first; the conversion methods
/// make no promises for inputs the matching predicate rejects.
pub trait ConditionalConverter<V>: AdditiveConverter<V> {
    /// Whether this converter serializes `input`.
    fn can_serialize(&self, input: &V, context: &ConversionContext) -> bool;

    /// Whether this converter deserializes `node`.
    fn can_deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> bool;
}

#[cfg(test)]
mod tests;
