//! Product types assembling converters from closures and halves.

use super::{AdditiveSerializer, ConditionalConverter, Deserializer};
use crate::{ConfigNode, ConversionContext, TroveResult};

/// Serializer backed by a closure that returns a whole node.
///
/// Used additively, the closure's node replaces whatever `result` held.
#[derive(Clone, Copy, Debug)]
pub struct FnSerializer<F>(F);

/// Additive serializer backed by a closure.
#[derive(Clone, Copy, Debug)]
pub struct FnAdditive<F>(F);

/// Deserializer backed by a closure.
#[derive(Clone, Copy, Debug)]
pub struct FnDeserializer<F>(F);

/// Wrap a node-producing closure as a serializer.
#[must_use]
pub const fn serializer<V, F>(f: F) -> FnSerializer<F>
where
    V: ?Sized,
    F: Fn(&V, &ConversionContext) -> TroveResult<ConfigNode> + Send + Sync,
{
    FnSerializer(f)
}

/// Wrap a node-writing closure as an additive serializer.
#[must_use]
pub const fn additive<V, F>(f: F) -> FnAdditive<F>
where
    V: ?Sized,
    F: Fn(&V, &mut ConfigNode, &ConversionContext) -> TroveResult<()> + Send + Sync,
{
    FnAdditive(f)
}

/// Wrap a closure as a deserializer.
#[must_use]
pub const fn deserializer<V, F>(f: F) -> FnDeserializer<F>
where
    F: Fn(&ConfigNode, &ConversionContext) -> TroveResult<V> + Send + Sync,
{
    FnDeserializer(f)
}

impl<V, F> AdditiveSerializer<V> for FnSerializer<F>
where
    V: ?Sized,
    F: Fn(&V, &ConversionContext) -> TroveResult<ConfigNode> + Send + Sync,
{
    fn serialize_onto(
        &self,
        input: &V,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()> {
        *result = (self.0)(input, context)?;
        Ok(())
    }
}

impl<V, F> AdditiveSerializer<V> for FnAdditive<F>
where
    V: ?Sized,
    F: Fn(&V, &mut ConfigNode, &ConversionContext) -> TroveResult<()> + Send + Sync,
{
    fn serialize_onto(
        &self,
        input: &V,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()> {
        (self.0)(input, result, context)
    }
}

impl<V, F> Deserializer<V> for FnDeserializer<F>
where
    F: Fn(&ConfigNode, &ConversionContext) -> TroveResult<V> + Send + Sync,
{
    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<V> {
        (self.0)(node, context)
    }
}

/// A serializer and a deserializer used side by side.
#[derive(Clone, Copy, Debug)]
pub struct Joined<S, D> {
    serializer: S,
    deserializer: D,
}

/// Join two halves into one converter. Each direction delegates to its own
/// half.
///
/// ```
/// use serde_json::json;
/// use trove::{ConversionContext, Deserializer, Serializer, additive, deserializer, join};
///
/// let doubled = join(
///     additive(|value: &u32, node: &mut serde_json::Value, _: &ConversionContext| {
///         *node = json!(value * 2);
///         Ok(())
///     }),
///     deserializer(|node: &serde_json::Value, _: &ConversionContext| {
///         Ok(node.as_u64().map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)))
///     }),
/// );
/// let context = ConversionContext::default();
/// assert_eq!(Serializer::<u32>::serialize(&doubled, &4, &context)?, json!(8));
/// // The halves are independent: deserializing does not undo the doubling.
/// assert_eq!(Deserializer::<u32>::deserialize(&doubled, &json!(8), &context)?, 8);
/// # Ok::<(), std::sync::Arc<trove::TroveError>>(())
/// ```
#[must_use]
pub const fn join<S, D>(serializer: S, deserializer: D) -> Joined<S, D> {
    Joined {
        serializer,
        deserializer,
    }
}

impl<V, S, D> AdditiveSerializer<V> for Joined<S, D>
where
    S: AdditiveSerializer<V>,
    D: Send + Sync,
{
    fn serialize_onto(
        &self,
        input: &V,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()> {
        self.serializer.serialize_onto(input, result, context)
    }
}

impl<V, S, D> Deserializer<V> for Joined<S, D>
where
    S: Send + Sync,
    D: Deserializer<V>,
{
    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<V> {
        self.deserializer.deserialize(node, context)
    }
}

/// A converter paired with the predicates deciding when it applies.
#[derive(Clone, Copy, Debug)]
pub struct Conditional<C, PS, PD> {
    converter: C,
    can_serialize: PS,
    can_deserialize: PD,
}

/// Pair `converter` with applicability predicates for each direction.
#[must_use]
pub const fn conditional<V, C, PS, PD>(
    converter: C,
    can_serialize: PS,
    can_deserialize: PD,
) -> Conditional<C, PS, PD>
where
    C: AdditiveSerializer<V> + Deserializer<V>,
    PS: Fn(&V, &ConversionContext) -> bool + Send + Sync,
    PD: Fn(&ConfigNode, &ConversionContext) -> bool + Send + Sync,
{
    Conditional {
        converter,
        can_serialize,
        can_deserialize,
    }
}

impl<V, C, PS, PD> AdditiveSerializer<V> for Conditional<C, PS, PD>
where
    C: AdditiveSerializer<V>,
    PS: Send + Sync,
    PD: Send + Sync,
{
    fn serialize_onto(
        &self,
        input: &V,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()> {
        self.converter.serialize_onto(input, result, context)
    }
}

impl<V, C, PS, PD> Deserializer<V> for Conditional<C, PS, PD>
where
    C: Deserializer<V>,
    PS: Send + Sync,
    PD: Send + Sync,
{
    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<V> {
        self.converter.deserialize(node, context)
    }
}

impl<V, C, PS, PD> ConditionalConverter<V> for Conditional<C, PS, PD>
where
    C: AdditiveSerializer<V> + Deserializer<V>,
    PS: Fn(&V, &ConversionContext) -> bool + Send + Sync,
    PD: Fn(&ConfigNode, &ConversionContext) -> bool + Send + Sync,
{
    fn can_serialize(&self, input: &V, context: &ConversionContext) -> bool {
        (self.can_serialize)(input, context)
    }

    fn can_deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> bool {
        (self.can_deserialize)(node, context)
    }
}
