//! Type-erased keyed converters stored by a manager.

use std::sync::Arc;

use crate::{
    AdditiveSerializer, AsAny, ConfigNode, ConversionContext, Deserializer, KeyedConverter,
    Subtype, TroveError, TroveResult, TypeTag,
};

/// A keyed converter for some subtype of `B`, seen through the base.
pub(super) trait ErasedKeyed<B: ?Sized>: Send + Sync {
    fn key(&self) -> &str;

    fn converted_type(&self) -> TypeTag;

    fn serialize_onto(
        &self,
        input: &B,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()>;

    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<Box<B>>;
}

struct Registered<V>(KeyedConverter<V>);

pub(super) fn erase<B, V>(converter: KeyedConverter<V>) -> Arc<dyn ErasedKeyed<B>>
where
    B: ?Sized + AsAny,
    V: Subtype<B>,
{
    Arc::new(Registered(converter))
}

impl<B, V> ErasedKeyed<B> for Registered<V>
where
    B: ?Sized + AsAny,
    V: Subtype<B>,
{
    fn key(&self) -> &str {
        self.0.key()
    }

    fn converted_type(&self) -> TypeTag {
        self.0.converted_type()
    }

    fn serialize_onto(
        &self,
        input: &B,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()> {
        let value = <B as AsAny>::as_any(input)
            .downcast_ref::<V>()
            .ok_or_else(|| {
                Arc::new(TroveError::UnknownType {
                    type_name: <B as AsAny>::type_tag(input).name(),
                    base: std::any::type_name::<B>(),
                })
            })?;
        self.0.serialize_onto(value, result, context)
    }

    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<Box<B>> {
        self.0.deserialize(node, context).map(Subtype::upcast)
    }
}
