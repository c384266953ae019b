//! Converters registered under a discriminator key.

use std::{any::Any, fmt, sync::Arc};

use super::{AdditiveConverter, AdditiveSerializer, Deserializer, join};
use crate::{ConfigNode, ConversionContext, TroveResult, TypeTag};

/// A converter for one concrete type, registered under one discriminator key.
///
/// The converted type is recorded as a [`TypeTag`] of `V`, which a
/// [`ConversionManager`](crate::ConversionManager) uses to find the converter
/// for a value's runtime type.
pub struct KeyedConverter<V> {
    key: String,
    converted_type: TypeTag,
    converter: Arc<dyn AdditiveConverter<V>>,
}

impl<V: Any + Send + Sync> KeyedConverter<V> {
    /// Register `converter` under `key`.
    #[must_use]
    pub fn new<C>(key: impl Into<String>, converter: C) -> Self
    where
        C: AdditiveConverter<V> + 'static,
    {
        Self {
            key: key.into(),
            converted_type: TypeTag::of::<V>(),
            converter: Arc::new(converter),
        }
    }

    /// Register a separate serializer and deserializer under `key`.
    #[must_use]
    pub fn join<S, D>(key: impl Into<String>, serializer: S, deserializer: D) -> Self
    where
        S: AdditiveSerializer<V> + 'static,
        D: Deserializer<V> + 'static,
    {
        Self::new(key, join(serializer, deserializer))
    }
}

impl<V> KeyedConverter<V> {
    /// The discriminator value this converter answers to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Descriptor of the converted type.
    #[must_use]
    pub const fn converted_type(&self) -> TypeTag {
        self.converted_type
    }
}

impl<V> Clone for KeyedConverter<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            converted_type: self.converted_type,
            converter: Arc::clone(&self.converter),
        }
    }
}

impl<V> fmt::Debug for KeyedConverter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedConverter")
            .field("key", &self.key)
            .field("converted_type", &self.converted_type)
            .finish_non_exhaustive()
    }
}

impl<V> AdditiveSerializer<V> for KeyedConverter<V> {
    fn serialize_onto(
        &self,
        input: &V,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()> {
        self.converter.serialize_onto(input, result, context)
    }
}

impl<V> Deserializer<V> for KeyedConverter<V> {
    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<V> {
        self.converter.deserialize(node, context)
    }
}
