//! Polymorphic conversion keyed by a discriminator field.
//!
//! A [`ConversionManager`] converts boxed values of a base trait `B`. Each
//! concrete subtype registers a [`KeyedConverter`](crate::KeyedConverter)
//! under a discriminator key; serialized nodes are maps carrying that key at
//! the manager's key location alongside the subtype's own fields. Initial
//! converters are tried first, in registration order, and the first one whose
//! predicate accepts the input handles it.

mod builder;
mod erased;

pub use builder::ConversionManagerBuilder;

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::trace;

use self::erased::ErasedKeyed;
use crate::{
    AdditiveSerializer, AsAny, ConditionalConverter, ConfigNode, ConversionContext, Deserializer,
    TroveError, TroveResult, TypeTag, node,
};

/// Shared initial converter for values of base `B`.
pub type InitialConverter<B> = Arc<dyn ConditionalConverter<Box<B>>>;

/// Validated dispatch table converting `Box<B>` values.
///
/// Managers are built once through [`ConversionManager::builder`] and are
/// immutable afterwards.
pub struct ConversionManager<B: ?Sized + AsAny> {
    base_type: TypeTag,
    key_location: String,
    initial: Vec<InitialConverter<B>>,
    by_key: HashMap<String, Arc<dyn ErasedKeyed<B>>>,
    by_type: HashMap<TypeTag, Arc<dyn ErasedKeyed<B>>>,
}

impl<B: ?Sized + AsAny> ConversionManager<B> {
    /// Start building a manager for base `B`.
    #[must_use]
    pub fn builder() -> ConversionManagerBuilder<B> {
        ConversionManagerBuilder::new()
    }

    /// Descriptor of the base type.
    #[must_use]
    pub const fn base_type(&self) -> TypeTag {
        self.base_type
    }

    /// Field holding the discriminator in serialized nodes.
    #[must_use]
    pub fn key_location(&self) -> &str {
        &self.key_location
    }

    /// Whether a keyed converter answers to `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// The discriminator registered for concrete type `tag`.
    #[must_use]
    pub fn key_for(&self, tag: TypeTag) -> Option<&str> {
        self.by_type.get(&tag).map(|converter| converter.key())
    }
}

impl<B: ?Sized + AsAny> Deserializer<Box<B>> for ConversionManager<B> {
    fn deserialize(&self, node: &ConfigNode, context: &ConversionContext) -> TroveResult<Box<B>> {
        if let Some(initial) = self
            .initial
            .iter()
            .find(|converter| converter.can_deserialize(node, context))
        {
            trace!(base = self.base_type.name(), "initial converter accepted node");
            return initial.deserialize(node, context);
        }
        let key = node::discriminator(node, &self.key_location)?;
        let converter = self.by_key.get(key.as_ref()).ok_or_else(|| {
            Arc::new(TroveError::UnknownKey {
                key: key.to_string(),
                base: self.base_type.name(),
            })
        })?;
        trace!(base = self.base_type.name(), key = %key, "deserializing keyed value");
        converter.deserialize(node, context)
    }
}

impl<B: ?Sized + AsAny> AdditiveSerializer<Box<B>> for ConversionManager<B> {
    fn serialize_onto(
        &self,
        input: &Box<B>,
        result: &mut ConfigNode,
        context: &ConversionContext,
    ) -> TroveResult<()> {
        if let Some(initial) = self
            .initial
            .iter()
            .find(|converter| converter.can_serialize(input, context))
        {
            trace!(base = self.base_type.name(), "initial converter accepted value");
            return initial.serialize_onto(input, result, context);
        }
        let value: &B = input;
        let runtime_type = <B as AsAny>::type_tag(value);
        let converter = self.by_type.get(&runtime_type).ok_or_else(|| {
            Arc::new(TroveError::UnknownType {
                type_name: runtime_type.name(),
                base: self.base_type.name(),
            })
        })?;
        trace!(
            base = self.base_type.name(),
            key = converter.key(),
            "serializing keyed value"
        );
        converter.serialize_onto(value, result, context)?;
        node::set(
            node::child_mut(result, &self.key_location),
            converter.key(),
        );
        Ok(())
    }
}

impl<B: ?Sized + AsAny> fmt::Debug for ConversionManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.by_key.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ConversionManager")
            .field("base_type", &self.base_type)
            .field("key_location", &self.key_location)
            .field("initial", &self.initial.len())
            .field("keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests;
