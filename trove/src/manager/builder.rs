//! Builder assembling and validating a [`ConversionManager`].

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use tracing::{debug, warn};

use super::{ConversionManager, InitialConverter, erased};
use crate::{
    AsAny, ConditionalConverter, KeyedConverter, Subtype, TroveError, TroveResult, TypeTag,
};

/// Accumulates converters for a [`ConversionManager`].
///
/// Registering a converter for a type that is not a [`Subtype`] of the base
/// does not compile:
///
/// ```compile_fail
/// use trove::{AsAny, ConversionManager, KeyedConverter, additive, deserializer};
///
/// trait Shape: AsAny {}
///
/// // `u8` never declared itself a `Subtype<dyn Shape>`.
/// let stray = KeyedConverter::join(
///     "stray",
///     additive(|_: &u8, _: &mut serde_json::Value, _: &trove::ConversionContext| Ok(())),
///     deserializer(|_: &serde_json::Value, _: &trove::ConversionContext| Ok(0_u8)),
/// );
/// let _ = ConversionManager::<dyn Shape>::builder().add_converter(stray);
/// ```
pub struct ConversionManagerBuilder<B: ?Sized + AsAny> {
    key_location: Option<String>,
    initial: Vec<InitialConverter<B>>,
    keyed: Vec<Arc<dyn erased::ErasedKeyed<B>>>,
}

impl<B: ?Sized + AsAny> ConversionManagerBuilder<B> {
    pub(super) fn new() -> Self {
        Self {
            key_location: None,
            initial: Vec::new(),
            keyed: Vec::new(),
        }
    }

    /// Field that holds the discriminator in serialized nodes.
    #[must_use]
    pub fn key_location(mut self, location: impl Into<String>) -> Self {
        self.key_location = Some(location.into());
        self
    }

    /// Register a keyed converter for the subtype `V`.
    #[must_use]
    pub fn add_converter<V: Subtype<B>>(mut self, converter: KeyedConverter<V>) -> Self {
        self.keyed.push(erased::erase(converter));
        self
    }

    /// Append a converter tried before the keyed protocol.
    #[must_use]
    pub fn add_initial_converter<C>(mut self, converter: C) -> Self
    where
        C: ConditionalConverter<Box<B>> + 'static,
    {
        self.initial.push(Arc::new(converter));
        self
    }

    /// Validate the registrations and build the manager.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::MissingBuilderField`] when no key location was
    /// set and [`TroveError::EmptyKeyLocation`] when it is empty. Duplicate
    /// keys and duplicate converted types are all reported together, as
    /// [`TroveError::Aggregate`] when there is more than one.
    pub fn build(self) -> TroveResult<ConversionManager<B>> {
        let base_type = TypeTag::of::<B>();
        let key_location = self.key_location.ok_or_else(|| {
            Arc::new(TroveError::MissingBuilderField {
                builder: "ConversionManager",
                field: "key_location",
            })
        })?;
        if key_location.is_empty() {
            return Err(Arc::new(TroveError::EmptyKeyLocation {
                base: base_type.name(),
            }));
        }

        let mut errors = Vec::new();
        let mut by_key = HashMap::with_capacity(self.keyed.len());
        let mut by_type = HashMap::with_capacity(self.keyed.len());
        for converter in self.keyed {
            if by_key.contains_key(converter.key()) {
                warn!(base = base_type.name(), key = converter.key(), "duplicate key");
                errors.push(TroveError::DuplicateKey {
                    key: converter.key().to_owned(),
                    base: base_type.name(),
                });
                continue;
            }
            match by_type.entry(converter.converted_type()) {
                Entry::Occupied(_) => {
                    let type_name = converter.converted_type().name();
                    warn!(base = base_type.name(), type_name, "duplicate converted type");
                    errors.push(TroveError::DuplicateType {
                        type_name,
                        base: base_type.name(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(&converter));
                    by_key.insert(converter.key().to_owned(), converter);
                }
            }
        }
        if let Some(err) = TroveError::try_aggregate(errors) {
            return Err(Arc::new(err));
        }

        debug!(
            base = base_type.name(),
            key_location = key_location.as_str(),
            keyed = by_key.len(),
            initial = self.initial.len(),
            "built conversion manager"
        );
        Ok(ConversionManager {
            base_type,
            key_location,
            initial: self.initial,
            by_key,
            by_type,
        })
    }
}
