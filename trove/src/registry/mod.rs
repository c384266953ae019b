//! Flat registry of converters indexed by exact type.
//!
//! A [`Trove`] answers "how do I convert a `V`?" for values whose type is known
//! statically. Lookups compare [`TypeTag`]s for equality; there is no
//! supertype search, so polymorphic values are registered as `Box<dyn Base>`
//! through their [`ConversionManager`].

use std::{
    any::Any,
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{AsAny, ConversionManager, Converter, TroveError, TroveResult, TypeTag};

type Stored = Arc<dyn Any + Send + Sync>;

/// Immutable map from type to converter.
#[derive(Clone, Default)]
pub struct Trove {
    converters: HashMap<TypeTag, Stored>,
}

impl Trove {
    /// Start building a trove.
    #[must_use]
    pub fn builder() -> TroveBuilder {
        TroveBuilder::default()
    }

    /// The converter registered for exactly `V`.
    #[must_use]
    pub fn get<V: 'static>(&self) -> Option<Arc<dyn Converter<V>>> {
        self.converters
            .get(&TypeTag::of::<V>())
            .and_then(|stored| stored.downcast_ref::<Arc<dyn Converter<V>>>())
            .cloned()
    }

    /// The converter registered for exactly `V`.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::MissingConverter`] when none is registered.
    pub fn require<V: 'static>(&self) -> TroveResult<Arc<dyn Converter<V>>> {
        self.get::<V>().ok_or_else(|| {
            Arc::new(TroveError::MissingConverter {
                type_name: std::any::type_name::<V>(),
            })
        })
    }

    /// Whether a converter is registered for `tag`.
    #[must_use]
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.converters.contains_key(&tag)
    }

    /// Descriptors of every registered type, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.converters.keys().copied()
    }

    /// Number of registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Whether no converters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for Trove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.types().map(|tag| tag.name()).collect();
        names.sort_unstable();
        f.debug_struct("Trove").field("types", &names).finish()
    }
}

/// Builder for [`Trove`].
#[derive(Default)]
pub struct TroveBuilder {
    converters: HashMap<TypeTag, Stored>,
}

impl TroveBuilder {
    /// Register `converter` for values of type `V`.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::DuplicateConverter`] when `V` already has one.
    pub fn add<V, C>(mut self, converter: C) -> TroveResult<Self>
    where
        V: 'static,
        C: Converter<V> + 'static,
    {
        let shared: Arc<dyn Converter<V>> = Arc::new(converter);
        let tag = TypeTag::of::<V>();
        match self.converters.entry(tag) {
            Entry::Occupied(_) => {
                warn!(type_name = tag.name(), "duplicate converter");
                Err(Arc::new(TroveError::DuplicateConverter {
                    type_name: tag.name(),
                }))
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(shared));
                Ok(self)
            }
        }
    }

    /// Register `manager` for boxed values of its base type.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::DuplicateConverter`] when `Box<B>` already has a
    /// converter.
    pub fn add_manager<B>(self, manager: ConversionManager<B>) -> TroveResult<Self>
    where
        B: ?Sized + AsAny,
    {
        self.add::<Box<B>, _>(manager)
    }

    /// Finish the trove.
    #[must_use]
    pub fn build(self) -> Trove {
        debug!(converters = self.converters.len(), "built trove");
        Trove {
            converters: self.converters,
        }
    }
}
