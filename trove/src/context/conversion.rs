//! Context threaded through serialization and deserialization.

use std::{any::Any, sync::Arc};

use super::{Facts, Information, Key, KeyedContext};
use crate::Trove;

/// Facts plus the [`Trove`] nested converters resolve through.
///
/// The default context has no facts and an empty trove.
#[derive(Clone, Debug, Default)]
pub struct ConversionContext {
    information: Information,
    trove: Arc<Trove>,
}

impl ConversionContext {
    /// Start building a conversion context.
    #[must_use]
    pub fn builder() -> ConversionContextBuilder {
        ConversionContextBuilder::default()
    }

    /// The trove used to find converters for nested values.
    #[must_use]
    pub fn trove(&self) -> &Trove {
        &self.trove
    }
}

impl KeyedContext for ConversionContext {
    fn information(&self) -> &Information {
        &self.information
    }
}

/// Builder for [`ConversionContext`].
#[derive(Default)]
pub struct ConversionContextBuilder {
    facts: Facts,
    trove: Arc<Trove>,
}

impl ConversionContextBuilder {
    /// Store `value` under `key`, replacing any fact with the same name.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, key: &Key<T>, value: T) -> Self {
        self.facts.insert(key, value);
        self
    }

    /// Resolve nested converters through `trove`.
    #[must_use]
    pub fn trove(mut self, trove: impl Into<Arc<Trove>>) -> Self {
        self.trove = trove.into();
        self
    }

    /// Finish the context.
    #[must_use]
    pub fn build(self) -> ConversionContext {
        ConversionContext {
            information: self.facts.into_information(),
            trove: self.trove,
        }
    }
}
