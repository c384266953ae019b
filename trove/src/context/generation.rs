//! Context threaded through loot generation.

use std::{any::Any, fmt, sync::Arc};

use parking_lot::{Mutex, MutexGuard};
use rand::RngCore;

use super::{Facts, Information, Key, KeyedContext};
use crate::{TroveError, TroveResult};

/// Random number generator owned by a [`GenerationContext`].
pub type RandomSource = Box<dyn RngCore + Send>;

/// Facts plus the random source generators draw from.
///
/// Draws are serialised through a mutex, so a context can be shared between
/// threads, but one context per generation request keeps results
/// reproducible.
pub struct GenerationContext {
    information: Information,
    random: Mutex<RandomSource>,
}

impl GenerationContext {
    /// Start building a generation context.
    #[must_use]
    pub fn builder() -> GenerationContextBuilder {
        GenerationContextBuilder::default()
    }

    /// Lock the random source.
    ///
    /// The guard must be released before anything else draws from this
    /// context; keep it to a single expression.
    ///
    /// ```
    /// use rand::{Rng, SeedableRng, rngs::StdRng};
    /// use trove::GenerationContext;
    ///
    /// let context = GenerationContext::builder()
    ///     .random(StdRng::seed_from_u64(7))
    ///     .build()?;
    /// let roll = context.random().gen_range(1..=6);
    /// assert!((1..=6).contains(&roll));
    /// # Ok::<(), std::sync::Arc<trove::TroveError>>(())
    /// ```
    pub fn random(&self) -> MutexGuard<'_, RandomSource> {
        self.random.lock()
    }
}

impl KeyedContext for GenerationContext {
    fn information(&self) -> &Information {
        &self.information
    }
}

impl fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("information", &self.information)
            .finish_non_exhaustive()
    }
}

/// Builder for [`GenerationContext`].
#[derive(Default)]
pub struct GenerationContextBuilder {
    facts: Facts,
    random: Option<RandomSource>,
}

impl GenerationContextBuilder {
    /// Store `value` under `key`, replacing any fact with the same name.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, key: &Key<T>, value: T) -> Self {
        self.facts.insert(key, value);
        self
    }

    /// Use `random` as the context's random source.
    #[must_use]
    pub fn random(mut self, random: impl RngCore + Send + 'static) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    /// Finish the context.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::MissingBuilderField`] when no random source was
    /// supplied.
    pub fn build(self) -> TroveResult<GenerationContext> {
        let random = self.random.ok_or_else(|| {
            Arc::new(TroveError::MissingBuilderField {
                builder: "GenerationContext",
                field: "random",
            })
        })?;
        Ok(GenerationContext {
            information: self.facts.into_information(),
            random: Mutex::new(random),
        })
    }
}
