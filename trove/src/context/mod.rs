//! Immutable, type-safe ambient state for conversion and generation.
//!
//! Both context kinds carry a set of named facts. Facts are stored by name and
//! read back through a [`Key`], which also names the expected type: a lookup
//! succeeds only when the stored value has exactly that type. The
//! [`GenerationContext`] additionally owns the random source used while
//! generating loot, and the [`ConversionContext`] carries the [`Trove`] that
//! nested converters consult.
//!
//! [`Trove`]: crate::Trove

mod conversion;
mod generation;
mod key;

pub use conversion::{ConversionContext, ConversionContextBuilder};
pub use generation::{GenerationContext, GenerationContextBuilder, RandomSource};
pub use key::Key;

use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use crate::{TroveError, TroveResult};

type Fact = Arc<dyn Any + Send + Sync>;

/// Read-only map of named facts.
#[derive(Clone, Default)]
pub struct Information {
    facts: Arc<HashMap<String, Fact>>,
}

impl Information {
    fn from_facts(facts: HashMap<String, Fact>) -> Self {
        Self {
            facts: Arc::new(facts),
        }
    }

    /// The value stored under `key`, if its type matches.
    #[must_use]
    pub fn get<T: Any>(&self, key: &Key<T>) -> Option<&T> {
        self.facts
            .get(key.name())
            .and_then(|fact| fact.downcast_ref::<T>())
    }

    /// Whether any fact, of any type, is stored under `name`.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.facts.contains_key(name)
    }

    /// Names of every stored fact, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(String::as_str)
    }

    /// Number of stored facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether no facts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl fmt::Debug for Information {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}

/// Shared accessors for contexts carrying [`Information`].
///
/// Every accessor goes through [`KeyedContext::get`], so `has`, `get`,
/// `get_or`, and `assure` always agree.
pub trait KeyedContext {
    /// The context's facts.
    fn information(&self) -> &Information;

    /// The value stored under `key`, or `None` when it is missing or has a
    /// different type.
    fn get<T: Any>(&self, key: &Key<T>) -> Option<&T> {
        self.information().get(key)
    }

    /// Whether a value of the key's type is stored under its name.
    fn has<T: Any>(&self, key: &Key<T>) -> bool {
        self.get(key).is_some()
    }

    /// The value stored under `key`, or `default`.
    fn get_or<T: Any + Clone>(&self, key: &Key<T>, default: T) -> T {
        self.get(key).cloned().unwrap_or(default)
    }

    /// The value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::MissingContextValue`] when no value of the key's
    /// type is stored.
    fn assure<T: Any>(&self, key: &Key<T>) -> TroveResult<&T> {
        self.get(key).ok_or_else(|| {
            Arc::new(TroveError::MissingContextValue {
                name: key.name().to_owned(),
                type_name: std::any::type_name::<T>(),
            })
        })
    }
}

/// Accumulates facts for a context builder.
#[derive(Default)]
struct Facts(HashMap<String, Fact>);

impl Facts {
    fn insert<T: Any + Send + Sync>(&mut self, key: &Key<T>, value: T) {
        self.0.insert(key.name().to_owned(), Arc::new(value));
    }

    fn into_information(self) -> Information {
        Information::from_facts(self.0)
    }
}
