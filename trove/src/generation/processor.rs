//! First-match dispatch of generated items to handlers.

use std::{any::Any, fmt, sync::Arc};

use tracing::warn;

use super::{Batch, LootItem};
use crate::{TroveError, TroveResult};

type Predicate = Box<dyn Fn(&LootItem) -> bool + Send + Sync>;
type Consumer = Box<dyn Fn(&LootItem) + Send + Sync>;

/// Ordered `(predicate, consumer)` handlers; the first matching predicate wins.
pub struct LootProcessor {
    handlers: Vec<(Predicate, Consumer)>,
}

impl LootProcessor {
    /// Start building a processor.
    #[must_use]
    pub fn builder() -> LootProcessorBuilder {
        LootProcessorBuilder::default()
    }

    /// Hand `item` to the first handler whose predicate accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::UnhandledItem`] when no predicate accepts the
    /// item. Every type a generator can produce needs a handler, so this is a
    /// contract violation by the caller rather than a runtime condition.
    pub fn accept(&self, item: &LootItem) -> TroveResult<()> {
        let Some((_, consumer)) = self.handlers.iter().find(|(accepts, _)| accepts(item)) else {
            warn!(type_name = item.type_tag().name(), "unhandled loot item");
            return Err(Arc::new(TroveError::UnhandledItem {
                type_name: item.type_tag().name(),
            }));
        };
        consumer(item);
        Ok(())
    }

    /// Accept every item of `batch` in order, stopping at the first unhandled
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::UnhandledItem`] for the first item no handler
    /// accepts.
    pub fn accept_batch(&self, batch: &Batch) -> TroveResult<()> {
        batch.iter().try_for_each(|item| self.accept(item))
    }
}

impl fmt::Debug for LootProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LootProcessor")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Builder for [`LootProcessor`]; handlers are tried in the order added.
#[derive(Default)]
pub struct LootProcessorBuilder {
    handlers: Vec<(Predicate, Consumer)>,
}

impl LootProcessorBuilder {
    /// Add a handler for items matching `predicate`.
    #[must_use]
    pub fn process<P, C>(mut self, predicate: P, consumer: C) -> Self
    where
        P: Fn(&LootItem) -> bool + Send + Sync + 'static,
        C: Fn(&LootItem) + Send + Sync + 'static,
    {
        self.handlers.push((Box::new(predicate), Box::new(consumer)));
        self
    }

    /// Add a handler for items of type `T`.
    #[must_use]
    pub fn process_type<T, C>(self, consumer: C) -> Self
    where
        T: Any,
        C: Fn(&T) + Send + Sync + 'static,
    {
        self.process(LootItem::is::<T>, move |item: &LootItem| {
            if let Some(value) = item.downcast_ref::<T>() {
                consumer(value);
            }
        })
    }

    /// Finish the processor.
    #[must_use]
    pub fn build(self) -> LootProcessor {
        LootProcessor {
            handlers: self.handlers,
        }
    }
}
