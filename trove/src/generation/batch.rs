//! Immutable ordered collections of generated items.

use std::{any::Any, slice};

use super::LootItem;

/// An ordered, immutable sequence of items.
///
/// Operations return new batches and never change the receiver.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    items: Vec<LootItem>,
}

impl Batch {
    /// A batch with no items.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// A batch holding a single item.
    #[must_use]
    pub fn of(item: LootItem) -> Self {
        Self { items: vec![item] }
    }

    /// Map every item of type `T` through `mapper`.
    ///
    /// Items of other types pass through unchanged, items mapped to `None`
    /// are dropped, and the order of surviving items is preserved.
    ///
    /// ```
    /// use trove::{Batch, LootItem};
    ///
    /// let batch: Batch = [LootItem::new(1), LootItem::new("s"), LootItem::new(-1)]
    ///     .into_iter()
    ///     .collect();
    /// let doubled = batch.modify::<i32, _>(|n| (*n > 0).then(|| LootItem::new(n * 2)));
    /// assert_eq!(doubled.len(), 2);
    /// assert_eq!(doubled.items()[0].downcast_ref::<i32>(), Some(&2));
    /// assert_eq!(batch.len(), 3);
    /// ```
    #[must_use]
    pub fn modify<T, F>(&self, mut mapper: F) -> Self
    where
        T: Any,
        F: FnMut(&T) -> Option<LootItem>,
    {
        self.items
            .iter()
            .filter_map(|item| match item.downcast_ref::<T>() {
                Some(value) => mapper(value),
                None => Some(item.clone()),
            })
            .collect()
    }

    /// A new batch holding this batch's items followed by `other`'s.
    #[must_use]
    pub fn extend(&self, other: &Self) -> Self {
        self.items.iter().chain(&other.items).cloned().collect()
    }

    /// The items, in order.
    #[must_use]
    pub fn items(&self) -> &[LootItem] {
        &self.items
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> slice::Iter<'_, LootItem> {
        self.items.iter()
    }

    /// Number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the batch holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<LootItem> for Batch {
    fn from_iter<I: IntoIterator<Item = LootItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a LootItem;
    type IntoIter = slice::Iter<'a, LootItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Batch {
    type Item = LootItem;
    type IntoIter = std::vec::IntoIter<LootItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
