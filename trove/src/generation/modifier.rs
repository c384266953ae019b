//! Item modifiers.

use std::{any::Any, fmt, marker::PhantomData};

use super::{Batch, LootCondition, LootItem, condition};
use crate::{AsAny, GenerationContext, Subtype, TypeTag};

/// Transforms generated items.
pub trait LootModifier: AsAny + fmt::Debug {
    /// Transform `input`; `None` drops the item.
    fn modify(&self, input: LootItem, context: &GenerationContext) -> Option<LootItem>;
}

impl<M: LootModifier> Subtype<dyn LootModifier> for M {
    fn upcast(self) -> Box<dyn LootModifier> {
        Box::new(self)
    }
}

impl<M: LootModifier + ?Sized> LootModifier for Box<M> {
    fn modify(&self, input: LootItem, context: &GenerationContext) -> Option<LootItem> {
        (**self).modify(input, context)
    }
}

/// Thread `input` through `modifiers` in order, each seeing the previous
/// output. Stops early once an item is dropped.
#[must_use]
pub fn apply<M: LootModifier>(
    modifiers: &[M],
    input: LootItem,
    context: &GenerationContext,
) -> Option<LootItem> {
    modifiers
        .iter()
        .try_fold(input, |item, modifier| modifier.modify(item, context))
}

/// Apply `modifiers` to every item of `batch`.
#[must_use]
pub fn apply_batch<M: LootModifier>(
    modifiers: &[M],
    batch: &Batch,
    context: &GenerationContext,
) -> Batch {
    if modifiers.is_empty() {
        return batch.clone();
    }
    batch
        .iter()
        .filter_map(|item| apply(modifiers, item.clone(), context))
        .collect()
}

/// A modifier for values of one type.
///
/// Implementors describe only the typed transform; [`filter`] supplies the
/// pass-through for every other item, so a [`LootModifier`] impl can be a
/// one-line delegation.
pub trait TypedModifier: Send + Sync {
    /// The type this modifier transforms.
    type Input: Any;

    /// Transform `input`; `None` drops the item.
    fn modify_typed(&self, input: &Self::Input, context: &GenerationContext) -> Option<LootItem>;
}

/// Run `modifier` on `input` when it holds a [`TypedModifier::Input`],
/// passing any other item through unchanged.
#[must_use]
pub fn filter<M: TypedModifier + ?Sized>(
    modifier: &M,
    input: LootItem,
    context: &GenerationContext,
) -> Option<LootItem> {
    match input.downcast_ref::<M::Input>() {
        Some(value) => modifier.modify_typed(value, context),
        None => Some(input),
    }
}

/// Run `modify` on `input` when every condition verifies, passing it through
/// unchanged otherwise.
#[must_use]
pub fn gate<C, F>(
    conditions: &[C],
    input: LootItem,
    context: &GenerationContext,
    modify: F,
) -> Option<LootItem>
where
    C: LootCondition,
    F: FnOnce(LootItem) -> Option<LootItem>,
{
    if condition::all(conditions, context) {
        modify(input)
    } else {
        Some(input)
    }
}

/// Applies a typed transform to items of type `T` only.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use trove::{Filtered, GenerationContext, LootItem, LootModifier};
///
/// let context = GenerationContext::builder().random(StdRng::seed_from_u64(0)).build()?;
/// let double = Filtered::new(|n: &i32, _: &GenerationContext| Some(LootItem::new(n * 2)));
/// let item = double.modify(LootItem::new(4), &context);
/// assert_eq!(item.as_ref().and_then(LootItem::downcast_ref::<i32>), Some(&8));
/// let passed = double.modify(LootItem::new("s"), &context);
/// assert_eq!(passed.as_ref().and_then(LootItem::downcast_ref::<&str>), Some(&"s"));
/// # Ok::<(), std::sync::Arc<trove::TroveError>>(())
/// ```
pub struct Filtered<T, F> {
    transform: F,
    marker: PhantomData<fn(&T)>,
}

impl<T: Any, F> Filtered<T, F> {
    /// Wrap `transform`.
    #[must_use]
    pub const fn new(transform: F) -> Self
    where
        F: Fn(&T, &GenerationContext) -> Option<LootItem>,
    {
        Self {
            transform,
            marker: PhantomData,
        }
    }

    /// Descriptor of the type this modifier transforms.
    #[must_use]
    pub fn filtered_type(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

impl<T, F> TypedModifier for Filtered<T, F>
where
    T: Any,
    F: Fn(&T, &GenerationContext) -> Option<LootItem> + Send + Sync,
{
    type Input = T;

    fn modify_typed(&self, input: &T, context: &GenerationContext) -> Option<LootItem> {
        (self.transform)(input, context)
    }
}

impl<T, F> LootModifier for Filtered<T, F>
where
    T: Any,
    F: Fn(&T, &GenerationContext) -> Option<LootItem> + Send + Sync + 'static,
{
    fn modify(&self, input: LootItem, context: &GenerationContext) -> Option<LootItem> {
        filter(self, input, context)
    }
}

impl<T: Any, F> fmt::Debug for Filtered<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filtered")
            .field("type", &self.filtered_type())
            .finish_non_exhaustive()
    }
}

/// Runs a modifier only when every condition verifies.
#[derive(Debug)]
pub struct Gated<C, M> {
    conditions: Vec<C>,
    modifier: M,
}

impl<C: LootCondition, M: LootModifier> Gated<C, M> {
    /// Gate `modifier` behind `conditions`.
    #[must_use]
    pub const fn new(conditions: Vec<C>, modifier: M) -> Self {
        Self {
            conditions,
            modifier,
        }
    }
}

impl<C: LootCondition, M: LootModifier> LootModifier for Gated<C, M> {
    fn modify(&self, input: LootItem, context: &GenerationContext) -> Option<LootItem> {
        gate(&self.conditions, input, context, |item| {
            self.modifier.modify(item, context)
        })
    }
}
