//! Boolean conditions over a generation context and their combinators.

use std::{fmt, sync::Arc};

use crate::{AsAny, GenerationContext, Subtype};

/// A predicate over a generation context.
pub trait LootCondition: AsAny + fmt::Debug {
    /// Whether the condition holds for `context`.
    fn verify(&self, context: &GenerationContext) -> bool;
}

impl<C: LootCondition> Subtype<dyn LootCondition> for C {
    fn upcast(self) -> Box<dyn LootCondition> {
        Box::new(self)
    }
}

impl LootCondition for bool {
    fn verify(&self, _context: &GenerationContext) -> bool {
        *self
    }
}

impl<C: LootCondition + ?Sized> LootCondition for Box<C> {
    fn verify(&self, context: &GenerationContext) -> bool {
        (**self).verify(context)
    }
}

impl<C: LootCondition + ?Sized> LootCondition for Arc<C> {
    fn verify(&self, context: &GenerationContext) -> bool {
        (**self).verify(context)
    }
}

/// A condition backed by a closure.
pub struct FnCondition<F>(F);

/// Wrap `f` as a condition.
#[must_use]
pub const fn from_fn<F>(f: F) -> FnCondition<F>
where
    F: Fn(&GenerationContext) -> bool + Send + Sync + 'static,
{
    FnCondition(f)
}

impl<F> LootCondition for FnCondition<F>
where
    F: Fn(&GenerationContext) -> bool + Send + Sync + 'static,
{
    fn verify(&self, context: &GenerationContext) -> bool {
        (self.0)(context)
    }
}

impl<F> fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCondition")
    }
}

/// Whether every condition verifies. True for no conditions; stops at the
/// first failure.
#[must_use]
pub fn all<C: LootCondition>(conditions: &[C], context: &GenerationContext) -> bool {
    conditions.iter().all(|condition| condition.verify(context))
}

/// Whether any condition verifies. False for no conditions; stops at the
/// first success.
#[must_use]
pub fn or<C: LootCondition>(conditions: &[C], context: &GenerationContext) -> bool {
    conditions.iter().any(|condition| condition.verify(context))
}

/// Whether at least `required` conditions verify.
///
/// A non-positive threshold always holds and a threshold above the number of
/// conditions never does. Thresholds of one and of every condition defer to
/// [`or`] and [`all`]. Otherwise the conditions are scanned once, stopping as
/// soon as enough have verified or too few remain to reach the threshold.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use trove::{GenerationContext, condition};
///
/// let context = GenerationContext::builder().random(StdRng::seed_from_u64(0)).build()?;
/// let conditions = [true, false, true];
/// assert!(condition::some(&conditions, 2, &context));
/// assert!(!condition::some(&conditions, 3, &context));
/// assert!(condition::some(&conditions, 0, &context));
/// assert!(!condition::some(&conditions, 4, &context));
/// # Ok::<(), std::sync::Arc<trove::TroveError>>(())
/// ```
#[must_use]
pub fn some<C: LootCondition>(
    conditions: &[C],
    required: i64,
    context: &GenerationContext,
) -> bool {
    if required <= 0 {
        return true;
    }
    let threshold = usize::try_from(required).unwrap_or(usize::MAX);
    let size = conditions.len();
    if threshold > size {
        return false;
    }
    if threshold == 1 {
        return or(conditions, context);
    }
    if threshold == size {
        return all(conditions, context);
    }

    let mut passed = 0;
    let mut remaining = size;
    for condition in conditions {
        remaining -= 1;
        if condition.verify(context) {
            passed += 1;
            if passed >= threshold {
                return true;
            }
        } else if passed + remaining < threshold {
            return false;
        }
    }
    false
}
