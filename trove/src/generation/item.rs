//! Type-erased generated values.

use std::{any::Any, fmt, sync::Arc};

use crate::TypeTag;

/// A generated value of any `'static` type.
///
/// Items are cheap to clone; clones share the value.
#[derive(Clone)]
pub struct LootItem {
    type_tag: TypeTag,
    value: Arc<dyn Any + Send + Sync>,
}

impl LootItem {
    /// Wrap `value`.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_tag: TypeTag::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Descriptor of the wrapped value's type.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// Whether the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the wrapped value as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for LootItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LootItem").field(&self.type_tag).finish()
    }
}
