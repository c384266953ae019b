//! Typed keys naming context facts.

use std::{
    any::TypeId,
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use crate::TypeTag;

/// Name of a context fact together with the type of its value.
///
/// Keys with the same name but different value types are different keys, and
/// looking a fact up through the wrong type finds nothing.
///
/// # Examples
///
/// ```
/// use trove::Key;
///
/// const LUCK: Key<f64> = Key::new("minecraft:luck");
/// assert_eq!(LUCK.name(), "minecraft:luck");
/// assert_ne!(LUCK, Key::<i64>::new("minecraft:luck"));
/// ```
pub struct Key<T> {
    name: Cow<'static, str>,
    marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Key with a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            marker: PhantomData,
        }
    }

    /// Key with a name built at runtime.
    #[must_use]
    pub fn owned(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            marker: PhantomData,
        }
    }

    /// The key's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: 'static> Key<T> {
    /// Descriptor of the value type.
    #[must_use]
    pub fn value_type(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            marker: PhantomData,
        }
    }
}

impl<T: 'static> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("type", &self.value_type())
            .finish()
    }
}

impl<T: 'static, U: 'static> PartialEq<Key<U>> for Key<T> {
    fn eq(&self, other: &Key<U>) -> bool {
        self.name == other.name && TypeId::of::<T>() == TypeId::of::<U>()
    }
}

impl<T: 'static> Eq for Key<T> {}

impl<T: 'static> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        TypeId::of::<T>().hash(state);
    }
}
