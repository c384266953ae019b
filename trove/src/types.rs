//! Runtime type descriptors.
//!
//! Registries compare values by [`TypeTag`], a copyable wrapper around
//! [`TypeId`] that keeps the type's name for diagnostics. Polymorphic base
//! traits take [`AsAny`] as a supertrait so a `Box<dyn Base>` can report the
//! concrete type it holds, and [`Subtype`] proves at compile time that a
//! concrete type may be stored behind a base.

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

/// Comparable descriptor of a `'static` type.
///
/// Equality and hashing consider only the [`TypeId`]; the name is carried for
/// error messages.
///
/// # Examples
///
/// ```
/// use trove::TypeTag;
///
/// assert_eq!(TypeTag::of::<u8>(), TypeTag::of::<u8>());
/// assert_ne!(TypeTag::of::<u8>(), TypeTag::of::<u16>());
/// assert_eq!(TypeTag::of::<u8>().name(), "u8");
/// ```
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Descriptor for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.name).finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Dynamic access to a value's concrete type.
///
/// Implemented for every sized `'static + Send + Sync` type. Trait objects
/// whose trait lists `AsAny` as a supertrait dispatch these methods to the
/// concrete value, so call them on the dereferenced object (`&**boxed`), not on
/// the box.
pub trait AsAny: Any + Send + Sync {
    /// Borrow the value as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Descriptor of the concrete type.
    fn type_tag(&self) -> TypeTag;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

/// Proof that `Self` may be stored behind the base `B`.
///
/// Registration APIs require this bound, so registering a converter for a
/// type that does not belong to a manager's base fails to compile.
///
/// ```
/// use trove::{AsAny, Subtype};
///
/// trait Shape: AsAny {}
///
/// struct Circle;
/// impl Shape for Circle {}
/// impl Subtype<dyn Shape> for Circle {
///     fn upcast(self) -> Box<dyn Shape> {
///         Box::new(self)
///     }
/// }
///
/// let shape: Box<dyn Shape> = Circle.upcast();
/// assert!(trove::AsAny::as_any(&*shape).is::<Circle>());
/// ```
pub trait Subtype<B: ?Sized>: Any + Send + Sync + Sized {
    /// Box `self` as its base.
    fn upcast(self) -> Box<B>;
}
