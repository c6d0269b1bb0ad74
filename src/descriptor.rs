use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A non-owning handle to the compiler's record of a type.
///
/// Pairs the [`TypeId`] that identifies the type with the raw name the
/// compiler (or some other facility) reports for it. Both parts are `'static`
/// and live for the whole process, so a descriptor is `Copy` and never owns
/// anything.
///
/// Equality and hashing look only at the `TypeId`. Two descriptors carrying
/// different raw names for the same type are equal.
#[derive(Clone, Copy, Debug)]
pub struct TypeDescriptor {
    id: TypeId,
    raw_name: &'static str,
}

impl TypeDescriptor {
    /// Captures the descriptor for `T`, naming it with [`std::any::type_name`].
    ///
    /// # Examples
    ///
    /// ```
    /// use type_identity::TypeDescriptor;
    ///
    /// let descriptor = TypeDescriptor::of::<Vec<u8>>();
    /// assert_eq!(descriptor, TypeDescriptor::of::<Vec<u8>>());
    /// assert_ne!(descriptor, TypeDescriptor::of::<Vec<u16>>());
    /// ```
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            raw_name: type_name::<T>(),
        }
    }

    /// Captures the descriptor of the value behind a borrow.
    ///
    /// The borrow itself is not part of the identity, so passing a `&Foo`
    /// yields the descriptor of `Foo`.
    pub fn of_val<T: ?Sized + 'static>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// Bridges a descriptor whose raw name was obtained elsewhere, such as a
    /// symbol table entry or plugin metadata.
    ///
    /// The name may be mangled; normalization happens when a
    /// [`TypeIdentity`](crate::TypeIdentity) is built from it.
    pub fn bridged(id: TypeId, raw_name: &'static str) -> Self {
        Self { id, raw_name }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The implementation-defined name, exactly as it was captured
    pub fn raw_name(&self) -> &'static str {
        self.raw_name
    }

    /// Returns true if this descriptor identifies `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.raw_name)
    }
}
