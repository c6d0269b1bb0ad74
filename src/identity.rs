use crate::canonical::canonical_name;
use crate::config::default_normalizer;
use crate::descriptor::TypeDescriptor;
use crate::normalize::NameNormalizer;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A type's identity together with its portable, human-readable name.
///
/// Identities compare and hash by the underlying [`TypeId`] alone, which
/// makes them suitable keys for any `HashMap`. The canonical name is
/// computed once, on construction, and is meant for diagnostics: two
/// different types may share a name, and that never makes them equal.
///
/// Most callers should not build identities themselves but ask a
/// [`TypeIdentityRegistry`](crate::TypeIdentityRegistry) (or
/// [`type_identity`](crate::type_identity)) for the shared instance.
///
/// # Examples
///
/// ```
/// use type_identity::TypeIdentity;
///
/// let identity = TypeIdentity::of::<u32>();
/// assert_eq!(identity.canonical_name(), "u32");
/// assert_eq!(identity.to_string(), "FullyQualifiedName: 'u32'");
/// assert_eq!(identity, TypeIdentity::of::<u32>());
/// ```
#[derive(Clone, Debug)]
pub struct TypeIdentity {
    descriptor: TypeDescriptor,
    canonical_name: String,
}

impl TypeIdentity {
    /// Builds an identity using the process default normalizer.
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self::with_normalizer(descriptor, default_normalizer().as_ref())
    }

    /// Builds an identity, normalizing its name with `normalizer`.
    pub fn with_normalizer(descriptor: TypeDescriptor, normalizer: &dyn NameNormalizer) -> Self {
        Self {
            descriptor,
            canonical_name: canonical_name(descriptor.raw_name(), normalizer),
        }
    }

    /// Builds a fresh, unshared identity for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeDescriptor::of::<T>())
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    pub fn type_id(&self) -> TypeId {
        self.descriptor.type_id()
    }

    /// The normalized name with every scope separator rewritten as `.`
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Returns true if this is the identity of `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.descriptor.is::<T>()
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for TypeIdentity {}

impl PartialEq<TypeDescriptor> for TypeIdentity {
    fn eq(&self, other: &TypeDescriptor) -> bool {
        self.descriptor == *other
    }
}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.hash(state);
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FullyQualifiedName: '{}'", self.canonical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::QualifierStripper;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;

    struct Foo;

    mod app {
        pub mod services {
            pub struct Bar;
        }
    }

    fn hash_of(identity: &TypeIdentity) -> u64 {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_canonical_name_of_nested_type() {
        let identity = TypeIdentity::of::<app::services::Bar>();
        let expected = format!("{}.app.services.Bar", module_path!().replace("::", "."));
        assert_eq!(identity.canonical_name(), expected);
    }

    #[test]
    fn test_display_format() {
        let descriptor = TypeDescriptor::bridged(TypeId::of::<Foo>(), "Foo");
        let identity = TypeIdentity::with_normalizer(descriptor, &QualifierStripper);
        assert_eq!(identity.canonical_name(), "Foo");
        assert_eq!(identity.to_string(), "FullyQualifiedName: 'Foo'");
    }

    #[test]
    fn test_equality_is_by_type_not_name() {
        let renamed = TypeDescriptor::bridged(TypeId::of::<Foo>(), "class Legacy::Foo");
        let a = TypeIdentity::of::<Foo>();
        let b = TypeIdentity::with_normalizer(renamed, &QualifierStripper);

        assert_ne!(a.canonical_name(), b.canonical_name());
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let impostor = TypeDescriptor::bridged(TypeId::of::<u8>(), "Foo");
        let c = TypeIdentity::with_normalizer(impostor, &QualifierStripper);
        let d = TypeIdentity::with_normalizer(
            TypeDescriptor::bridged(TypeId::of::<Foo>(), "Foo"),
            &QualifierStripper,
        );
        assert_eq!(c.canonical_name(), d.canonical_name());
        assert_ne!(c, d);
    }

    #[test]
    fn test_compares_against_descriptor() {
        let identity = TypeIdentity::of::<Foo>();
        assert_eq!(identity, TypeDescriptor::of::<Foo>());
        assert_ne!(identity, TypeDescriptor::of::<app::services::Bar>());
        assert!(identity.is::<Foo>());
        assert_eq!(identity.type_id(), TypeId::of::<Foo>());
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut bindings = HashMap::new();
        bindings.insert(TypeIdentity::of::<Foo>(), "foo provider");
        bindings.insert(TypeIdentity::of::<app::services::Bar>(), "bar provider");
        bindings.insert(TypeIdentity::of::<Foo>(), "replacement foo provider");

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[&TypeIdentity::of::<Foo>()], "replacement foo provider");
    }

    #[test]
    fn test_mangled_bridge_falls_back_without_demangler() {
        let descriptor = TypeDescriptor::bridged(TypeId::of::<Foo>(), "_ZN3App8Services3BarE");
        let identity = TypeIdentity::with_normalizer(descriptor, &QualifierStripper);
        assert_eq!(identity.canonical_name(), "_ZN3App8Services3BarE");
    }

    #[cfg(feature = "demangle")]
    #[test]
    fn test_mangled_bridge_with_demangler() {
        let descriptor = TypeDescriptor::bridged(TypeId::of::<Foo>(), "_ZN3App8Services3BarE");
        let identity = TypeIdentity::with_normalizer(descriptor, &crate::normalize::SymbolDemangler);
        assert_eq!(identity.canonical_name(), "App.Services.Bar");
    }

    #[test]
    fn test_unsized_types_have_identities() {
        let identity = TypeIdentity::of::<str>();
        assert_eq!(identity.canonical_name(), "str");
        assert!(TypeIdentity::of::<dyn std::any::Any>().canonical_name().contains("Any"));
    }
}
