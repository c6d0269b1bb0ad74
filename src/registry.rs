use crate::config::{default_normalizer, RegistryConfig};
use crate::descriptor::TypeDescriptor;
use crate::identity::TypeIdentity;
use crate::normalize::{NameNormalizer, NormalizerKind};
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A thread-safe cache handing out one shared [`TypeIdentity`] per type
///
/// The first request for a type builds its identity; every later request,
/// from any thread, gets the same `Arc` back. Construction happens under the
/// registry lock, so an identity is never built twice and never observed half
/// built.
///
/// Registries are cheap handles: cloning one shares the underlying cache.
/// Entries are never removed and live as long as the last handle.
///
/// # Examples
///
/// ```
/// use type_identity::TypeIdentityRegistry;
/// use std::sync::Arc;
///
/// struct Database;
///
/// let registry = TypeIdentityRegistry::new();
/// let first = registry.identity::<Database>();
/// let second = registry.identity::<Database>();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(first.canonical_name().ends_with("Database"));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone)]
pub struct TypeIdentityRegistry {
    items: Arc<Mutex<HashMap<TypeId, Arc<TypeIdentity>>>>,
    normalizer: Arc<dyn NameNormalizer>,
}

static GLOBAL: Lazy<TypeIdentityRegistry> =
    Lazy::new(|| TypeIdentityRegistry::with_shared_normalizer(default_normalizer()));

impl TypeIdentityRegistry {
    /// Creates an empty registry using the process default normalizer
    pub fn new() -> Self {
        Self::with_shared_normalizer(default_normalizer())
    }

    /// Creates an empty registry that normalizes names with `normalizer`
    ///
    /// # Examples
    ///
    /// ```
    /// use type_identity::{NormalizerKind, QualifierStripper, TypeIdentityRegistry};
    ///
    /// let registry = TypeIdentityRegistry::with_normalizer(Box::new(QualifierStripper));
    /// assert_eq!(registry.normalizer_kind(), NormalizerKind::StripQualifiers);
    /// ```
    pub fn with_normalizer(normalizer: Box<dyn NameNormalizer>) -> Self {
        Self::with_shared_normalizer(Arc::from(normalizer))
    }

    /// Creates an empty registry configured by `config`
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_normalizer(config.normalizer.build())
    }

    fn with_shared_normalizer(normalizer: Arc<dyn NameNormalizer>) -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
            normalizer,
        }
    }

    /// The registry that lives for the whole process.
    ///
    /// Built on first use with the [`default_normalizer`](crate::default_normalizer).
    /// Prefer passing an explicit registry around; this one backs
    /// [`type_identity`](crate::type_identity) for code that has none.
    pub fn global() -> &'static TypeIdentityRegistry {
        &GLOBAL
    }

    // The map only ever grows, so a panic elsewhere cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Arc<TypeIdentity>>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the shared identity of `T`, building it on first use
    pub fn identity<T: ?Sized + 'static>(&self) -> Arc<TypeIdentity> {
        self.identity_for(TypeDescriptor::of::<T>())
    }

    /// Returns the shared identity of the value behind a borrow.
    ///
    /// A `&Foo` maps to the identity of `Foo`.
    pub fn identity_of_val<T: ?Sized + 'static>(&self, value: &T) -> Arc<TypeIdentity> {
        self.identity_for(TypeDescriptor::of_val(value))
    }

    /// Returns the shared identity for a descriptor obtained at runtime.
    ///
    /// Entries are keyed by type alone. If the type is already registered the
    /// existing identity is returned, whatever raw name `descriptor` carries.
    pub fn identity_for(&self, descriptor: TypeDescriptor) -> Arc<TypeIdentity> {
        let mut items = self.lock();
        let identity = items.entry(descriptor.type_id()).or_insert_with(|| {
            let identity = TypeIdentity::with_normalizer(descriptor, self.normalizer.as_ref());
            tracing::trace!(
                raw_name = descriptor.raw_name(),
                canonical_name = identity.canonical_name(),
                "registered type identity"
            );
            Arc::new(identity)
        });
        Arc::clone(identity)
    }

    /// Returns the identity registered for `id`, if any
    pub fn get(&self, id: TypeId) -> Option<Arc<TypeIdentity>> {
        self.lock().get(&id).cloned()
    }

    /// Returns true if an identity has been built for `T`
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.lock().contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of identities built so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no identity has been built yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a snapshot of every registered identity, in no particular order
    pub fn identities(&self) -> Vec<Arc<TypeIdentity>> {
        self.lock().values().cloned().collect()
    }

    /// The strategy this registry normalizes names with
    pub fn normalizer_kind(&self) -> NormalizerKind {
        self.normalizer.kind()
    }
}

impl Default for TypeIdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeIdentityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TypeIdentityRegistry")
            .field("len", &self.len())
            .field("normalizer", &self.normalizer)
            .finish()
    }
}
