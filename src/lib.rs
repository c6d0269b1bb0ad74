//! # type-identity
//!
//! Stable type identities with portable, human-readable names.
//!
//! `type-identity` gives every Rust type a [`TypeIdentity`]: a value that
//! compares and hashes by the type itself, so it can key the "requested type
//! → provider" maps of a service registry, and that carries a canonical name
//! for binding errors and logs. Canonical names are normalized from whatever
//! the compiler reports, with `::` rewritten as `.` so they read the same on
//! every platform.
//!
//! ## Key Features
//!
//! - **Identity by type**: equality and hashing use [`TypeId`], never the name
//! - **Readable names**: mangled symbols are demangled, qualifier noise is stripped
//! - **Exactly once**: a [`TypeIdentityRegistry`] builds one shared identity per type,
//!   even under concurrent first use
//! - **Pluggable normalization**: pick a [`NameNormalizer`] per registry, or let the
//!   build's capabilities decide
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use type_identity::type_identity;
//! use std::sync::Arc;
//!
//! struct Mailer;
//!
//! let first = type_identity::<Mailer>();
//! let second = type_identity::<Mailer>();
//!
//! // The same shared identity every time
//! assert!(Arc::ptr_eq(&first, &second));
//!
//! // Canonical names never contain the `::` separator
//! assert!(first.canonical_name().ends_with("Mailer"));
//! assert!(!first.canonical_name().contains("::"));
//!
//! println!("{}", first); // FullyQualifiedName: '….Mailer'
//! ```
//!
//! ### Keying a Provider Map
//!
//! ```rust
//! use type_identity::{TypeIdentity, TypeIdentityRegistry};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! struct Clock;
//! struct Cache;
//!
//! let registry = TypeIdentityRegistry::new();
//! let mut providers: HashMap<Arc<TypeIdentity>, &str> = HashMap::new();
//! providers.insert(registry.identity::<Clock>(), "system clock");
//!
//! assert_eq!(providers.get(&registry.identity::<Clock>()), Some(&"system clock"));
//!
//! // Build a binding error from the identity's display form
//! let missing = registry.identity::<Cache>();
//! if !providers.contains_key(&missing) {
//!     let message = format!("no provider registered for {}", missing);
//!     assert!(message.starts_with("no provider registered for FullyQualifiedName: '"));
//! }
//! ```
//!
//! ### Bridging Foreign Names
//!
//! ```rust
//! use type_identity::{QualifierStripper, TypeDescriptor, TypeIdentity};
//! use std::any::TypeId;
//!
//! struct Bar;
//!
//! // A name reported by some other facility, in its own convention
//! let descriptor = TypeDescriptor::bridged(TypeId::of::<Bar>(), "class App::Services::Bar");
//! let identity = TypeIdentity::with_normalizer(descriptor, &QualifierStripper);
//!
//! assert_eq!(identity.canonical_name(), "App.Services.Bar");
//! assert_eq!(identity, TypeIdentity::of::<Bar>());
//! ```

mod canonical;
mod config;
mod descriptor;
mod error;
mod identity;
mod normalize;
mod registry;

pub use canonical::{canonical_name, canonicalize, CANONICAL_SEPARATOR, SCOPE_SEPARATOR};
pub use config::{default_normalizer, RegistryConfig, NORMALIZER_ENV};
pub use descriptor::TypeDescriptor;
pub use error::{ConfigError, NormalizeError};
pub use identity::TypeIdentity;
pub use normalize::{NameNormalizer, NormalizerKind, QualifierStripper, SymbolDemangler};
pub use registry::TypeIdentityRegistry;

pub use std::any::TypeId;
use std::sync::Arc;

/// Returns the process-wide shared identity of `T`.
///
/// Shorthand for `TypeIdentityRegistry::global().identity::<T>()`.
pub fn type_identity<T: ?Sized + 'static>() -> Arc<TypeIdentity> {
    TypeIdentityRegistry::global().identity::<T>()
}

/// Returns the process-wide shared identity of the value behind a borrow
pub fn type_identity_of_val<T: ?Sized + 'static>(value: &T) -> Arc<TypeIdentity> {
    TypeIdentityRegistry::global().identity_of_val(value)
}
