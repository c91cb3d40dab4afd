//! The process-wide default registry and its access functions.

use once_cell::sync::Lazy;

use crate::core::Instance;
use crate::registry::{Registry, ResolveMode};

// The one and only process-wide registry. It is created on its first access
// in a thread-safe manner; ordinary `Registry::new()` calls never touch it.
static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Provides a reference to the process-wide default registry.
///
/// The default registry is an opt-in convenience for callers that want
/// shared, static-style access without threading a handle through their
/// code. Code that can take a `&Registry` parameter should prefer that; it
/// keeps tests isolated.
///
/// # Examples
///
/// ```
/// use once_registry::default_registry;
///
/// fn register_types() {
///   // Get the default registry and register a constructible type.
///   default_registry().add_type("Greeting", || String::from("hello"));
/// }
///
/// register_types();
/// let greeting = default_registry().get::<String>("Greeting").unwrap();
/// assert_eq!(*greeting, "hello");
/// ```
pub fn default_registry() -> &'static Registry {
  &DEFAULT_REGISTRY
}

/// Resolves against the process-wide default registry.
///
/// This is a thin wrapper over [`default_registry`] with no logic of its
/// own, for callers that want the static calling convention in one call.
/// The first use constructs the default registry.
///
/// # Examples
///
/// ```
/// use once_registry::{default_registry, static_resolve, ResolveMode};
///
/// default_registry().add_type("Counter", || 0_u32);
///
/// let first = static_resolve("Counter", None, ResolveMode::LookupOrCreate);
/// assert!(first.is_some());
/// ```
pub fn static_resolve(name: &str, type_id: Option<&str>, mode: ResolveMode) -> Option<Instance> {
  default_registry().resolve(name, type_id, mode)
}
