//! Core, non-public data structures for the registry.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::ResolveError;

/// The opaque owned value cached under a name.
///
/// Instances are shared out as `Arc` clones; "releasing" an instance means
/// dropping the registry's own clone, so the object stays alive for callers
/// still holding one but is no longer reachable through the registry.
pub type Instance = Arc<dyn Any + Send + Sync>;

pub(crate) type Factory = Box<dyn Fn() -> Instance + Send + Sync>;

thread_local! {
  // The set of names currently being resolved on this thread. A factory that
  // re-enters the registry for the name it is supposed to fill would
  // otherwise deadlock on the shard lock guarding its slot.
  static RESOLVING: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// An RAII guard held for the duration of a resolve call.
///
/// When created, it adds the entry name to the thread-local resolving set.
/// If the name is already present, a factory has re-entered the registry for
/// its own slot, and we panic with a clear message before touching the entry
/// map, where the re-entry would deadlock. Dropping the guard removes the
/// name. The guard must be created before the entry map is locked.
pub(crate) struct ReentryGuard {
  name: String,
}

impl ReentryGuard {
  pub(crate) fn new(name: &str) -> Self {
    RESOLVING.with(|set| {
      let mut set = set.borrow_mut();
      // `insert` returns `false` if the name was already present.
      if !set.insert(name.to_owned()) {
        panic!(
          "factory re-entered the registry while resolving `{}`",
          name
        );
      }
    });
    Self {
      name: name.to_owned(),
    }
  }
}

impl Drop for ReentryGuard {
  fn drop(&mut self) {
    RESOLVING.with(|set| {
      set.borrow_mut().remove(&self.name);
    });
  }
}

/// The mapping from type identifier to factory.
///
/// This is the registry's construction collaborator: "is this identifier a
/// constructible type" is a catalog lookup, and constructing is invoking the
/// registered factory. Factories must be self-contained; resolving other
/// entries from inside a factory is not supported.
#[derive(Default)]
pub(crate) struct TypeCatalog {
  factories: DashMap<String, Factory>,
}

impl TypeCatalog {
  pub(crate) fn insert<T: Any + Send + Sync>(
    &self,
    type_id: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    let boxed: Factory = Box::new(move || Arc::new(factory()));
    self.factories.insert(type_id.to_owned(), boxed);
  }

  pub(crate) fn contains(&self, type_id: &str) -> bool {
    self.factories.contains_key(type_id)
  }

  /// Invokes the factory registered under `type_id`.
  pub(crate) fn construct(&self, type_id: &str) -> Result<Instance, ResolveError> {
    let factory = self
      .factories
      .get(type_id)
      .ok_or_else(|| ResolveError::TypeNotFound(type_id.to_owned()))?;
    Ok((factory.value())())
  }
}
