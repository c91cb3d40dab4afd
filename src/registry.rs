//! The main `Registry` struct and its resolution logic.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, warn};

use crate::core::{Instance, ReentryGuard, TypeCatalog};
use crate::error::ResolveError;

/// How a resolve call treats the entry for a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
  /// Return the cached instance if one exists, construct and cache it
  /// otherwise. This is the default mode.
  LookupOrCreate,
  /// Release any cached instance first, then construct and cache a fresh
  /// one. The returned instance always has a new identity.
  ForceRecreate,
  /// Release any cached instance and leave the slot empty. Never constructs.
  ForceReset,
}

impl ResolveMode {
  /// Maps the tri-state recreate flag of the loose calling convention:
  /// an absent or `false` flag means a plain lookup, `true` forces
  /// recreation.
  pub fn from_flag(flag: Option<bool>) -> Self {
    match flag {
      Some(true) => ResolveMode::ForceRecreate,
      _ => ResolveMode::LookupOrCreate,
    }
  }
}

/// A thread-safe named-instance registry.
///
/// The registry holds at most one live instance per name. Instances are
/// constructed lazily, on the first lookup of a name, by the factory
/// registered for the name's type identifier, and the same instance is
/// returned on every later lookup until the entry is removed or recreated.
///
/// Construction is explicit: a name resolves only if a factory has been
/// registered for its type identifier via [`add_type`](Registry::add_type).
/// There is no reflection and no implicit wiring between entries.
pub struct Registry {
  entries: DashMap<String, Instance>,
  types: TypeCatalog,
  closed: AtomicBool,
}

impl Default for Registry {
  fn default() -> Self {
    Self::new()
  }
}

impl Registry {
  /// Creates a new, empty `Registry`.
  ///
  /// A fresh registry is independent of every other registry, including the
  /// process-wide default; see [`default_registry`](crate::default_registry)
  /// for the shared one.
  pub fn new() -> Self {
    Self {
      entries: DashMap::new(),
      types: TypeCatalog::default(),
      closed: AtomicBool::new(false),
    }
  }

  // --- TYPE REGISTRATION ---

  /// Registers `factory` as the constructor for `type_id`.
  ///
  /// The last registration for an identifier wins. Entries already
  /// constructed from a previous factory are not touched; the new factory
  /// only applies to constructions that happen after it.
  pub fn add_type<T: Any + Send + Sync>(
    &self,
    type_id: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    if self.is_closed() {
      warn!(
        "ignoring registration of type `{}` on a closed registry",
        type_id
      );
      return;
    }
    self.types.insert(type_id, factory);
  }

  /// True iff a factory is registered under `type_id`.
  pub fn is_constructible(&self, type_id: &str) -> bool {
    self.types.contains(type_id)
  }

  // --- RESOLUTION ---

  /// The resolution routine with an introspectable error channel.
  ///
  /// `type_id` names the type to construct on a miss and defaults to `name`
  /// when omitted. `Ok(None)` means the call legitimately produced nothing
  /// (only [`ForceReset`](ResolveMode::ForceReset) does); every failure to
  /// produce an instance is an `Err`.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::EmptyName`] if `name` is empty; nothing is mutated.
  /// - [`ResolveError::Closed`] if [`close`](Registry::close) has been
  ///   called; nothing is mutated.
  /// - [`ResolveError::TypeNotFound`] if a construction was needed but no
  ///   factory is registered for the resolved type identifier. The entry
  ///   map is left exactly as it was before the call for a lookup, and
  ///   empty for the name after a forced recreation.
  pub fn try_resolve(
    &self,
    name: &str,
    type_id: Option<&str>,
    mode: ResolveMode,
  ) -> Result<Option<Instance>, ResolveError> {
    if name.is_empty() {
      return Err(ResolveError::EmptyName);
    }
    if self.is_closed() {
      return Err(ResolveError::Closed);
    }

    // Created before the entry map is locked: a factory re-entering the
    // registry for its own name panics here instead of deadlocking on the
    // shard lock below.
    let _guard = ReentryGuard::new(name);

    match mode {
      ResolveMode::ForceReset => {
        self.entries.remove(name);
        Ok(None)
      }
      ResolveMode::ForceRecreate => {
        // The old instance is released before the replacement is
        // constructed, so the name never refers to both at once. Racing
        // recreations of the same name are last-writer-wins.
        self.entries.remove(name);
        let type_id = type_id.unwrap_or(name);
        let built = self.types.construct(type_id)?;
        self.entries.insert(name.to_owned(), built.clone());
        debug!("recreated `{}` from type `{}`", name, type_id);
        Ok(Some(built))
      }
      ResolveMode::LookupOrCreate => {
        // The whole check-construct-insert sequence runs under the shard
        // lock for `name`: concurrent first lookups of the same name
        // construct exactly once.
        match self.entries.entry(name.to_owned()) {
          Entry::Occupied(entry) => Ok(Some(entry.get().clone())),
          Entry::Vacant(slot) => {
            let type_id = type_id.unwrap_or(name);
            let built = self.types.construct(type_id)?;
            slot.insert(built.clone());
            debug!("constructed `{}` from type `{}`", name, type_id);
            Ok(Some(built))
          }
        }
      }
    }
  }

  /// The loose resolution routine.
  ///
  /// Identical to [`try_resolve`](Registry::try_resolve) except that every
  /// failure is flattened to `None`, so a caller cannot tell a miss from a
  /// failure. The flattened reason is logged at debug level.
  pub fn resolve(
    &self,
    name: &str,
    type_id: Option<&str>,
    mode: ResolveMode,
  ) -> Option<Instance> {
    match self.try_resolve(name, type_id, mode) {
      Ok(found) => found,
      Err(reason) => {
        debug!("resolving `{}` produced nothing: {}", name, reason);
        None
      }
    }
  }

  // --- TYPED ADAPTERS ---
  // Sugar only. Every adapter funnels into the one resolution routine and
  // carries no policy of its own.

  /// Looks up or creates the instance named `name`, with `name` doubling as
  /// the type identifier, and downcasts it to `T`.
  ///
  /// Returns `None` on a construction failure or if the cached instance is
  /// not a `T`. A downcast mismatch leaves the cached entry in place.
  pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
    self.get_as(name, name)
  }

  /// Looks up or creates the instance named `name`, constructing it from
  /// `type_id` on a miss, and downcasts it to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, name: &str, type_id: &str) -> Option<Arc<T>> {
    self
      .resolve(name, Some(type_id), ResolveMode::LookupOrCreate)
      .and_then(|instance| instance.downcast::<T>().ok())
  }

  /// Untyped lookup-or-create, with `name` doubling as the type identifier.
  pub fn instance(&self, name: &str) -> Option<Instance> {
    self.resolve(name, None, ResolveMode::LookupOrCreate)
  }

  /// Discards any instance named `name` and constructs a fresh one, with
  /// `name` doubling as the type identifier.
  pub fn recreate(&self, name: &str) -> Option<Instance> {
    self.resolve(name, None, ResolveMode::ForceRecreate)
  }

  /// Discards any instance named `name` and constructs a fresh one from
  /// `type_id`.
  pub fn recreate_as(&self, name: &str, type_id: &str) -> Option<Instance> {
    self.resolve(name, Some(type_id), ResolveMode::ForceRecreate)
  }

  // --- ENTRY MANAGEMENT ---

  /// True iff a live entry exists for `name`. Never constructs, and always
  /// `false` on a closed registry.
  pub fn exists(&self, name: &str) -> bool {
    !self.is_closed() && self.entries.contains_key(name)
  }

  /// Evicts the entry for `name`, releasing its instance. A no-op when no
  /// entry exists.
  pub fn remove(&self, name: &str) {
    let _ = self.resolve(name, None, ResolveMode::ForceReset);
  }

  // --- LIFECYCLE ---

  /// Releases every cached instance, clears the entry map and marks the
  /// registry closed.
  ///
  /// Closing is idempotent and safe on an empty registry. Operations on a
  /// closed registry fail with [`ResolveError::Closed`] on the strict path
  /// and degrade to "nothing" on the loose paths.
  pub fn close(&self) {
    if self.closed.swap(true, Ordering::SeqCst) {
      return;
    }
    self.entries.clear();
    debug!("registry closed");
  }

  /// True iff [`close`](Registry::close) has been called.
  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::SeqCst)
  }
}
