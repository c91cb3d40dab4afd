use once_registry::{Registry, ResolveError, ResolveMode};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};
use std::thread;
use std::time::Duration;

// --- Advanced Test Fixtures ---

// A service that counts its constructions through a shared counter.
struct CountedService;

fn counting_registry(counter: &Arc<AtomicUsize>) -> Registry {
  let registry = Registry::new();
  let counter = Arc::clone(counter);
  registry.add_type("CountedService", move || {
    counter.fetch_add(1, Ordering::SeqCst);
    // Widen the race window so an unsynchronized implementation would
    // construct more than once.
    thread::sleep(Duration::from_millis(20));
    CountedService
  });
  registry
}

// --- Advanced Tests ---

#[test]
fn test_concurrent_first_lookup_constructs_exactly_once() {
  // Arrange
  let constructions = Arc::new(AtomicUsize::new(0));
  let registry = counting_registry(&constructions);
  let observed = Mutex::new(Vec::new());

  // Act: many threads race the first lookup of the same name.
  thread::scope(|s| {
    for _ in 0..16 {
      s.spawn(|| {
        let instance = registry.instance("CountedService").unwrap();
        observed.lock().unwrap().push(instance);
      });
    }
  });

  // Assert
  assert_eq!(constructions.load(Ordering::SeqCst), 1);
  let observed = observed.into_inner().unwrap();
  assert_eq!(observed.len(), 16);
  for instance in &observed[1..] {
    assert!(Arc::ptr_eq(&observed[0], instance));
  }
}

#[test]
fn test_concurrent_registration_and_resolution() {
  // A stress test to ensure registering new types while resolving entries
  // does not deadlock or lose updates.

  // Arrange
  let registry = Registry::new();
  registry.add_type("common", || 42_i32);

  // Act
  thread::scope(|s| {
    for i in 0..10_usize {
      let registry = &registry;
      s.spawn(move || {
        // Each thread registers its own type and materializes an entry.
        let type_id = format!("thread_type_{}", i);
        registry.add_type(&type_id, move || i);
        registry.instance(&type_id).unwrap();

        // Each thread also resolves the common entry repeatedly.
        for _ in 0..100 {
          let common = registry.get::<i32>("common").unwrap();
          assert_eq!(*common, 42);
        }
      });
    }
  });

  // Assert: entries created by every thread are visible afterwards.
  for i in 0..10_usize {
    let entry = registry.get::<usize>(&format!("thread_type_{}", i)).unwrap();
    assert_eq!(*entry, i);
  }
}

#[test]
fn test_close_releases_entries_and_refuses_work() {
  // Arrange
  static DROPPED: AtomicUsize = AtomicUsize::new(0);

  struct Disposable;
  impl Drop for Disposable {
    fn drop(&mut self) {
      DROPPED.fetch_add(1, Ordering::SeqCst);
    }
  }

  let registry = Registry::new();
  registry.add_type("Disposable", || Disposable);
  registry.get_as::<Disposable>("first", "Disposable");
  registry.get_as::<Disposable>("second", "Disposable");
  assert_eq!(DROPPED.load(Ordering::SeqCst), 0);

  // Act
  registry.close();

  // Assert
  // Both cached instances were released by the close.
  assert_eq!(DROPPED.load(Ordering::SeqCst), 2);
  assert!(registry.is_closed());
  assert!(!registry.exists("first"));

  // The strict path reports the closed registry, the loose path degrades.
  assert_eq!(
    registry
      .try_resolve("first", Some("Disposable"), ResolveMode::LookupOrCreate)
      .err(),
    Some(ResolveError::Closed)
  );
  assert!(registry.instance("first").is_none());

  // Closing again is a no-op.
  registry.close();
  assert_eq!(DROPPED.load(Ordering::SeqCst), 2);
}

#[test]
fn test_closed_registry_ignores_type_registration() {
  // Arrange
  let registry = Registry::new();
  registry.close();

  // Act
  registry.add_type("Late", || 1_u8);

  // Assert
  assert!(!registry.is_constructible("Late"));
}

#[test]
fn test_drop_releases_instances() {
  // Dropping the registry must release every held instance, the same way an
  // explicit close does. Crucial for resource cleanup.

  static DROPPED: AtomicUsize = AtomicUsize::new(0);

  struct ConnectionPool;
  impl Drop for ConnectionPool {
    fn drop(&mut self) {
      DROPPED.fetch_add(1, Ordering::SeqCst);
    }
  }

  // Arrange
  let registry = Registry::new();
  registry.add_type("ConnectionPool", || ConnectionPool);

  // Act
  // 1. Materialize the entry.
  let pool = registry.get::<ConnectionPool>("ConnectionPool").unwrap();
  assert_eq!(DROPPED.load(Ordering::SeqCst), 0);

  // 2. Dropping the caller's handle is not enough; the registry still holds
  // a strong reference.
  drop(pool);
  assert_eq!(DROPPED.load(Ordering::SeqCst), 0);

  // 3. Dropping the registry releases the last strong reference.
  drop(registry);

  // Assert
  assert_eq!(DROPPED.load(Ordering::SeqCst), 1);
}

#[test]
fn test_release_ordering_on_recreate() {
  // The old instance must be released before the replacement is stored, so
  // the registry never holds two instances under one name.

  static LIVE: AtomicUsize = AtomicUsize::new(0);

  struct Tracked;
  impl Tracked {
    fn new() -> Self {
      LIVE.fetch_add(1, Ordering::SeqCst);
      Tracked
    }
  }
  impl Drop for Tracked {
    fn drop(&mut self) {
      LIVE.fetch_sub(1, Ordering::SeqCst);
    }
  }

  // Arrange
  let registry = Registry::new();
  registry.add_type("Tracked", || {
    // The previous instance must already be released when the factory for
    // its replacement runs.
    assert_eq!(LIVE.load(Ordering::SeqCst), 0);
    Tracked::new()
  });
  registry.instance("Tracked").unwrap();
  assert_eq!(LIVE.load(Ordering::SeqCst), 1);

  // Act: recreate without holding any caller-side clone of the original.
  registry.recreate("Tracked").unwrap();
  assert_eq!(LIVE.load(Ordering::SeqCst), 1);

  // Assert: nothing is alive once the registry itself is gone.
  drop(registry);
  assert_eq!(LIVE.load(Ordering::SeqCst), 0);
}

#[test]
fn test_factory_overwrite_applies_to_later_constructions() {
  // Arrange
  let registry = Registry::new();
  registry.add_type("value", || 1_u32);
  let original = registry.get::<u32>("value").unwrap();
  assert_eq!(*original, 1);

  // Act: re-register the identifier with a different factory.
  registry.add_type("value", || 2_u32);

  // Assert
  // The cached entry is untouched by the new registration.
  assert_eq!(*registry.get::<u32>("value").unwrap(), 1);
  // A forced recreation picks up the new factory.
  registry.recreate("value").unwrap();
  assert_eq!(*registry.get::<u32>("value").unwrap(), 2);
}

#[test]
#[should_panic(expected = "factory re-entered the registry")]
fn test_reentrant_factory_panics() {
  // A factory that resolves its own name would deadlock on the entry lock;
  // the construction guard turns that into a panic.
  let registry = Arc::new(Registry::new());
  let inner = Arc::clone(&registry);
  registry.add_type("Recursive", move || inner.instance("Recursive"));

  registry.instance("Recursive");
}
