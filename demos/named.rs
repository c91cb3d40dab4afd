use once_registry::Registry;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// One constructible type, cached under several independent names.
struct Worker {
  id: usize,
}

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let registry = Registry::new();
  registry.add_type("Worker", || Worker {
    id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
  });

  // --- Two names, one type ---
  // Each name gets its own instance; the type identifier only picks the
  // factory.
  let ingest = registry.get_as::<Worker>("ingest", "Worker").unwrap();
  let export = registry.get_as::<Worker>("export", "Worker").unwrap();

  println!("ingest worker id: {}", ingest.id);
  println!("export worker id: {}", export.id);
  assert!(!Arc::ptr_eq(&ingest, &export));

  // --- Each name caches independently ---
  let ingest_again = registry.get_as::<Worker>("ingest", "Worker").unwrap();
  assert!(Arc::ptr_eq(&ingest, &ingest_again));
  println!("ingest resolved again, same instance.");

  // --- Removing one name leaves the other alone ---
  registry.remove("ingest");
  assert!(!registry.exists("ingest"));
  assert!(registry.exists("export"));
  println!("ingest removed; export still cached.");

  // The next lookup under the removed name constructs a fresh worker.
  let ingest_fresh = registry.get_as::<Worker>("ingest", "Worker").unwrap();
  println!("fresh ingest worker id: {}", ingest_fresh.id);
  assert!(!Arc::ptr_eq(&ingest, &ingest_fresh));
}
