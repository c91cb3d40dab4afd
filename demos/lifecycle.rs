use once_registry::Registry;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A service that receives a unique index upon construction.
struct Greeter {
  index: usize,
}

// A global, thread-safe counter to show when construction really happens.
static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

impl Greeter {
  fn new() -> Self {
    let index = CONSTRUCTED.fetch_add(1, Ordering::SeqCst) + 1;
    println!("Constructing Greeter {}...", index);
    Greeter { index }
  }

  fn hello(&self) {
    println!("Hello, world! This is instance {}.", self.index);
  }
}

fn main() {
  let registry = Registry::new();
  registry.add_type("Greeter", Greeter::new);

  println!("--- First lookup constructs ---");
  let g1 = registry.get::<Greeter>("Greeter").unwrap();
  g1.hello();

  println!("--- Second lookup reuses the cached instance ---");
  let g2 = registry.get::<Greeter>("Greeter").unwrap();
  g2.hello();
  assert!(
    Arc::ptr_eq(&g1, &g2),
    "Cached lookups should return the same instance"
  );

  println!("--- Force-recreate discards and rebuilds ---");
  let g3 = registry.recreate("Greeter").unwrap();
  let g3 = g3.downcast::<Greeter>().unwrap();
  g3.hello();
  assert!(
    !Arc::ptr_eq(&g1, &g3),
    "A recreated instance should have a new identity"
  );

  println!("--- Reset empties the slot, the next lookup rebuilds ---");
  registry.remove("Greeter");
  assert!(!registry.exists("Greeter"));
  let g4 = registry.get::<Greeter>("Greeter").unwrap();
  g4.hello();

  println!(
    "Done: {} constructions for four lookups.",
    CONSTRUCTED.load(Ordering::SeqCst)
  );
}
