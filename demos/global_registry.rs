use once_registry::{default_registry, resolve, static_resolve, ResolveMode};

// Configuration shared process-wide through the default registry.
struct Settings {
  verbose: bool,
}

fn register_types() {
  // Registration can happen anywhere; the default registry is created on
  // first access.
  default_registry().add_type("Settings", || Settings { verbose: true });
}

fn consume_settings() {
  // Far away from registration, the macro resolves by name and panics if
  // the instance cannot be produced.
  let settings = resolve!(Settings, "Settings");
  println!("verbose mode: {}", settings.verbose);
}

fn main() {
  register_types();

  println!("--- Resolving through the macro ---");
  consume_settings();

  println!("--- Resolving through static_resolve ---");
  let raw = static_resolve("Settings", None, ResolveMode::LookupOrCreate);
  assert!(raw.is_some());
  println!("static_resolve produced the cached instance.");

  println!("--- The two paths share one cache ---");
  let a = resolve!("Settings");
  let b = static_resolve("Settings", None, ResolveMode::LookupOrCreate).unwrap();
  assert!(std::sync::Arc::ptr_eq(&a, &b));
  println!("Same instance on both paths.");
}
