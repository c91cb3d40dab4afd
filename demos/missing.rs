use once_registry::{Registry, ResolveError, ResolveMode};

fn main() {
  let registry = Registry::new();

  // --- The loose path: a failure looks like a miss ---
  println!("Resolving a name with no registered type, loosely...");
  match registry.instance("Ghost") {
    Some(_) => panic!("Should not have produced an instance!"),
    None => println!("Correctly received `None` from the loose path."),
  }

  // --- The strict path: the failure is introspectable ---
  println!("\nResolving the same name strictly...");
  match registry.try_resolve("Ghost", None, ResolveMode::LookupOrCreate) {
    Err(ResolveError::TypeNotFound(type_id)) => {
      println!("The strict path names the failure: no type `{}`.", type_id);
    }
    Err(other) => panic!("Unexpected error: {}", other),
    Ok(_) => panic!("Should not have produced an instance!"),
  }

  // Neither attempt cached anything.
  assert!(!registry.exists("Ghost"));
  println!("\nNo entry was created by the failed lookups.");
}
