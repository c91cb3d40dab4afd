//! # Once Registry
//!
//! A thread-safe named-instance registry for Rust.
//!
//! `once_registry` gives callers a "create once, reuse" object lifecycle
//! without a dependency-injection framework: each logical name holds at most
//! one instance, constructed lazily on the first lookup and returned
//! unchanged on every later one until the entry is removed or force-recreated.
//!
//! ## Core Concepts
//!
//! - **Registry**: the store of named instances and the factories that
//!   construct them.
//! - **Name**: the cache key of an entry. A name often coincides with its
//!   type identifier, but any string works.
//! - **Type identifier**: names the factory used to construct an instance on
//!   a cache miss. Factories are registered explicitly with
//!   [`Registry::add_type`]; an unregistered identifier is simply not
//!   constructible.
//! - **Default registry**: a process-wide registry, lazily created on first
//!   access via [`default_registry`], for callers that want static-style
//!   access. The [`resolve!`] macro is panicking sugar over it.
//!
//! ## Quick Start
//!
//! ```
//! use once_registry::Registry;
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! fn main() {
//!     let registry = Registry::new();
//!
//!     // Register the factory for the type identifier "Database".
//!     registry.add_type("Database", || Database {
//!         url: "postgres://localhost".into(),
//!     });
//!
//!     // The first lookup constructs the instance, the second reuses it.
//!     let first = registry.get::<Database>("Database").unwrap();
//!     let second = registry.get::<Database>("Database").unwrap();
//!     assert!(Arc::ptr_eq(&first, &second));
//!
//!     // A second name constructed from the same type is its own entry.
//!     let replica = registry.get_as::<Database>("Replica", "Database").unwrap();
//!     assert!(!Arc::ptr_eq(&first, &replica));
//!     assert_eq!(replica.url, "postgres://localhost");
//!
//!     // Force-recreate discards the cached instance and constructs anew.
//!     registry.recreate("Database");
//!     let third = registry.get::<Database>("Database").unwrap();
//!     assert!(!Arc::ptr_eq(&first, &third));
//!
//!     // Explicit removal empties the slot without reconstruction.
//!     registry.remove("Replica");
//!     assert!(!registry.exists("Replica"));
//! }
//! ```

mod core;
mod error;
mod global;
mod macros;
mod registry;

pub use crate::core::Instance;
pub use error::ResolveError;
pub use global::{default_registry, static_resolve};
pub use registry::{Registry, ResolveMode};
