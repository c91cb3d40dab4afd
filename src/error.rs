//! Error types for registry operations.

use thiserror::Error;

/// Errors surfaced by the strict resolution path.
///
/// The loose paths ([`Registry::resolve`](crate::Registry::resolve) and the
/// typed adapters built on it) flatten every one of these into `None` so that
/// a failure is indistinguishable from an ordinary miss, which is what loose
/// callers expect. The flattened reason is emitted on the `log` facade at
/// debug level; callers that need to tell "no such entry" apart from a real
/// failure use [`Registry::try_resolve`](crate::Registry::try_resolve).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
  /// No factory has been registered under the requested type identifier.
  #[error("no constructible type registered under id `{0}`")]
  TypeNotFound(String),

  /// The instance name was empty. Every cache slot needs a name.
  #[error("instance name must not be empty")]
  EmptyName,

  /// The registry has been closed and no longer serves instances.
  #[error("registry is closed")]
  Closed,
}
