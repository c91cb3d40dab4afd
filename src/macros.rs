//! Public macros for ergonomic instance resolution.

/// Resolves an instance from the process-wide default registry.
///
/// This macro is sugar for callers that treat a missing instance as a bug:
/// it panics when nothing can be produced. For the non-panicking form, use
/// [`default_registry()`](crate::default_registry) and its methods directly.
///
/// Two arms are provided. The single-argument arm returns the untyped
/// [`Instance`](crate::Instance); the two-argument arm downcasts to the
/// given type. Both use the name as the type identifier, which covers the
/// common case where a slot is named after its type; use
/// [`Registry::get_as`](crate::Registry::get_as) when the two differ.
///
/// # Panics
///
/// Panics if no instance can be produced for the name, or if the cached
/// instance is not of the requested type.
///
/// # Examples
///
/// ```
/// use once_registry::{default_registry, resolve};
///
/// struct Settings {
///   verbose: bool,
/// }
///
/// default_registry().add_type("Settings", || Settings { verbose: true });
///
/// // Typed resolution.
/// let settings = resolve!(Settings, "Settings");
/// assert!(settings.verbose);
///
/// // Untyped resolution returns the opaque instance.
/// let raw = resolve!("Settings");
/// assert!(raw.downcast::<Settings>().is_ok());
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for untyped resolution: resolve!("name")
  ($name:expr) => {
    $crate::default_registry()
      .instance($name)
      .unwrap_or_else(|| panic!("failed to resolve required instance `{}`", $name))
  };

  // Arm for typed resolution: resolve!(MyType, "name")
  ($type:ty, $name:expr) => {
    $crate::default_registry()
      .get::<$type>($name)
      .unwrap_or_else(|| {
        panic!(
          "failed to resolve required instance `{}` as {}",
          $name,
          std::any::type_name::<$type>()
        )
      })
  };
}
