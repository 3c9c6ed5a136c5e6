//! Public macros for ergonomic bean lookup.

/// Looks up a typed bean in a loaded container.
///
/// # Panics
///
/// Panics if no bean is registered under the id or if it is not of the
/// requested type. For a non-panicking version, use `Container::get` directly.
///
/// # Examples
///
/// ```
/// use fibre_beans::{bean, ComponentDefinition, Container, TypeDescriptor, TypeRegistry};
///
/// #[derive(Default)]
/// struct Greeter {
///   message: String,
/// }
///
/// let types = TypeRegistry::new().with(
///   TypeDescriptor::builder::<Greeter>("Greeter")
///     .default_constructor()
///     .literal("message", |g, v| g.message = v)
///     .build(),
/// );
/// let container = Container::load(
///   vec![ComponentDefinition::new("greeter", "Greeter").literal("message", "Hello!")],
///   types,
/// )
/// .unwrap();
///
/// let greeter = bean!(container, Greeter, "greeter");
/// assert_eq!(greeter.read().message, "Hello!");
/// ```
#[macro_export]
macro_rules! bean {
  ($container:expr, $type:ty, $id:expr) => {
    $container.get::<$type>($id).unwrap_or_else(|| {
      panic!(
        "Failed to resolve required bean '{}' as {}",
        $id,
        std::any::type_name::<$type>()
      )
    })
  };
}
