//! Type descriptors: the capability table that lets the container construct a
//! bean by type name and assign its fields by declared name.

use parking_lot::RwLock;
use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Shared, interior-mutable handle to a bean of concrete type `T`.
///
/// Reference-valued fields hold a `Shared<R>`. Because a bean may be handed
/// out before its own fields are populated (to break a cycle), writes made
/// after the handout are visible through every clone of the handle.
pub type Shared<T> = Arc<RwLock<T>>;

/// A type-erased bean instance.
///
/// Cloning is cheap and yields a handle to the same object.
#[derive(Clone)]
pub struct Instance {
  type_name: Arc<str>,
  value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
  /// Wraps a freshly constructed value.
  pub fn new<T: Any + Send + Sync>(type_name: impl Into<Arc<str>>, value: T) -> Self {
    Self::from_shared(type_name, Arc::new(RwLock::new(value)))
  }

  /// Wraps an existing shared handle without copying the value.
  pub fn from_shared<T: Any + Send + Sync>(type_name: impl Into<Arc<str>>, shared: Shared<T>) -> Self {
    Self {
      type_name: type_name.into(),
      value: shared,
    }
  }

  /// The registered type name this instance was constructed from.
  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn is<T: Any + Send + Sync>(&self) -> bool {
    self.value.is::<RwLock<T>>()
  }

  /// Returns a typed handle if the instance is a `T`.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Shared<T>> {
    self.value.clone().downcast::<RwLock<T>>().ok()
  }

  /// Object identity, not content equality.
  pub fn ptr_eq(&self, other: &Instance) -> bool {
    self.addr() == other.addr()
  }

  /// True if `shared` points at this very instance.
  pub fn is_same<T: Any + Send + Sync>(&self, shared: &Shared<T>) -> bool {
    self.addr() == Arc::as_ptr(shared) as *const ()
  }

  // Write-locks the value for the duration of `f`. `None` if the type differs.
  pub(crate) fn with_mut<T: Any + Send + Sync, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    let lock = self.value.downcast_ref::<RwLock<T>>()?;
    let mut guard = lock.write();
    Some(f(&mut guard))
  }

  fn addr(&self) -> *const () {
    Arc::as_ptr(&self.value) as *const ()
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance")
      .field("type_name", &self.type_name)
      .field("addr", &self.addr())
      .finish()
  }
}

/// A value ready to be written into a field.
pub(crate) enum FieldValue {
  Literal(String),
  Bean(Instance),
}

/// A setter rejected the value it was given.
#[derive(Debug)]
pub(crate) struct Mismatch {
  pub(crate) expected: String,
  pub(crate) found: String,
}

type Constructor = Box<dyn Fn() -> Result<Instance, String> + Send + Sync>;
pub(crate) type Setter = Box<dyn Fn(&Instance, FieldValue) -> Result<(), Mismatch> + Send + Sync>;

/// Describes how to build a type and which fields can be assigned by name.
///
/// A descriptor without a constructor models an abstract type: it can be
/// registered but any attempt to instantiate it fails.
pub struct TypeDescriptor {
  name: String,
  constructor: Option<Constructor>,
  fields: HashMap<String, Setter>,
}

impl TypeDescriptor {
  /// Starts a descriptor for `T`, registered under `name`.
  pub fn builder<T: Any + Send + Sync>(name: impl Into<String>) -> DescriptorBuilder<T> {
    DescriptorBuilder {
      name: name.into(),
      constructor: None,
      fields: HashMap::new(),
      _marker: PhantomData,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_abstract(&self) -> bool {
    self.constructor.is_none()
  }

  pub fn has_field(&self, field: &str) -> bool {
    self.fields.contains_key(field)
  }

  pub fn field_names(&self) -> impl Iterator<Item = &str> {
    self.fields.keys().map(String::as_str)
  }

  /// Builds a bare, unpopulated instance.
  pub(crate) fn instantiate(&self) -> Result<Instance, String> {
    match &self.constructor {
      Some(constructor) => constructor(),
      None => Err("type is abstract or has no no-argument constructor".to_string()),
    }
  }

  pub(crate) fn setter(&self, field: &str) -> Option<&Setter> {
    self.fields.get(field)
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut fields: Vec<&str> = self.field_names().collect();
    fields.sort_unstable();
    f.debug_struct("TypeDescriptor")
      .field("name", &self.name)
      .field("abstract", &self.is_abstract())
      .field("fields", &fields)
      .finish()
  }
}

/// Builder for a [`TypeDescriptor`] of concrete type `T`.
pub struct DescriptorBuilder<T> {
  name: String,
  constructor: Option<Constructor>,
  fields: HashMap<String, Setter>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> DescriptorBuilder<T> {
  /// Constructs instances with `T::default()`.
  pub fn default_constructor(self) -> Self
  where
    T: Default,
  {
    self.constructor(|| Ok(T::default()))
  }

  /// Constructs instances with a fallible no-argument constructor.
  pub fn constructor<F>(mut self, constructor: F) -> Self
  where
    F: Fn() -> Result<T, String> + Send + Sync + 'static,
  {
    let type_name: Arc<str> = Arc::from(self.name.as_str());
    self.constructor = Some(Box::new(move || {
      constructor().map(|value| Instance::new(type_name.clone(), value))
    }));
    self
  }

  /// Declares a field that accepts a literal string.
  pub fn literal<F>(mut self, field: &str, assign: F) -> Self
  where
    F: Fn(&mut T, String) + Send + Sync + 'static,
  {
    let owner = self.name.clone();
    let setter: Setter = Box::new(move |instance: &Instance, value: FieldValue| match value {
      FieldValue::Literal(text) => instance
        .with_mut(|target: &mut T| assign(target, text))
        .ok_or_else(|| owner_mismatch(&owner, instance)),
      FieldValue::Bean(bean) => Err(Mismatch {
        expected: "a literal string".to_string(),
        found: format!("a reference to bean of type '{}'", bean.type_name()),
      }),
    });
    self.fields.insert(field.to_string(), setter);
    self
  }

  /// Declares a field that accepts a reference to a bean of type `R`.
  pub fn reference<R, F>(mut self, field: &str, assign: F) -> Self
  where
    R: Any + Send + Sync,
    F: Fn(&mut T, Shared<R>) + Send + Sync + 'static,
  {
    let owner = self.name.clone();
    let setter: Setter = Box::new(move |instance: &Instance, value: FieldValue| match value {
      FieldValue::Bean(bean) => {
        let shared = bean.downcast::<R>().ok_or_else(|| Mismatch {
          expected: format!("a reference to {}", any::type_name::<R>()),
          found: format!("a reference to bean of type '{}'", bean.type_name()),
        })?;
        instance
          .with_mut(|target: &mut T| assign(target, shared))
          .ok_or_else(|| owner_mismatch(&owner, instance))
      }
      FieldValue::Literal(text) => Err(Mismatch {
        expected: format!("a reference to {}", any::type_name::<R>()),
        found: format!("literal \"{}\"", text),
      }),
    });
    self.fields.insert(field.to_string(), setter);
    self
  }

  pub fn build(self) -> TypeDescriptor {
    TypeDescriptor {
      name: self.name,
      constructor: self.constructor,
      fields: self.fields,
    }
  }
}

fn owner_mismatch(owner: &str, instance: &Instance) -> Mismatch {
  Mismatch {
    expected: format!("an instance of '{}'", owner),
    found: format!("an instance of '{}'", instance.type_name()),
  }
}

/// Type name → descriptor table consulted when instantiating beans.
#[derive(Debug, Default)]
pub struct TypeRegistry {
  types: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a descriptor, replacing any previous one with the same name.
  pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
    self.types.insert(descriptor.name.clone(), descriptor);
    self
  }

  pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
    self.register(descriptor);
    self
  }

  pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
    self.types.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.types.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Engine {
    model: String,
  }

  #[derive(Default)]
  struct Car {
    name: String,
    engine: Option<Shared<Engine>>,
  }

  fn car_descriptor() -> TypeDescriptor {
    TypeDescriptor::builder::<Car>("Car")
      .default_constructor()
      .literal("name", |c, v| c.name = v)
      .reference("engine", |c: &mut Car, e: Shared<Engine>| c.engine = Some(e))
      .build()
  }

  #[test]
  fn literal_and_reference_setters_write_through() {
    let car = car_descriptor().instantiate().unwrap();
    let engine = Instance::new("Engine", Engine { model: "V8".into() });

    let d = car_descriptor();
    (d.setter("name").unwrap())(&car, FieldValue::Literal("roadster".into())).unwrap();
    (d.setter("engine").unwrap())(&car, FieldValue::Bean(engine.clone())).unwrap();

    let car = car.downcast::<Car>().unwrap();
    let car = car.read();
    assert_eq!(car.name, "roadster");
    let held = car.engine.as_ref().unwrap();
    assert!(engine.is_same(held));
    assert_eq!(held.read().model, "V8");
  }

  #[test]
  fn reference_of_wrong_type_is_a_mismatch() {
    let d = car_descriptor();
    let car = d.instantiate().unwrap();
    let not_an_engine = Instance::new("Car", Car::default());

    let err = (d.setter("engine").unwrap())(&car, FieldValue::Bean(not_an_engine)).unwrap_err();
    assert!(err.found.contains("'Car'"));
  }

  #[test]
  fn literal_into_reference_field_is_a_mismatch() {
    let d = car_descriptor();
    let car = d.instantiate().unwrap();
    assert!((d.setter("engine").unwrap())(&car, FieldValue::Literal("V8".into())).is_err());
  }

  #[test]
  fn descriptor_without_constructor_is_abstract() {
    let d = TypeDescriptor::builder::<Engine>("Engine")
      .literal("model", |e, v| e.model = v)
      .build();
    assert!(d.is_abstract());
    assert!(d.instantiate().is_err());
    assert!(d.has_field("model"));
  }

  #[test]
  fn clones_share_identity() {
    let a = Instance::new("Engine", Engine::default());
    let b = a.clone();
    let c = Instance::new("Engine", Engine::default());
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&c));
    assert!(a.is::<Engine>());
    assert!(!a.is::<Car>());
  }
}
