//! The main `Container` struct and its builder.

use crate::cache::InstanceCache;
use crate::config::ContainerConfig;
use crate::definition::ComponentDefinition;
use crate::descriptor::{Instance, Shared, TypeRegistry};
use crate::error::{Error, Result};
use crate::loader;
use crate::registry::DefinitionRegistry;
use crate::resolver::Resolver;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::any::{self, Any};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A fully loaded bean container.
///
/// A `Container` only exists once every declared bean has been constructed
/// and populated; loading is all-or-nothing. After that the ready beans can be
/// read from any number of threads.
#[derive(Debug)]
pub struct Container {
  registry: DefinitionRegistry,
  ready: DashMap<String, Instance>,
  // Ids seeded through `ContainerBuilder::instance`, in insertion order.
  seeded: Vec<String>,
}

impl Container {
  /// Starts building a container.
  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::default()
  }

  /// Loads `definitions` with default settings.
  pub fn load(
    definitions: impl IntoIterator<Item = ComponentDefinition>,
    types: TypeRegistry,
  ) -> Result<Self> {
    Self::builder().types(types).definitions(definitions).build()
  }

  /// Loads a YAML or JSON declaration file, honouring its `settings` section.
  pub fn from_file(path: impl AsRef<Path>, types: TypeRegistry) -> Result<Self> {
    let declarations = loader::load_file(path.as_ref())?;
    Self::builder()
      .types(types)
      .config(declarations.config)
      .definitions(declarations.definitions)
      .build()
  }

  // --- Lookup ---

  /// Returns the bean registered under `id`, or `None` if there is none.
  pub fn get_bean(&self, id: &str) -> Option<Instance> {
    self.ready.get(id).map(|entry| entry.value().clone())
  }

  /// Returns a typed handle to the bean under `id`.
  ///
  /// `None` if the bean is absent or is not a `T`.
  pub fn get<T: Any + Send + Sync>(&self, id: &str) -> Option<Shared<T>> {
    self.get_bean(id)?.downcast::<T>()
  }

  pub fn contains_bean(&self, id: &str) -> bool {
    self.ready.contains_key(id)
  }

  /// The definition a bean was created from. Seeded instances have none.
  pub fn definition(&self, id: &str) -> Option<&ComponentDefinition> {
    self.registry.get(id)
  }

  /// Bean ids in declaration order, followed by seeded instances.
  pub fn bean_ids(&self) -> impl Iterator<Item = &str> {
    self
      .registry
      .iter()
      .map(|d| d.id.as_str())
      .chain(self.seeded.iter().map(String::as_str))
  }

  pub fn len(&self) -> usize {
    self.ready.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ready.is_empty()
  }
}

/// Collects types, definitions and settings, then loads them in one go.
#[derive(Default)]
pub struct ContainerBuilder {
  types: TypeRegistry,
  definitions: Vec<ComponentDefinition>,
  instances: Vec<(String, Instance)>,
  config: ContainerConfig,
}

impl ContainerBuilder {
  pub fn types(mut self, types: TypeRegistry) -> Self {
    self.types = types;
    self
  }

  pub fn definitions(mut self, definitions: impl IntoIterator<Item = ComponentDefinition>) -> Self {
    self.definitions.extend(definitions);
    self
  }

  pub fn definition(mut self, definition: ComponentDefinition) -> Self {
    self.definitions.push(definition);
    self
  }

  pub fn config(mut self, config: ContainerConfig) -> Self {
    self.config = config;
    self
  }

  pub fn allow_circular_references(mut self, allow: bool) -> Self {
    self.config.allow_circular_references = allow;
    self
  }

  /// Seeds a pre-built singleton that definitions may reference by `id`.
  pub fn instance<T: Any + Send + Sync>(self, id: impl Into<String>, value: T) -> Self {
    self.shared_instance(id, Arc::new(RwLock::new(value)))
  }

  /// Seeds an existing shared handle; the container hands out this very object.
  pub fn shared_instance<T: Any + Send + Sync>(mut self, id: impl Into<String>, shared: Shared<T>) -> Self {
    self
      .instances
      .push((id.into(), Instance::from_shared(any::type_name::<T>(), shared)));
    self
  }

  /// Registers every definition and resolves all of them.
  ///
  /// Either every bean ends up ready or an error is returned and nothing is
  /// exposed.
  pub fn build(self) -> Result<Container> {
    info!(
      definitions = self.definitions.len(),
      seeded = self.instances.len(),
      "loading bean container"
    );

    let mut registry = DefinitionRegistry::new();
    registry.register(self.definitions)?;

    let mut cache = InstanceCache::new();
    let mut seeded = Vec::with_capacity(self.instances.len());
    for (id, instance) in self.instances {
      if registry.contains(&id) || seeded.contains(&id) {
        return Err(Error::DuplicateIdentity(id));
      }
      cache.seed_ready(id.clone(), instance);
      seeded.push(id);
    }

    let ready = Resolver::new(&registry, &self.types, cache, &self.config).resolve_all()?;
    info!(beans = ready.len(), "bean container ready");

    Ok(Container {
      registry,
      ready: ready.into_iter().collect(),
      seeded,
    })
  }
}
