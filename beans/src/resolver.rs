//! Bean resolution: early-reference lookup, construction and commit.
//!
//! Resolution is single-threaded and depth-first. When bean `a` is being
//! populated and one of its references leads back to `a`, the lookup finds the
//! not-yet-populated instance `a` published before population started and hands
//! it out as an early reference. That reference is the correct object, but the
//! fields `a` had not reached yet are still at their constructed defaults at
//! the moment of handout; they become visible through the same handle once `a`
//! finishes populating.

use crate::cache::InstanceCache;
use crate::config::ContainerConfig;
use crate::definition::ComponentDefinition;
use crate::descriptor::{Instance, TypeDescriptor, TypeRegistry};
use crate::error::{Error, Result};
use crate::registry::DefinitionRegistry;
use std::collections::HashMap;
use tracing::{debug, trace};

pub(crate) struct Resolver<'a> {
  pub(crate) registry: &'a DefinitionRegistry,
  types: &'a TypeRegistry,
  pub(crate) cache: InstanceCache,
  allow_early: bool,
  // Identities under construction, outermost first.
  creating: Vec<&'a str>,
}

impl<'a> Resolver<'a> {
  pub(crate) fn new(
    registry: &'a DefinitionRegistry,
    types: &'a TypeRegistry,
    cache: InstanceCache,
    config: &ContainerConfig,
  ) -> Self {
    Self {
      registry,
      types,
      cache,
      allow_early: config.allow_circular_references,
      creating: Vec::new(),
    }
  }

  /// Walks every definition in declaration order and returns the ready tier.
  pub(crate) fn resolve_all(mut self) -> Result<HashMap<String, Instance>> {
    let registry = self.registry;
    for definition in registry.iter() {
      self.resolve(definition)?;
    }
    Ok(self.cache.into_ready())
  }

  /// Returns a usable instance for `definition`, creating it if needed.
  ///
  /// A bean still under construction is returned as an early reference.
  pub(crate) fn resolve(&mut self, definition: &'a ComponentDefinition) -> Result<Instance> {
    if let Some(early) = self.cache.get_early_or_factory(&definition.id, self.allow_early) {
      debug!(
        bean = %definition.id,
        "returning early reference to bean that is not fully populated yet"
      );
      return Ok(early);
    }
    self.obtain_or_create(definition)
  }

  fn obtain_or_create(&mut self, definition: &'a ComponentDefinition) -> Result<Instance> {
    if let Some(ready) = self.cache.get_ready(&definition.id) {
      trace!(bean = %definition.id, "ready cache hit");
      return Ok(ready.clone());
    }
    let instance = self.construct(definition)?;
    self.cache.commit_ready(&definition.id, instance.clone());
    debug!(bean = %definition.id, "bean ready");
    Ok(instance)
  }

  fn construct(&mut self, definition: &'a ComponentDefinition) -> Result<Instance> {
    let id = definition.id.as_str();
    if !self.cache.start_creation(id) {
      return Err(Error::CircularReference {
        id: id.to_string(),
        chain: self.chain_back_to(id),
      });
    }
    self.creating.push(id);
    debug!(bean = id, type_name = %definition.type_name, "creating bean");

    let descriptor = self.descriptor_for(definition)?;
    let instance = descriptor
      .instantiate()
      .map_err(|reason| Error::InstantiationFailure {
        id: id.to_string(),
        type_name: definition.type_name.clone(),
        reason,
      })?;

    if self.cache.get_ready(id).is_none() {
      self.cache.publish_factory(id, instance.clone());
    }

    self.populate(definition, descriptor, &instance)?;
    self.creating.pop();
    Ok(instance)
  }

  fn descriptor_for(&self, definition: &ComponentDefinition) -> Result<&'a TypeDescriptor> {
    let types = self.types;
    types
      .get(&definition.type_name)
      .ok_or_else(|| Error::InstantiationFailure {
        id: definition.id.clone(),
        type_name: definition.type_name.clone(),
        reason: "no type is registered under this name".to_string(),
      })
  }

  // "a -> b -> a" for a re-entry of `a`.
  fn chain_back_to(&self, id: &str) -> String {
    let start = self
      .creating
      .iter()
      .position(|creating| *creating == id)
      .unwrap_or(0);
    let mut chain: Vec<&str> = self.creating[start..].to_vec();
    chain.push(id);
    chain.join(" -> ")
  }
}
