//! The definition registry: declaration order plus an identity index.

use crate::definition::ComponentDefinition;
use crate::error::{Error, Origin, Result};
use std::collections::HashMap;

/// Holds every definition in declaration order, indexed by identity.
///
/// Populated once; never mutated during resolution.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
  definitions: Vec<ComponentDefinition>,
  index: HashMap<String, usize>,
}

impl DefinitionRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `definitions` in order and indexes them by identity.
  ///
  /// Fails with `DuplicateIdentity` if an identity is already present.
  pub fn register(
    &mut self,
    definitions: impl IntoIterator<Item = ComponentDefinition>,
  ) -> Result<()> {
    for definition in definitions {
      if self.index.contains_key(&definition.id) {
        return Err(Error::DuplicateIdentity(definition.id));
      }
      self
        .index
        .insert(definition.id.clone(), self.definitions.len());
      self.definitions.push(definition);
    }
    Ok(())
  }

  /// Looks up a definition, failing loudly if it is absent.
  pub fn lookup(&self, id: &str) -> Result<&ComponentDefinition> {
    self.get(id).ok_or_else(|| Error::UnknownIdentity {
      id: id.to_string(),
      origin: Origin::Lookup,
    })
  }

  pub fn get(&self, id: &str) -> Option<&ComponentDefinition> {
    self.index.get(id).map(|&i| &self.definitions[i])
  }

  pub fn contains(&self, id: &str) -> bool {
    self.index.contains_key(id)
  }

  /// Iterates definitions in declaration order.
  pub fn iter(&self) -> std::slice::Iter<'_, ComponentDefinition> {
    self.definitions.iter()
  }

  pub fn len(&self) -> usize {
    self.definitions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.definitions.is_empty()
  }
}
