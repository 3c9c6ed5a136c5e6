//! Property population: writes literal and referenced values into a freshly
//! constructed bean, recursing into the resolver for references.

use crate::definition::{ComponentDefinition, PropertyValue};
use crate::descriptor::{FieldValue, Instance, TypeDescriptor};
use crate::error::{Error, Origin, Result};
use crate::resolver::Resolver;
use tracing::trace;

impl<'a> Resolver<'a> {
  /// Assigns every property of `definition` onto `instance`, in order.
  ///
  /// Each value is computed before the instance is locked for the write, so no
  /// lock is held while a reference recurses into resolution.
  pub(crate) fn populate(
    &mut self,
    definition: &'a ComponentDefinition,
    descriptor: &'a TypeDescriptor,
    instance: &Instance,
  ) -> Result<()> {
    for assignment in &definition.properties {
      let setter = descriptor
        .setter(&assignment.name)
        .ok_or_else(|| Error::UnknownField {
          id: definition.id.clone(),
          type_name: definition.type_name.clone(),
          field: assignment.name.clone(),
        })?;

      let value = match &assignment.value {
        PropertyValue::Literal(text) => FieldValue::Literal(text.clone()),
        PropertyValue::Reference(target) => {
          FieldValue::Bean(self.resolve_reference(definition, &assignment.name, target)?)
        }
      };

      setter(instance, value).map_err(|mismatch| Error::TypeMismatch {
        id: definition.id.clone(),
        field: assignment.name.clone(),
        expected: mismatch.expected,
        found: mismatch.found,
      })?;
      trace!(bean = %definition.id, field = %assignment.name, "property assigned");
    }
    Ok(())
  }

  fn resolve_reference(
    &mut self,
    owner: &ComponentDefinition,
    field: &str,
    target: &str,
  ) -> Result<Instance> {
    if let Some(ready) = self.cache.get_ready(target) {
      return Ok(ready.clone());
    }
    let registry = self.registry;
    let definition = registry.get(target).ok_or_else(|| Error::UnknownIdentity {
      id: target.to_string(),
      origin: Origin::Property {
        bean: owner.id.clone(),
        field: field.to_string(),
      },
    })?;
    self.resolve(definition)
  }
}
