//! Normalized bean definitions, as produced by a loader.

use crate::error::{Error, Result};

/// The value side of a property assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
  /// A literal string assigned as-is. No coercion is performed.
  Literal(String),
  /// The identity of another bean.
  Reference(String),
}

/// A single `field = value` assignment on a bean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAssignment {
  pub name: String,
  pub value: PropertyValue,
}

impl PropertyAssignment {
  pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: PropertyValue::Literal(value.into()),
    }
  }

  pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: PropertyValue::Reference(target.into()),
    }
  }

  /// Builds an assignment from the raw `value`/`ref` attribute pair of a declaration.
  ///
  /// A non-empty literal takes precedence over a reference. An assignment with
  /// neither is rejected.
  pub fn from_parts(
    bean_id: &str,
    name: impl Into<String>,
    value: Option<String>,
    reference: Option<String>,
  ) -> Result<Self> {
    let name = name.into();
    match (value, reference) {
      (Some(v), _) if !v.is_empty() => Ok(Self::literal(name, v)),
      (_, Some(r)) if !r.is_empty() => Ok(Self::reference(name, r)),
      _ => Err(Error::InvalidDefinition {
        id: bean_id.to_string(),
        message: format!("property '{}' has neither a value nor a ref", name),
      }),
    }
  }

  /// The referenced identity, if this is a reference assignment.
  pub fn target(&self) -> Option<&str> {
    match &self.value {
      PropertyValue::Reference(id) => Some(id),
      PropertyValue::Literal(_) => None,
    }
  }
}

/// A declared bean: identity, concrete type name and ordered property assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefinition {
  pub id: String,
  pub type_name: String,
  pub properties: Vec<PropertyAssignment>,
}

impl ComponentDefinition {
  pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      type_name: type_name.into(),
      properties: Vec::new(),
    }
  }

  /// Appends a literal assignment.
  pub fn literal(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.properties.push(PropertyAssignment::literal(name, value));
    self
  }

  /// Appends a reference assignment.
  pub fn reference(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
    self.properties.push(PropertyAssignment::reference(name, target));
    self
  }

  pub fn property(mut self, assignment: PropertyAssignment) -> Self {
    self.properties.push(assignment);
    self
  }

  /// Identities this definition refers to, in assignment order.
  pub fn references(&self) -> impl Iterator<Item = &str> {
    self.properties.iter().filter_map(PropertyAssignment::target)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn literal_takes_precedence_over_reference() {
    let p = PropertyAssignment::from_parts(
      "user",
      "name",
      Some("alice".to_string()),
      Some("role".to_string()),
    )
    .unwrap();
    assert_eq!(p.value, PropertyValue::Literal("alice".to_string()));
  }

  #[test]
  fn empty_literal_falls_back_to_reference() {
    let p = PropertyAssignment::from_parts(
      "user",
      "role",
      Some(String::new()),
      Some("role".to_string()),
    )
    .unwrap();
    assert_eq!(p.value, PropertyValue::Reference("role".to_string()));
  }

  #[test]
  fn missing_value_and_reference_is_rejected() {
    let err = PropertyAssignment::from_parts("user", "role", None, Some(String::new())).unwrap_err();
    assert!(matches!(err, Error::InvalidDefinition { ref id, .. } if id == "user"));
  }

  #[test]
  fn references_lists_only_reference_targets() {
    let def = ComponentDefinition::new("user", "User")
      .literal("id", "1")
      .reference("role", "admin")
      .reference("manager", "boss");
    let refs: Vec<&str> = def.references().collect();
    assert_eq!(refs, vec!["admin", "boss"]);
  }
}
