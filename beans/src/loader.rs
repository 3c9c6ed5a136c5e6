//! Reads bean declarations from YAML or JSON into normalized definitions.
//!
//! ```yaml
//! settings:
//!   allow_circular_references: true
//! beans:
//!   - id: user
//!     class: example.User
//!     properties:
//!       - { name: id, value: "1" }
//!       - { name: role, ref: role }
//! ```

use crate::config::ContainerConfig;
use crate::definition::{ComponentDefinition, PropertyAssignment};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

// --- Raw declaration structure ---

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct DeclarationsRaw {
  #[serde(default)]
  settings: ContainerConfig,
  #[serde(default)]
  beans: Vec<BeanRaw>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct BeanRaw {
  id: String,
  class: String,
  #[serde(default)]
  properties: Vec<PropertyRaw>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct PropertyRaw {
  name: String,
  #[serde(default)]
  value: Option<String>,
  #[serde(default, rename = "ref")]
  reference: Option<String>,
}

// --- Processed output ---

/// The result of loading a declaration source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Declarations {
  pub config: ContainerConfig,
  pub definitions: Vec<ComponentDefinition>,
}

fn process(raw: DeclarationsRaw) -> Result<Declarations> {
  let definitions = raw
    .beans
    .into_iter()
    .map(|bean| {
      if bean.id.is_empty() {
        return Err(Error::InvalidDefinition {
          id: bean.id,
          message: "bean id must not be empty".to_string(),
        });
      }
      let properties = bean
        .properties
        .into_iter()
        .map(|p| PropertyAssignment::from_parts(&bean.id, p.name, p.value, p.reference))
        .collect::<Result<Vec<_>>>()?;
      Ok(ComponentDefinition {
        id: bean.id,
        type_name: bean.class,
        properties,
      })
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(Declarations {
    config: raw.settings,
    definitions,
  })
}

/// Parses YAML declarations.
pub fn parse_yaml(source: &str) -> Result<Declarations> {
  let raw: DeclarationsRaw =
    serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))?;
  process(raw)
}

/// Parses JSON declarations.
pub fn parse_json(source: &str) -> Result<Declarations> {
  let raw: DeclarationsRaw =
    serde_json::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))?;
  process(raw)
}

/// Loads declarations from a file, choosing the format by extension.
///
/// `.yaml`/`.yml` are read as YAML, `.json` as JSON.
pub fn load_file(path: &Path) -> Result<Declarations> {
  let extension = path
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase);
  let parse: fn(&str) -> Result<Declarations> = match extension.as_deref() {
    Some("yaml") | Some("yml") => parse_yaml,
    Some("json") => parse_json,
    _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
  };

  let source = fs::read_to_string(path)?;
  let declarations = parse(&source)?;
  info!(
    path = %path.display(),
    beans = declarations.definitions.len(),
    "loaded bean declarations"
  );
  Ok(declarations)
}
