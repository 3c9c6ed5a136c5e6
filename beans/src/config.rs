// beans/src/config.rs

use serde::Deserialize;

fn default_allow_circular_references() -> bool {
  true
}

/// Container-wide resolution settings.
///
/// Can be given programmatically or through the `settings` section of a
/// declaration file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContainerConfig {
  /// Hand out early (not yet populated) references to break cycles.
  ///
  /// When disabled, a mutual reference fails the load with `CircularReference`.
  #[serde(default = "default_allow_circular_references")]
  pub allow_circular_references: bool,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      allow_circular_references: default_allow_circular_references(),
    }
  }
}
