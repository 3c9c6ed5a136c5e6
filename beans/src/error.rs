use std::fmt;
use thiserror::Error;

/// Where a dangling identity was encountered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
  /// A direct registry lookup, e.g. from the load driver.
  Lookup,
  /// A reference-valued property of another bean.
  Property { bean: String, field: String },
}

impl fmt::Display for Origin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Origin::Lookup => write!(f, "registry lookup"),
      Origin::Property { bean, field } => {
        write!(f, "property '{}' of bean '{}'", field, bean)
      }
    }
  }
}

/// The main error type for the `fibre_beans` library.
///
/// Every variant aborts the whole load; there is no partial-success mode.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Unknown bean identity '{id}' (referenced by {origin})")]
  UnknownIdentity { id: String, origin: Origin },

  #[error("Failed to instantiate bean '{id}' of type '{type_name}': {reason}")]
  InstantiationFailure {
    id: String,
    type_name: String,
    reason: String,
  },

  #[error("Bean '{id}': type '{type_name}' has no assignable field '{field}'")]
  UnknownField {
    id: String,
    type_name: String,
    field: String,
  },

  #[error("Bean '{id}': field '{field}' expects {expected}, got {found}")]
  TypeMismatch {
    id: String,
    field: String,
    expected: String,
    found: String,
  },

  #[error("Bean identity '{0}' is declared more than once")]
  DuplicateIdentity(String),

  #[error("Circular reference while creating bean '{id}': {chain}")]
  CircularReference { id: String, chain: String },

  #[error("Invalid definition for bean '{id}': {message}")]
  InvalidDefinition { id: String, message: String },

  #[error("Failed to read declaration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse declarations: {0}")]
  ConfigParse(String),

  #[error("Unsupported declaration format: {0}")]
  UnsupportedFormat(String),
}

/// A specialized `Result` type for `fibre_beans` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
