
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnumfieldError {
    #[error("Enum '{field}' declared without values")]
    EmptyValues { field: String },
    #[error("Field '{field}' is already registered on this schema")]
    DuplicateField { field: String },
    #[error("Generated name '{name}' collides with an existing one")]
    MethodCollision { name: String },
    #[error("No method '{method}' is defined on this schema")]
    UnknownMethod { method: String },
    #[error("No scope '{scope}' is defined on this schema")]
    UnknownScope { scope: String },
    #[error("Record failed validation with {} error(s)", .errors.len())]
    Invalid { errors: Vec<ValidationError> },
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, EnumfieldError>;

// Helper conversions
impl From<rusqlite::Error> for EnumfieldError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}

/// A single validation failure, reported against the storage field name.
///
/// Validation failures are collected and returned, never raised: an invalid
/// record is a value the caller inspects, not an aborted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub kind: ValidationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationKind {
    /// A required scalar field holds no value.
    Missing,
    /// A value (or sequence element) outside the declared set.
    NotInSet { value: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ValidationKind::Missing => write!(f, "{} is required", self.field),
            ValidationKind::NotInSet { value } => {
                write!(f, "{} is not a declared value for {}", value, self.field)
            }
        }
    }
}
