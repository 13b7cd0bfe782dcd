//! Validation rules attached by the declaration engine.
//!
//! Validators report structured failures through the schema's collection
//! mechanism; they never abort. An invalid record is simply a record whose
//! error list is non-empty.

use std::fmt;
use std::sync::Arc;

use crate::error::{ValidationError, ValidationKind};
use crate::schema::{EnumDeclaration, Record};
use crate::symbol::FieldValue;

/// The capability contract a schema invokes during full-record validation.
pub trait FieldValidator: fmt::Debug + Send + Sync {
    // static tag for introspection, mirroring the declared rule
    fn kind(&self) -> &'static str;
    fn validate(&self, record: &Record) -> Vec<ValidationError>;
}

// ------------- InclusionValidator -------------
/// Scalar rule: the field must hold one of the declared values, or be
/// absent when the declaration is not required.
#[derive(Debug)]
pub struct InclusionValidator {
    declaration: Arc<EnumDeclaration>,
}
impl InclusionValidator {
    pub const KIND: &'static str = "inclusion";

    pub fn new(declaration: Arc<EnumDeclaration>) -> Self {
        Self { declaration }
    }
}
impl FieldValidator for InclusionValidator {
    fn kind(&self) -> &'static str {
        Self::KIND
    }
    fn validate(&self, record: &Record) -> Vec<ValidationError> {
        let field = self.declaration.storage_field();
        match record.raw(field) {
            FieldValue::Absent => {
                if self.declaration.required() {
                    vec![ValidationError {
                        field: field.to_owned(),
                        kind: ValidationKind::Missing,
                    }]
                } else {
                    Vec::new()
                }
            }
            FieldValue::One(symbol) => {
                if self.declaration.values().contains(&symbol) {
                    Vec::new()
                } else {
                    vec![ValidationError {
                        field: field.to_owned(),
                        kind: ValidationKind::NotInSet {
                            value: symbol.name().to_string(),
                        },
                    }]
                }
            }
            // a sequence in a scalar field can never be a member
            sequence @ FieldValue::Many(_) => vec![ValidationError {
                field: field.to_owned(),
                kind: ValidationKind::NotInSet {
                    value: sequence.to_string(),
                },
            }],
        }
    }
}

// ------------- MultipleValidator -------------
/// Set-valued rule: every element must be one of the declared values. An
/// empty or absent sequence is always valid; set-valued attributes are
/// never required.
#[derive(Debug)]
pub struct MultipleValidator {
    declaration: Arc<EnumDeclaration>,
}
impl MultipleValidator {
    pub const KIND: &'static str = "membership";

    pub fn new(declaration: Arc<EnumDeclaration>) -> Self {
        Self { declaration }
    }
}
impl FieldValidator for MultipleValidator {
    fn kind(&self) -> &'static str {
        Self::KIND
    }
    fn validate(&self, record: &Record) -> Vec<ValidationError> {
        let field = self.declaration.storage_field();
        let elements = match record.raw(field) {
            FieldValue::Absent => Vec::new(),
            FieldValue::One(symbol) => vec![symbol],
            FieldValue::Many(symbols) => symbols,
        };
        let mut errors = Vec::new();
        for element in elements {
            if !self.declaration.values().contains(&element) {
                errors.push(ValidationError {
                    field: field.to_owned(),
                    kind: ValidationKind::NotInSet {
                        value: element.name().to_string(),
                    },
                });
            }
        }
        errors
    }
}
