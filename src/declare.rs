//! The enum-declaration engine.
//!
//! [`EnumBuilder::declare`] is the single entry point that turns a field
//! name, a value list and a handful of options into the full behavioral
//! surface on a [`Schema`]: the typed storage field, the named constant,
//! the validator, the alias accessors, and one predicate, mutator and scope
//! per declared value. Everything happens at schema-definition time; an
//! invalid declaration is a programming error and fails loudly before any
//! part of it is registered.

use std::sync::Arc;

use tracing::debug;

use crate::coerce;
use crate::config::{self, Configuration};
use crate::error::{EnumfieldError, Result};
use crate::schema::{Behavior, EnumDeclaration, Field, FieldType, Filter, Schema};
use crate::symbol::{FieldValue, Input, Symbol};
use crate::validate::{InclusionValidator, MultipleValidator};

/// Recognized declaration options.
///
/// `required` only applies to scalar declarations; set-valued attributes
/// are never required and an empty sequence is always acceptable. With
/// `validate` off no rule is attached, so out-of-range values survive
/// validation untouched.
#[derive(Clone, Debug)]
pub struct Options {
    pub multiple: bool,
    pub required: bool,
    pub validate: bool,
    pub default: Option<Input>,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            multiple: false,
            required: true,
            validate: true,
            default: None,
        }
    }
}

pub struct EnumBuilder;

impl EnumBuilder {
    /// Declare an enum attribute, reading the field-name prefix from the
    /// process-wide configuration at call time.
    pub fn declare(
        schema: &mut Schema,
        name: &str,
        values: &[&str],
        options: Options,
    ) -> Result<Arc<EnumDeclaration>> {
        let prefix = config::configuration()
            .lock()
            .unwrap()
            .field_name_prefix()
            .to_owned();
        Self::declare_with_prefix(schema, name, values, options, &prefix)
    }

    /// Declare with an explicitly threaded configuration instead of the
    /// package-level singleton.
    pub fn declare_with(
        configuration: &Configuration,
        schema: &mut Schema,
        name: &str,
        values: &[&str],
        options: Options,
    ) -> Result<Arc<EnumDeclaration>> {
        Self::declare_with_prefix(schema, name, values, options, configuration.field_name_prefix())
    }

    fn declare_with_prefix(
        schema: &mut Schema,
        name: &str,
        values: &[&str],
        options: Options,
        prefix: &str,
    ) -> Result<Arc<EnumDeclaration>> {
        // declaration order is significant: the first value is the scalar
        // default when none is given
        let mut declared: Vec<Symbol> = Vec::new();
        for value in values {
            let symbol = Symbol::new(value);
            if !declared.contains(&symbol) {
                declared.push(symbol);
            }
        }
        if declared.is_empty() {
            return Err(EnumfieldError::EmptyValues {
                field: name.to_owned(),
            });
        }

        let storage_field = format!("{prefix}{name}");
        let multiple = options.multiple;
        let required = if multiple { false } else { options.required };
        let default = match options.default {
            Some(input) => {
                if multiple {
                    coerce::set(input)
                } else {
                    coerce::scalar(input)
                }
            }
            None => {
                if multiple {
                    FieldValue::Many(Vec::new())
                } else {
                    FieldValue::One(declared[0])
                }
            }
        };
        let constant = name.to_uppercase();

        // every collision check runs before any registration, so a failed
        // declaration leaves the schema untouched
        if schema.field(&storage_field).is_some() {
            return Err(EnumfieldError::DuplicateField {
                field: storage_field,
            });
        }
        let mut generated = vec![name.to_owned(), format!("{name}=")];
        for symbol in &declared {
            generated.push(format!("{symbol}?"));
            generated.push(format!("{symbol}!"));
        }
        for method in &generated {
            if schema.has_method(method) {
                return Err(EnumfieldError::MethodCollision {
                    name: method.clone(),
                });
            }
        }
        for symbol in &declared {
            if schema.scope(&symbol.name()).is_some() {
                return Err(EnumfieldError::MethodCollision {
                    name: symbol.name().to_string(),
                });
            }
        }
        if schema.constant(&constant).is_some() {
            return Err(EnumfieldError::MethodCollision { name: constant });
        }

        let declaration = Arc::new(EnumDeclaration::new(
            name,
            storage_field.clone(),
            declared.clone(),
            multiple,
            required,
            options.validate,
            default.clone(),
        ));

        let field_type = if multiple {
            FieldType::SymbolList
        } else {
            FieldType::Symbol
        };
        schema.register_field(Field::new(storage_field.clone(), field_type, default))?;
        schema.register_constant(constant, declared.clone())?;
        if options.validate {
            if multiple {
                schema.register_validator(
                    &storage_field,
                    Box::new(MultipleValidator::new(Arc::clone(&declaration))),
                );
            } else {
                schema.register_validator(
                    &storage_field,
                    Box::new(InclusionValidator::new(Arc::clone(&declaration))),
                );
            }
        }
        schema.define_method(name.to_owned(), Behavior::Read(Arc::clone(&declaration)))?;
        schema.define_method(format!("{name}="), Behavior::Write(Arc::clone(&declaration)))?;
        for symbol in &declared {
            schema.define_method(
                format!("{symbol}?"),
                Behavior::Predicate(Arc::clone(&declaration), *symbol),
            )?;
            schema.define_method(
                format!("{symbol}!"),
                Behavior::Mutator(Arc::clone(&declaration), *symbol),
            )?;
            let filter = if multiple {
                Filter::Contains(storage_field.clone(), *symbol)
            } else {
                Filter::Equals(storage_field.clone(), *symbol)
            };
            schema.define_scope(symbol.name().to_string(), filter)?;
        }
        schema.keep_declaration(Arc::clone(&declaration));

        debug!(
            schema = schema.name(),
            field = %storage_field,
            values = declared.len(),
            multiple,
            "declared enum attribute"
        );
        Ok(declaration)
    }
}
