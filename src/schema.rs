use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

use seahash::SeaHasher;

use crate::coerce;
use crate::declare::{EnumBuilder, Options};
use crate::error::{EnumfieldError, Result, ValidationError};
use crate::symbol::{FieldValue, Input, Symbol};
use crate::validate::FieldValidator;

// ------------- RecordId -------------
pub type RecordId = u64;

pub type IdHasher = BuildHasherDefault<SeaHasher>;
pub type NameHasher = BuildHasherDefault<SeaHasher>;

// ------------- Field -------------
/// The storage type a field is registered with.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum FieldType {
    Symbol,
    SymbolList,
}

/// A storage field registered on a schema, with the default a fresh record
/// starts from.
#[derive(Debug)]
pub struct Field {
    name: String,
    field_type: FieldType,
    default: FieldValue,
}
impl Field {
    pub fn new(name: String, field_type: FieldType, default: FieldValue) -> Self {
        Self {
            name,
            field_type,
            default,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
    pub fn default(&self) -> &FieldValue {
        &self.default
    }
}

// ------------- EnumDeclaration -------------
/// One declared enum attribute: the alias, the storage field the alias
/// resolves to, the legal values in declaration order, and the options that
/// were in effect when it was declared.
///
/// The storage field name is fixed at declaration time; reconfiguring the
/// field-name prefix afterwards never changes it.
#[derive(Debug)]
pub struct EnumDeclaration {
    name: String,
    storage_field: String,
    values: Vec<Symbol>,
    multiple: bool,
    required: bool,
    validated: bool,
    default: FieldValue,
}
impl EnumDeclaration {
    pub fn new(
        name: &str,
        storage_field: String,
        values: Vec<Symbol>,
        multiple: bool,
        required: bool,
        validated: bool,
        default: FieldValue,
    ) -> Self {
        Self {
            name: name.to_owned(),
            storage_field,
            values,
            multiple,
            required,
            validated,
            default,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn storage_field(&self) -> &str {
        &self.storage_field
    }
    pub fn values(&self) -> &[Symbol] {
        &self.values
    }
    pub fn multiple(&self) -> bool {
        self.multiple
    }
    pub fn required(&self) -> bool {
        self.required
    }
    pub fn validated(&self) -> bool {
        self.validated
    }
    pub fn default(&self) -> &FieldValue {
        &self.default
    }
}

// ------------- Behavior -------------
/// A generated method, pre-bound to its declaration (and value, where one
/// applies). The schema keeps these in a single dispatch table keyed by the
/// generated name: `name`, `name=`, `value?`, `value!`.
#[derive(Clone, Debug)]
pub enum Behavior {
    Read(Arc<EnumDeclaration>),
    Write(Arc<EnumDeclaration>),
    Predicate(Arc<EnumDeclaration>, Symbol),
    Mutator(Arc<EnumDeclaration>, Symbol),
}

// ------------- Filter -------------
/// The predicate shape a scope hands to the collection: equality for scalar
/// attributes, membership for set-valued ones.
#[derive(Clone, Debug)]
pub enum Filter {
    Equals(String, Symbol),
    Contains(String, Symbol),
}
impl Filter {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Equals(field, symbol) => record.raw(field) == FieldValue::One(*symbol),
            Self::Contains(field, symbol) => match record.raw(field) {
                FieldValue::Many(symbols) => symbols.contains(symbol),
                FieldValue::One(kept) => kept == *symbol,
                FieldValue::Absent => false,
            },
        }
    }
}

// ------------- Schema -------------
/// A record type: the registry every enum declaration writes into.
///
/// A schema owns the storage field registry, the generated-method dispatch
/// table, the per-value scopes, the named constants, the attached
/// validators, and the list of declarations for introspection. Declaration
/// happens once, at definition time, through [`EnumBuilder`] or the
/// [`Schema::enum_attribute`] shim; afterwards the schema is shared
/// read-only between its records and its collection.
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: HashMap<String, Field, NameHasher>,
    methods: HashMap<String, Behavior, NameHasher>,
    scopes: HashMap<String, Filter, NameHasher>,
    constants: HashMap<String, Vec<Symbol>, NameHasher>,
    validators: Vec<(String, Box<dyn FieldValidator>)>,
    declarations: Vec<Arc<EnumDeclaration>>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: HashMap::default(),
            methods: HashMap::default(),
            scopes: HashMap::default(),
            constants: HashMap::default(),
            validators: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// Declare an enum attribute on this schema.
    pub fn enum_attribute(
        &mut self,
        name: &str,
        values: &[&str],
        options: Options,
    ) -> Result<Arc<EnumDeclaration>> {
        EnumBuilder::declare(self, name, values, options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
    pub fn constant(&self, name: &str) -> Option<&[Symbol]> {
        self.constants.get(name).map(Vec::as_slice)
    }
    pub fn scope(&self, name: &str) -> Option<&Filter> {
        self.scopes.get(name)
    }
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
    pub fn method(&self, name: &str) -> Result<&Behavior> {
        self.methods.get(name).ok_or_else(|| EnumfieldError::UnknownMethod {
            method: name.to_owned(),
        })
    }
    pub fn declarations(&self) -> &[Arc<EnumDeclaration>] {
        &self.declarations
    }
    pub fn validators(&self) -> &[(String, Box<dyn FieldValidator>)] {
        &self.validators
    }

    pub fn register_field(&mut self, field: Field) -> Result<()> {
        if self.fields.contains_key(field.name()) {
            return Err(EnumfieldError::DuplicateField {
                field: field.name().to_owned(),
            });
        }
        self.fields.insert(field.name().to_owned(), field);
        Ok(())
    }
    pub fn register_constant(&mut self, name: String, values: Vec<Symbol>) -> Result<()> {
        if self.constants.contains_key(&name) {
            return Err(EnumfieldError::MethodCollision { name });
        }
        self.constants.insert(name, values);
        Ok(())
    }
    pub fn register_validator(&mut self, field: &str, validator: Box<dyn FieldValidator>) {
        self.validators.push((field.to_owned(), validator));
    }
    pub fn define_method(&mut self, name: String, behavior: Behavior) -> Result<()> {
        if self.methods.contains_key(&name) {
            return Err(EnumfieldError::MethodCollision { name });
        }
        self.methods.insert(name, behavior);
        Ok(())
    }
    pub fn define_scope(&mut self, name: String, filter: Filter) -> Result<()> {
        if self.scopes.contains_key(&name) {
            return Err(EnumfieldError::MethodCollision { name });
        }
        self.scopes.insert(name, filter);
        Ok(())
    }
    pub fn keep_declaration(&mut self, declaration: Arc<EnumDeclaration>) {
        self.declarations.push(declaration);
    }

    /// Run every attached validator against a record, collecting the
    /// failures. An empty result means the record is valid.
    pub fn validate(&self, record: &Record) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (_, validator) in &self.validators {
            errors.extend(validator.validate(record));
        }
        errors
    }
}

// ------------- Record -------------
/// One record instance: storage-field values plus the identity assigned on
/// first save. All reads and writes on enum aliases dispatch through the
/// schema's behavior table; writes coerce before storing, so reads return
/// the canonical form directly.
#[derive(Clone, Debug)]
pub struct Record {
    schema: Arc<Schema>,
    id: Option<RecordId>,
    values: HashMap<String, FieldValue, NameHasher>,
}

impl Record {
    pub fn new(schema: Arc<Schema>) -> Self {
        let mut values: HashMap<String, FieldValue, NameHasher> = HashMap::default();
        for (name, field) in &schema.fields {
            values.insert(name.clone(), field.default().clone());
        }
        Self {
            schema,
            id: None,
            values,
        }
    }
    /// Used by the persistence layer when rebuilding a previously saved
    /// record.
    pub fn restored(schema: Arc<Schema>, id: RecordId) -> Self {
        let mut record = Self::new(schema);
        record.id = Some(id);
        record
    }
    pub fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }
    pub fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Storage-level read. Unset fields read as absent.
    pub fn raw(&self, field: &str) -> FieldValue {
        self.values.get(field).cloned().unwrap_or(FieldValue::Absent)
    }
    /// Storage-level write, bypassing coercion.
    pub fn set_raw(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_owned(), value);
    }
    pub fn stored(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Read an enum attribute through its alias.
    pub fn read(&self, alias: &str) -> Result<FieldValue> {
        match self.schema.method(alias)? {
            Behavior::Read(declaration) => Ok(self.raw(declaration.storage_field())),
            _ => Err(EnumfieldError::UnknownMethod {
                method: alias.to_owned(),
            }),
        }
    }

    /// Write an enum attribute through its alias. The input is coerced for
    /// the declared multiplicity before it is stored; this never fails on
    /// out-of-range values.
    pub fn write(&mut self, alias: &str, input: impl Into<Input>) -> Result<()> {
        let behavior = self.schema.method(&format!("{alias}="))?.clone();
        match behavior {
            Behavior::Write(declaration) => {
                let value = if declaration.multiple() {
                    coerce::set(input.into())
                } else {
                    coerce::scalar(input.into())
                };
                self.values.insert(declaration.storage_field().to_owned(), value);
                Ok(())
            }
            _ => Err(EnumfieldError::UnknownMethod {
                method: format!("{alias}="),
            }),
        }
    }

    /// The `value?` predicate: equality for scalar attributes, membership
    /// for set-valued ones.
    pub fn is(&self, value: &str) -> Result<bool> {
        let method = format!("{value}?");
        match self.schema.method(&method)? {
            Behavior::Predicate(declaration, symbol) => {
                Ok(self.raw(declaration.storage_field()).contains(*symbol))
            }
            _ => Err(EnumfieldError::UnknownMethod { method }),
        }
    }

    /// The `value!` mutator: sets a scalar attribute to the value, or
    /// appends it to a set-valued attribute (initializing from empty,
    /// keeping first-added order, never duplicating).
    pub fn mark(&mut self, value: &str) -> Result<()> {
        let method = format!("{value}!");
        let behavior = self.schema.method(&method)?.clone();
        match behavior {
            Behavior::Mutator(declaration, symbol) => {
                let field = declaration.storage_field().to_owned();
                if declaration.multiple() {
                    let mut symbols = match self.raw(&field) {
                        FieldValue::Many(symbols) => symbols,
                        FieldValue::One(kept) => vec![kept],
                        FieldValue::Absent => Vec::new(),
                    };
                    if !symbols.contains(&symbol) {
                        symbols.push(symbol);
                    }
                    self.values.insert(field, FieldValue::Many(symbols));
                } else {
                    self.values.insert(field, FieldValue::One(symbol));
                }
                Ok(())
            }
            _ => Err(EnumfieldError::UnknownMethod { method }),
        }
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.schema.validate(self)
    }
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
    pub fn matches(&self, filter: &Filter) -> bool {
        filter.matches(self)
    }

    /// Document-style rendering: aliases mapped to strings, arrays, or null.
    pub fn as_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        if let Some(id) = self.id {
            map.insert("id".to_owned(), id.into());
        }
        for declaration in self.schema.declarations() {
            let value = match self.raw(declaration.storage_field()) {
                FieldValue::Absent => serde_json::Value::Null,
                FieldValue::One(symbol) => serde_json::Value::String(symbol.name().to_string()),
                FieldValue::Many(symbols) => serde_json::Value::Array(
                    symbols
                        .iter()
                        .map(|symbol| symbol.name().to_string().into())
                        .collect(),
                ),
            };
            map.insert(declaration.name().to_owned(), value);
        }
        serde_json::Value::Object(map)
    }
}
