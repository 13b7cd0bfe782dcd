use std::sync::Arc;

use enumfield::declare::{EnumBuilder, Options};
use enumfield::error::EnumfieldError;
use enumfield::schema::{FieldType, Record, Schema};
use enumfield::symbol::{FieldValue, Symbol};
use enumfield::validate::{InclusionValidator, MultipleValidator};

fn setup() -> Schema {
    let mut schema = Schema::new("TestClass");
    EnumBuilder::declare(
        &mut schema,
        "status",
        &["awaiting_approval", "approved", "banned"],
        Options::default(),
    )
    .expect("scalar declaration");
    EnumBuilder::declare(
        &mut schema,
        "roles",
        &["author", "editor", "admin"],
        Options {
            multiple: true,
            ..Options::default()
        },
    )
    .expect("multiple declaration");
    schema
}

#[test]
fn storage_fields_are_registered_with_their_declared_types() {
    let schema = setup();
    let status = schema.field("_status").expect("prefixed scalar field present");
    assert_eq!(status.field_type(), FieldType::Symbol);
    assert_eq!(
        status.default(),
        &FieldValue::One(Symbol::new("awaiting_approval")),
        "the first declared value is the scalar default"
    );
    let roles = schema.field("_roles").expect("prefixed sequence field present");
    assert_eq!(roles.field_type(), FieldType::SymbolList);
    assert_eq!(roles.default(), &FieldValue::Many(Vec::new()));
}

#[test]
fn constants_hold_the_declared_values_verbatim() {
    let schema = setup();
    let status = schema.constant("STATUS").expect("upper-cased constant");
    assert_eq!(
        status,
        &[
            Symbol::new("awaiting_approval"),
            Symbol::new("approved"),
            Symbol::new("banned")
        ]
    );
    let roles = schema.constant("ROLES").expect("upper-cased constant");
    assert_eq!(
        roles,
        &[Symbol::new("author"), Symbol::new("editor"), Symbol::new("admin")]
    );
}

#[test]
fn validators_are_attached_per_multiplicity() {
    let schema = setup();
    let kinds: Vec<(&str, &str)> = schema
        .validators()
        .iter()
        .map(|(field, validator)| (field.as_str(), validator.kind()))
        .collect();
    assert_eq!(
        kinds,
        [
            ("_status", InclusionValidator::KIND),
            ("_roles", MultipleValidator::KIND)
        ]
    );
}

#[test]
fn declarations_are_recorded_for_introspection() {
    let schema = setup();
    let declared: Vec<&str> = schema
        .declarations()
        .iter()
        .map(|declaration| declaration.name())
        .collect();
    assert_eq!(declared, ["status", "roles"]);
    let status = &schema.declarations()[0];
    assert!(status.required());
    assert!(!status.multiple());
    assert_eq!(status.storage_field(), "_status");
    assert!(status.validated());
    let roles = &schema.declarations()[1];
    assert!(roles.multiple());
    assert!(
        !roles.required(),
        "set-valued attributes are never required"
    );
}

#[test]
fn generated_methods_are_registered_by_name() {
    let schema = setup();
    for method in [
        "status", "status=", "banned?", "banned!", "roles", "roles=", "author?", "author!",
    ] {
        assert!(schema.has_method(method), "expected generated method {method}");
    }
    assert!(!schema.has_method("archived?"));
}

#[test]
fn declaring_without_values_fails() {
    let mut schema = Schema::new("TestClass");
    let err = EnumBuilder::declare(&mut schema, "status", &[], Options::default()).unwrap_err();
    assert!(matches!(err, EnumfieldError::EmptyValues { .. }));
}

#[test]
fn redeclaring_the_same_field_fails() {
    let mut schema = setup();
    let err = EnumBuilder::declare(&mut schema, "status", &["other"], Options::default())
        .unwrap_err();
    assert!(matches!(err, EnumfieldError::DuplicateField { .. }));
}

#[test]
fn a_shared_value_name_collides_loudly() {
    let mut schema = setup();
    // "banned" already generated banned? and banned! for the status enum
    let err = EnumBuilder::declare(&mut schema, "moderation", &["banned"], Options::default())
        .unwrap_err();
    assert!(matches!(err, EnumfieldError::MethodCollision { .. }));
    assert!(
        schema.field("_moderation").is_none(),
        "a failed declaration must not register its field"
    );
}

#[test]
fn duplicate_values_collapse_in_declaration_order() {
    let mut schema = Schema::new("TestClass");
    let declaration = EnumBuilder::declare(
        &mut schema,
        "status",
        &["approved", "banned", "approved"],
        Options::default(),
    )
    .expect("declaration");
    assert_eq!(
        declaration.values(),
        &[Symbol::new("approved"), Symbol::new("banned")]
    );
}

#[test]
fn validate_false_skips_the_rule() {
    let mut schema = Schema::new("TestClass");
    EnumBuilder::declare(
        &mut schema,
        "status",
        &["open", "closed"],
        Options {
            validate: false,
            ..Options::default()
        },
    )
    .expect("declaration");
    assert!(schema.validators().is_empty());
    let mut record = Record::new(Arc::new(schema));
    record.write("status", "zebra").expect("write");
    assert!(
        record.is_valid(),
        "without a validator an out-of-set value passes"
    );
}
