use std::sync::Arc;

use enumfield::collection::Collection;
use enumfield::declare::Options;
use enumfield::error::{EnumfieldError, ValidationKind};
use enumfield::persist::PersistenceMode;
use enumfield::schema::{Record, Schema};
use enumfield::symbol::Input;

fn setup() -> Record {
    let mut schema = Schema::new("TestClass");
    schema
        .enum_attribute(
            "status",
            &["awaiting_approval", "approved", "banned"],
            Options::default(),
        )
        .expect("scalar declaration");
    schema
        .enum_attribute(
            "roles",
            &["author", "editor", "admin"],
            Options {
                multiple: true,
                ..Options::default()
            },
        )
        .expect("multiple declaration");
    Record::new(Arc::new(schema))
}

#[test]
fn a_fresh_record_is_valid() {
    let record = setup();
    assert!(record.is_valid(), "defaults must satisfy both rules");
}

#[test]
fn a_required_scalar_rejects_absence() {
    let mut record = setup();
    record.write("status", Input::Absent).expect("write");
    let errors = record.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "_status");
    assert_eq!(errors[0].kind, ValidationKind::Missing);
}

#[test]
fn an_optional_scalar_accepts_absence() {
    let mut schema = Schema::new("TestClass");
    schema
        .enum_attribute(
            "status",
            &["awaiting_approval", "approved", "banned"],
            Options {
                required: false,
                ..Options::default()
            },
        )
        .expect("declaration");
    let mut record = Record::new(Arc::new(schema));
    record.write("status", Input::Absent).expect("write");
    assert!(record.is_valid());
}

#[test]
fn an_out_of_set_scalar_is_reported() {
    let mut record = setup();
    record.write("status", "zebra").expect("assignment never fails");
    let errors = record.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind,
        ValidationKind::NotInSet {
            value: "zebra".to_owned()
        }
    );
}

#[test]
fn an_empty_or_absent_sequence_is_always_valid() {
    let mut record = setup();
    record.write("roles", Input::Absent).expect("write");
    assert!(record.is_valid());
    record.write("roles", Vec::<&str>::new()).expect("write");
    assert!(record.is_valid());
}

#[test]
fn out_of_set_elements_are_each_reported() {
    let mut record = setup();
    record
        .write("roles", ["author", "zebra", "ghost"])
        .expect("assignment never fails");
    let errors = record.errors();
    assert_eq!(errors.len(), 2, "one failure per offending element");
    assert_eq!(errors[0].field, "_roles");
    assert_eq!(
        errors[0].kind,
        ValidationKind::NotInSet {
            value: "zebra".to_owned()
        }
    );
    assert_eq!(
        errors[1].kind,
        ValidationKind::NotInSet {
            value: "ghost".to_owned()
        }
    );
}

#[test]
fn saving_an_invalid_record_is_refused() {
    let mut schema = Schema::new("TestClass");
    schema
        .enum_attribute(
            "status",
            &["awaiting_approval", "approved", "banned"],
            Options::default(),
        )
        .expect("scalar declaration");
    let collection = Collection::new(schema, PersistenceMode::InMemory).expect("collection");
    let mut invalid = collection.instantiate();
    invalid.write("status", Input::Absent).expect("write");
    let err = collection.save(&mut invalid).unwrap_err();
    match err {
        EnumfieldError::Invalid { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, ValidationKind::Missing);
        }
        other => panic!("expected a validation refusal, got {other}"),
    }
    assert_eq!(collection.len(), 0, "nothing may be kept for an invalid record");
    assert!(invalid.id().is_none(), "no identity is assigned on a refused save");
}
