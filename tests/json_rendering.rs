use enumfield::collection::Collection;
use enumfield::declare::Options;
use enumfield::persist::PersistenceMode;
use enumfield::schema::Schema;
use enumfield::symbol::Input;

fn setup() -> Collection {
    let mut schema = Schema::new("User");
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
    Collection::new(schema, PersistenceMode::InMemory).expect("collection")
}

#[test]
fn a_saved_record_renders_with_its_identity() {
    let collection = setup();
    let mut record = collection.instantiate();
    record.write("roles", ["author", "editor"]).expect("write");
    record.mark("banned").expect("mutator");
    collection.save(&mut record).expect("save");
    assert_eq!(
        record.as_json(),
        serde_json::json!({
            "id": 1,
            "status": "banned",
            "roles": ["author", "editor"]
        })
    );
}

#[test]
fn an_absent_scalar_renders_as_null() {
    let collection = setup();
    let mut record = collection.instantiate();
    record.write("status", Input::Absent).expect("write");
    assert_eq!(
        record.as_json(),
        serde_json::json!({
            "status": null,
            "roles": []
        })
    );
}
