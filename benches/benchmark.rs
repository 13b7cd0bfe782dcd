use criterion::{Criterion, criterion_group, criterion_main};

use std::hint::black_box;

use enumfield::coerce;
use enumfield::collection::Collection;
use enumfield::declare::Options;
use enumfield::persist::PersistenceMode;
use enumfield::schema::Schema;
use enumfield::symbol::Input;

fn declared_schema() -> Schema {
    let mut schema = Schema::new("Bench");
    schema
        .enum_attribute(
            "status",
            &["awaiting_approval", "approved", "banned"],
            Options::default(),
        )
        .unwrap();
    schema
        .enum_attribute(
            "roles",
            &["author", "editor", "admin"],
            Options {
                multiple: true,
                ..Options::default()
            },
        )
        .unwrap();
    schema
}

fn declaration(c: &mut Criterion) {
    c.bench_function("declare two enum attributes", |b| {
        b.iter(|| black_box(declared_schema()))
    });
}

fn coercion(c: &mut Criterion) {
    c.bench_function("coerce a mixed sequence", |b| {
        b.iter(|| {
            coerce::set(black_box(Input::from(vec![
                "author", "editor", "author", "admin", "editor",
            ])))
        })
    });
}

fn scope_query(c: &mut Criterion) {
    let collection = Collection::new(declared_schema(), PersistenceMode::InMemory).unwrap();
    for i in 0..1_000u32 {
        let mut record = collection.instantiate();
        if i % 2 == 0 {
            record.mark("banned").unwrap();
        }
        record.write("roles", ["author"]).unwrap();
        collection.save(&mut record).unwrap();
    }
    c.bench_function("scalar scope over 1000 records", |b| {
        b.iter(|| black_box(collection.scope("banned").unwrap()))
    });
    c.bench_function("membership scope over 1000 records", |b| {
        b.iter(|| black_box(collection.scope("author").unwrap()))
    });
}

criterion_group!(benches, declaration, coercion, scope_query);
criterion_main!(benches);
