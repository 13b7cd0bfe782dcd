//! Enumfield – enumerated attributes for document-style record schemas.
//!
//! Enumfield equips a record type with *enum attributes*: fields restricted
//! to a fixed set of symbolic values, in one of two multiplicity modes:
//! * *Scalar* – the field holds at most one [`symbol::Symbol`] from the
//!   declared set.
//! * *Set-valued* – the field holds an ordered, duplicate-free sequence of
//!   symbols from the declared set.
//!
//! A single declaration call synthesizes the whole behavioral surface:
//! * a prefixed storage field registered at the declared type, with a
//!   default (`values.first` for scalar, empty for set-valued),
//! * alias accessors that coerce loosely-typed input (strings, symbols,
//!   sequences of either) on write,
//! * a `value?` predicate and `value!` transition mutator per declared
//!   value,
//! * a per-value query scope on the collection,
//! * an upper-cased constant listing the declared values,
//! * an inclusion (scalar) or membership (set-valued) validation rule.
//!
//! Generated behavior lives in the schema's dispatch tables rather than in
//! synthesized methods: every entry is pre-bound to its declaration and
//! value, and record instances dispatch through them by name.
//!
//! ## Modules
//! * [`schema`] – The host record type ([`schema::Schema`]), its records,
//!   and the dispatch-table building blocks.
//! * [`declare`] – The declaration engine ([`declare::EnumBuilder`]) and
//!   its recognized options.
//! * [`symbol`] – Interned symbols, loosely-typed input, and the canonical
//!   stored form.
//! * [`coerce`] – Total coercion from input to canonical form, one
//!   function per multiplicity mode.
//! * [`validate`] – The validator capability contract and the two provided
//!   rules.
//! * [`collection`] – The record keeper + persistor aggregate answering
//!   scope queries.
//! * [`persist`] – SQLite persistence and restoration for saved records.
//! * [`config`] – The process-wide field-name-prefix configuration.
//!
//! ## Coercion and validation
//! Assignment never fails: whatever arrives at a setter is coerced into
//! canonical form and stored, and out-of-range values are only rejected
//! when the record is validated (or saved, which validates first). See
//! [`coerce`] for the exact rules.
//!
//! ## Quick Start
//! ```
//! use enumfield::collection::Collection;
//! use enumfield::declare::Options;
//! use enumfield::persist::PersistenceMode;
//! use enumfield::schema::Schema;
//!
//! let mut schema = Schema::new("User");
//! schema
//!     .enum_attribute("status", &["awaiting_approval", "approved", "banned"], Options::default())
//!     .unwrap();
//! schema
//!     .enum_attribute("roles", &["author", "editor", "admin"], Options {
//!         multiple: true,
//!         ..Options::default()
//!     })
//!     .unwrap();
//!
//! let collection = Collection::new(schema, PersistenceMode::InMemory).unwrap();
//! let mut user = collection.instantiate();
//! assert_eq!(user.read("status").unwrap().symbol().unwrap(), "awaiting_approval");
//! user.mark("banned").unwrap();
//! assert!(user.is("banned").unwrap());
//! user.write("roles", ["author", "editor"]).unwrap();
//! collection.save(&mut user).unwrap();
//! assert_eq!(collection.scope("banned").unwrap().len(), 1);
//! ```

pub mod coerce;
pub mod collection;
pub mod config;
pub mod declare;
pub mod error;
pub mod persist;
pub mod schema;
pub mod symbol;
pub mod validate;
