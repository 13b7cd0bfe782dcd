// used for persistence
use rusqlite::{Connection, params};

use std::sync::Arc;

use tracing::warn;

use crate::error::{EnumfieldError, Result};
use crate::schema::{Record, RecordId, Schema};
use crate::symbol::{FieldValue, Symbol};

/// Where saved records go: nowhere, or a SQLite file that is restored from
/// on the next startup.
#[derive(Clone, Debug)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

// ------------- Persistence -------------
/// Durable storage for saved records. One row per record identity, one row
/// per stored field value; sequence values are encoded as JSON arrays.
pub struct Persistor {
    connection: Option<Connection>,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Result<Self> {
        let connection = match mode {
            PersistenceMode::InMemory => None,
            PersistenceMode::File(path) => {
                let connection = Connection::open(path)?;
                connection.execute_batch(
                    "
                create table if not exists Record (
                    Record_Identity integer not null,
                    constraint unique_and_referenceable_Record_Identity primary key (
                        Record_Identity
                    )
                );
                create table if not exists FieldValue (
                    Record_Identity integer not null,
                    Field text not null,
                    Value text null,
                    Multiple integer not null,
                    constraint FieldValue_belongs_to_Record foreign key (
                        Record_Identity
                    ) references Record(Record_Identity),
                    constraint unique_FieldValue primary key (
                        Record_Identity,
                        Field
                    )
                );
                ",
                )?;
                Some(connection)
            }
        };
        Ok(Self { connection })
    }

    pub fn is_persistent(&self) -> bool {
        self.connection.is_some()
    }

    /// Upsert one record: replace its field rows wholesale.
    pub fn persist_record(&mut self, record: &Record) -> Result<()> {
        let Some(connection) = &self.connection else {
            return Ok(());
        };
        let Some(id) = record.id() else {
            return Ok(());
        };
        connection
            .prepare_cached("insert or ignore into Record (Record_Identity) values (?)")?
            .execute(params![id])?;
        connection
            .prepare_cached("delete from FieldValue where Record_Identity = ?")?
            .execute(params![id])?;
        let mut add_value = connection.prepare_cached(
            "insert into FieldValue (Record_Identity, Field, Value, Multiple) values (?, ?, ?, ?)",
        )?;
        for (field, value) in record.stored() {
            let (encoded, multiple): (Option<String>, bool) = match value {
                FieldValue::Absent => (None, false),
                FieldValue::One(symbol) => (Some(symbol.name().to_string()), false),
                FieldValue::Many(symbols) => {
                    let names: Vec<String> =
                        symbols.iter().map(|symbol| symbol.name().to_string()).collect();
                    let encoded = serde_json::to_string(&names)
                        .map_err(|e| EnumfieldError::Persistence(e.to_string()))?;
                    (Some(encoded), true)
                }
            };
            add_value.execute(params![id, field, encoded, multiple])?;
        }
        Ok(())
    }

    /// Rebuild every persisted record against the given schema. Values for
    /// fields the schema no longer knows are skipped.
    pub fn restore_records(&mut self, schema: &Arc<Schema>) -> Result<Vec<Record>> {
        let Some(connection) = &self.connection else {
            return Ok(Vec::new());
        };
        let ids: Vec<RecordId> = connection
            .prepare_cached("select Record_Identity from Record order by Record_Identity")?
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        let mut records = Vec::new();
        for id in ids {
            let mut record = Record::restored(Arc::clone(schema), id);
            let mut all_values = connection.prepare_cached(
                "select Field, Value, Multiple from FieldValue where Record_Identity = ?",
            )?;
            let mut rows = all_values.query(params![id])?;
            while let Some(row) = rows.next()? {
                let field: String = row.get(0)?;
                let value: Option<String> = row.get(1)?;
                let multiple: bool = row.get(2)?;
                if schema.field(&field).is_none() {
                    warn!(record = id, field = %field, "skipping value for unknown field");
                    continue;
                }
                let restored = match value {
                    None => FieldValue::Absent,
                    Some(value) if multiple => {
                        let names: Vec<String> = serde_json::from_str(&value)
                            .map_err(|e| EnumfieldError::Persistence(e.to_string()))?;
                        FieldValue::Many(names.iter().map(|name| Symbol::new(name)).collect())
                    }
                    Some(value) => FieldValue::One(Symbol::new(&value)),
                };
                record.set_raw(&field, restored);
            }
            records.push(record);
        }
        Ok(records)
    }
}
