//! The collection aggregate: the record keeper wired to a persistor.
//!
//! A [`Collection`] owns the saved records for one schema, hands out fresh
//! instances, assigns record identities on first save, and answers the
//! generated scope queries. Persistence is write-through: every save (and
//! every [`Collection::mark`]) reaches the persistor before the keeper is
//! updated.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::error::{EnumfieldError, Result};
use crate::persist::{PersistenceMode, Persistor};
use crate::schema::{Filter, IdHasher, Record, RecordId, Schema};

// ------------- RecordIdGenerator -------------
#[derive(Debug)]
pub struct RecordIdGenerator {
    lower_bound: RecordId,
    retained: HashSet<RecordId, IdHasher>,
}

impl RecordIdGenerator {
    pub fn new() -> Self {
        Self {
            lower_bound: 0,
            retained: HashSet::default(),
        }
    }
    // Identities restored from storage are handed back in, so they are
    // never reissued.
    pub fn retain(&mut self, id: RecordId) {
        self.retained.insert(id);
        if id > self.lower_bound {
            self.lower_bound = id;
        }
    }
    pub fn check(&self, id: RecordId) -> bool {
        self.retained.contains(&id)
    }
    pub fn generate(&mut self) -> RecordId {
        self.lower_bound += 1;
        self.retained.insert(self.lower_bound);
        self.lower_bound
    }
}

impl Default for RecordIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- Collection -------------
pub struct Collection {
    schema: Arc<Schema>,
    // owns the saved records, ordered by identity for deterministic queries
    kept: Mutex<BTreeMap<RecordId, Record>>,
    record_ids: Mutex<RecordIdGenerator>,
    // responsible for the persistence layer
    persistor: Mutex<Persistor>,
}

impl Collection {
    pub fn new(schema: Schema, mode: PersistenceMode) -> Result<Self> {
        let schema = Arc::new(schema);
        let mut persistor = Persistor::new(mode)?;
        let mut record_ids = RecordIdGenerator::new();
        let mut kept = BTreeMap::new();
        for record in persistor.restore_records(&schema)? {
            if let Some(id) = record.id() {
                record_ids.retain(id);
                kept.insert(id, record);
            }
        }
        if !kept.is_empty() {
            info!(schema = schema.name(), records = kept.len(), "restored collection");
        }
        Ok(Self {
            schema,
            kept: Mutex::new(kept),
            record_ids: Mutex::new(record_ids),
            persistor: Mutex::new(persistor),
        })
    }

    pub fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    /// A fresh, unsaved record with every field at its declared default.
    pub fn instantiate(&self) -> Record {
        Record::new(Arc::clone(&self.schema))
    }

    /// Validate and persist a record, assigning an identity on first save.
    /// An invalid record is refused with its collected validation errors
    /// and reaches neither the keeper nor the persistor.
    pub fn save(&self, record: &mut Record) -> Result<RecordId> {
        let errors = self.schema.validate(record);
        if !errors.is_empty() {
            return Err(EnumfieldError::Invalid { errors });
        }
        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = self.record_ids.lock().unwrap().generate();
                record.assign_id(id);
                id
            }
        };
        self.persistor.lock().unwrap().persist_record(record)?;
        self.kept.lock().unwrap().insert(id, record.clone());
        debug!(schema = self.schema.name(), id, "saved record");
        Ok(id)
    }

    /// The persisting mutator path: apply `value!` and save in one step.
    pub fn mark(&self, record: &mut Record, value: &str) -> Result<RecordId> {
        record.mark(value)?;
        self.save(record)
    }

    pub fn get(&self, id: RecordId) -> Option<Record> {
        self.kept.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.kept.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All saved records matching a filter, in identity order.
    pub fn query(&self, filter: &Filter) -> Vec<Record> {
        self.kept
            .lock()
            .unwrap()
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }

    /// Run a generated per-value scope by name.
    pub fn scope(&self, name: &str) -> Result<Vec<Record>> {
        let filter = self
            .schema
            .scope(name)
            .ok_or_else(|| EnumfieldError::UnknownScope {
                scope: name.to_owned(),
            })?;
        Ok(self.query(filter))
    }
}
