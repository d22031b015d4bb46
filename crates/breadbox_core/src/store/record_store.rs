//! Generic named-collection record store over SQLite.
//!
//! # Responsibility
//! - Persist typed records as JSON bodies addressable by collection + id.
//! - Maintain declared secondary lookup attributes alongside each write.
//!
//! # Invariants
//! - `initialize` is idempotent; re-declaring a collection updates its
//!   index set without touching stored records.
//! - `put_all` assigns identifiers to id-less records and commits the whole
//!   batch in one transaction.
//! - Index rows are rewritten in the same transaction as their record.

use crate::db::{open_db, open_db_in_memory};
use crate::store::{StoreError, StoreResult};
use rusqlite::{params, Connection, Row, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Collection-scoped record identifier, assigned at first put.
pub type RecordId = i64;

/// Fixed identifier for one-row collections (goals, earnings ledger).
pub const SINGLETON_ID: RecordId = 1;

/// Binds a record type to its collection and identifier field.
///
/// Records carry `Option<RecordId>` so the store can tell "new" from
/// "existing" and assign the next free id on first put.
pub trait StoredRecord: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn id(&self) -> Option<RecordId>;
    fn assign_id(&mut self, id: RecordId);
}

/// Declaration of one named collection and its secondary lookup attributes.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub indexes: &'static [&'static str],
}

/// Every collection the console persists, with its secondary indexes.
pub fn default_collections() -> &'static [CollectionSpec] {
    use crate::model::{
        EarningsLedger, Employee, EquipmentItem, Goals, Investment, PaymentRecord, Product,
        RawMaterialItem, Sale,
    };

    const SPECS: &[CollectionSpec] = &[
        CollectionSpec {
            name: Sale::COLLECTION,
            indexes: &["date", "product_id"],
        },
        CollectionSpec {
            name: Product::COLLECTION,
            indexes: &["name"],
        },
        CollectionSpec {
            name: Employee::COLLECTION,
            indexes: &[],
        },
        CollectionSpec {
            name: RawMaterialItem::COLLECTION,
            indexes: &[],
        },
        CollectionSpec {
            name: Investment::COLLECTION,
            indexes: &["date", "category"],
        },
        CollectionSpec {
            name: EquipmentItem::COLLECTION,
            indexes: &[],
        },
        CollectionSpec {
            name: Goals::COLLECTION,
            indexes: &[],
        },
        CollectionSpec {
            name: EarningsLedger::COLLECTION,
            indexes: &[],
        },
        CollectionSpec {
            name: PaymentRecord::COLLECTION,
            indexes: &[],
        },
    ];
    SPECS
}

/// SQLite-backed store for named record collections.
pub struct RecordStore {
    conn: Connection,
    registry: BTreeMap<String, Vec<String>>,
}

impl RecordStore {
    /// Opens a store backed by a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path)?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory store, mainly for tests and smoke probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        let registry = load_registry(&conn)?;
        Ok(Self { conn, registry })
    }

    /// Idempotently declares collections and their secondary indexes.
    ///
    /// Existing records are untouched; a re-declaration only replaces the
    /// registered index attribute set.
    pub fn initialize(&mut self, specs: &[CollectionSpec]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        for spec in specs {
            let indexes = serde_json::to_string(spec.indexes)
                .map_err(|err| StoreError::InvalidData(err.to_string()))?;
            tx.execute(
                "INSERT INTO collections (name, indexes) VALUES (?1, ?2)
                 ON CONFLICT (name) DO UPDATE SET indexes = excluded.indexes;",
                params![spec.name, indexes],
            )?;
        }
        tx.commit()?;

        self.registry = load_registry(&self.conn)?;
        Ok(())
    }

    /// Upserts a single record, assigning an id when it has none.
    pub fn put<T: StoredRecord>(&mut self, record: &mut T) -> StoreResult<RecordId> {
        let ids = self.put_all(std::slice::from_mut(record))?;
        Ok(ids[0])
    }

    /// Upserts a batch of records atomically.
    ///
    /// # Contract
    /// - Records without an id get the next free id of their collection.
    /// - Either every record (and its index rows) commits, or none do.
    pub fn put_all<T: StoredRecord>(&mut self, records: &mut [T]) -> StoreResult<Vec<RecordId>> {
        let indexes = self.indexed_attrs(T::COLLECTION)?.to_vec();

        let tx = self.conn.transaction()?;
        let mut next_id = next_record_id(&tx, T::COLLECTION)?;
        let mut ids = Vec::with_capacity(records.len());

        for record in records.iter_mut() {
            let id = match record.id() {
                Some(id) => id,
                None => {
                    let id = next_id;
                    record.assign_id(id);
                    id
                }
            };
            next_id = next_id.max(id + 1);

            let body = serde_json::to_value(&*record).map_err(|err| {
                StoreError::InvalidData(format!(
                    "failed to encode record for `{}`: {err}",
                    T::COLLECTION
                ))
            })?;

            tx.execute(
                "INSERT INTO records (collection, id, body) VALUES (?1, ?2, ?3)
                 ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body;",
                params![T::COLLECTION, id, body.to_string()],
            )?;

            tx.execute(
                "DELETE FROM record_index WHERE collection = ?1 AND record_id = ?2;",
                params![T::COLLECTION, id],
            )?;
            for attr in &indexes {
                // Records lacking an indexed attribute simply get no index row.
                if let Some(value) = index_value(&body, attr) {
                    tx.execute(
                        "INSERT INTO record_index (collection, attr, value, record_id)
                         VALUES (?1, ?2, ?3, ?4);",
                        params![T::COLLECTION, attr, value, id],
                    )?;
                }
            }

            ids.push(id);
        }

        tx.commit()?;
        Ok(ids)
    }

    /// Returns every record of the collection, order unspecified.
    pub fn get_all<T: StoredRecord>(&self) -> StoreResult<Vec<T>> {
        self.require_collection(T::COLLECTION)?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM records WHERE collection = ?1;")?;
        let mut rows = stmt.query(params![T::COLLECTION])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(decode_row::<T>(row)?);
        }
        Ok(records)
    }

    /// Returns one record by id, or `None` when absent.
    pub fn get_by_id<T: StoredRecord>(&self, id: RecordId) -> StoreResult<Option<T>> {
        self.require_collection(T::COLLECTION)?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM records WHERE collection = ?1 AND id = ?2;")?;
        let mut rows = stmt.query(params![T::COLLECTION, id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(decode_row::<T>(row)?));
        }
        Ok(None)
    }

    /// Returns all records whose indexed attribute equals `value`.
    pub fn get_by_index<T: StoredRecord>(&self, attr: &str, value: &str) -> StoreResult<Vec<T>> {
        let indexes = self.indexed_attrs(T::COLLECTION)?;
        if !indexes.iter().any(|candidate| candidate == attr) {
            return Err(StoreError::UnknownIndex {
                collection: T::COLLECTION.to_string(),
                attr: attr.to_string(),
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT r.id, r.body
             FROM records r
             JOIN record_index i
               ON i.collection = r.collection AND i.record_id = r.id
             WHERE r.collection = ?1 AND i.attr = ?2 AND i.value = ?3;",
        )?;
        let mut rows = stmt.query(params![T::COLLECTION, attr, value])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(decode_row::<T>(row)?);
        }
        Ok(records)
    }

    /// Removes one record and its index rows.
    pub fn delete<T: StoredRecord>(&mut self, id: RecordId) -> StoreResult<()> {
        self.require_collection(T::COLLECTION)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM record_index WHERE collection = ?1 AND record_id = ?2;",
            params![T::COLLECTION, id],
        )?;
        let changed = tx.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2;",
            params![T::COLLECTION, id],
        )?;
        tx.commit()?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION.to_string(),
                id,
            });
        }
        Ok(())
    }

    fn require_collection(&self, name: &str) -> StoreResult<()> {
        if self.registry.contains_key(name) {
            return Ok(());
        }
        Err(StoreError::UnknownCollection(name.to_string()))
    }

    fn indexed_attrs(&self, name: &str) -> StoreResult<&[String]> {
        self.registry
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::UnknownCollection(name.to_string()))
    }
}

fn load_registry(conn: &Connection) -> StoreResult<BTreeMap<String, Vec<String>>> {
    let mut stmt = conn.prepare("SELECT name, indexes FROM collections;")?;
    let mut rows = stmt.query([])?;

    let mut registry = BTreeMap::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        let indexes_json: String = row.get("indexes")?;
        let indexes: Vec<String> = serde_json::from_str(&indexes_json).map_err(|err| {
            StoreError::InvalidData(format!(
                "invalid index declaration for collection `{name}`: {err}"
            ))
        })?;
        registry.insert(name, indexes);
    }
    Ok(registry)
}

fn next_record_id(tx: &Transaction<'_>, collection: &str) -> StoreResult<RecordId> {
    let next = tx.query_row(
        "SELECT COALESCE(MAX(id), 0) + 1 FROM records WHERE collection = ?1;",
        params![collection],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(next)
}

fn decode_row<T: StoredRecord>(row: &Row<'_>) -> StoreResult<T> {
    let id: RecordId = row.get("id")?;
    let body: String = row.get("body")?;
    serde_json::from_str(&body).map_err(|err| {
        StoreError::InvalidData(format!(
            "record {id} in collection `{}` does not decode: {err}",
            T::COLLECTION
        ))
    })
}

/// Index attribute values are stored as text; strings keep their content,
/// numbers and booleans use their canonical display form.
fn index_value(body: &Value, attr: &str) -> Option<String> {
    match body.get(attr) {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    }
}
