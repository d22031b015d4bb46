//! Record store layer: generic named-collection persistence.
//!
//! # Responsibility
//! - Define the store access contracts shared by every domain module.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Record identifiers are unique within their collection.
//! - A batch put commits atomically or not at all.
//! - No invariant spans collections; relations are matched at read time.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod flat;
mod record_store;

pub use flat::{
    migrate_flat_store, FlatStore, FlatStoreError, MigrationError, MigrationReport,
};
pub use record_store::{
    default_collections, CollectionSpec, RecordId, RecordStore, StoredRecord, SINGLETON_ID,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for persistence and lookup operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    UnknownCollection(String),
    UnknownIndex { collection: String, attr: String },
    NotFound { collection: String, id: i64 },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownCollection(name) => write!(f, "unknown collection `{name}`"),
            Self::UnknownIndex { collection, attr } => {
                write!(f, "collection `{collection}` has no index on `{attr}`")
            }
            Self::NotFound { collection, id } => {
                write!(f, "no record {id} in collection `{collection}`")
            }
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
