//! Legacy flat key/value store and its one-time migration.
//!
//! # Responsibility
//! - Read/write the legacy persistence format: one flat key per domain
//!   collection inside a single JSON document on disk.
//! - Copy legacy data into the record store exactly once on demand.
//!
//! # Invariants
//! - The flat store and the record store are never synchronized
//!   automatically; `migrate_flat_store` is an explicit manual copy.
//! - The goals and earnings singletons are pinned to the fixed singleton id
//!   during migration.

use crate::model::{
    EarningsLedger, Employee, EquipmentItem, Goals, Investment, PaymentRecord, Product,
    RawMaterialItem, Sale,
};
use crate::store::{RecordStore, StoreError, StoredRecord, SINGLETON_ID};
use log::info;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SALES_KEY: &str = "sales";
pub const PRODUCTS_KEY: &str = "products";
pub const EMPLOYEES_KEY: &str = "employees";
pub const RAW_MATERIALS_KEY: &str = "raw_materials";
pub const INVESTMENTS_KEY: &str = "investments";
pub const EQUIPMENT_KEY: &str = "equipment";
pub const GOALS_KEY: &str = "goals";
pub const EARNINGS_KEY: &str = "biweekly_earnings";
pub const PAYMENT_LOG_KEY: &str = "payment_log";

/// Flat string key/value document, the legacy persistence path.
///
/// Every `set` rewrites the whole document; callers are single-threaded.
pub struct FlatStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FlatStore {
    /// Opens the document at `path`; a missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FlatStoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|err| FlatStoreError::Malformed(err.to_string()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(FlatStoreError::Io(err)),
        };
        Ok(Self { path, entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), FlatStoreError> {
        self.entries.insert(key.to_string(), value.into());
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), FlatStoreError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn persist(&self) -> Result<(), FlatStoreError> {
        let document = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| FlatStoreError::Malformed(err.to_string()))?;
        fs::write(&self.path, document).map_err(FlatStoreError::Io)
    }
}

#[derive(Debug)]
pub enum FlatStoreError {
    Io(io::Error),
    Malformed(String),
}

impl Display for FlatStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Malformed(message) => write!(f, "malformed flat store document: {message}"),
        }
    }
}

impl Error for FlatStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(_) => None,
        }
    }
}

/// Per-collection copy counts from a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub copied: BTreeMap<&'static str, usize>,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.copied.values().sum()
    }
}

#[derive(Debug)]
pub enum MigrationError {
    Store(StoreError),
    Malformed { key: String, message: String },
}

impl Display for MigrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Malformed { key, message } => {
                write!(f, "legacy key `{key}` does not parse: {message}")
            }
        }
    }
}

impl Error for MigrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<StoreError> for MigrationError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Copies every known legacy key into the record store.
///
/// Missing keys are skipped; present-but-unparseable keys abort the run so
/// nothing is silently dropped. Records keep their legacy ids; id-less
/// legacy records receive fresh ones from the store.
pub fn migrate_flat_store(
    flat: &FlatStore,
    store: &mut RecordStore,
) -> Result<MigrationReport, MigrationError> {
    let mut report = MigrationReport::default();

    copy_collection::<Sale>(flat, store, SALES_KEY, &mut report)?;
    copy_collection::<Product>(flat, store, PRODUCTS_KEY, &mut report)?;
    copy_collection::<Employee>(flat, store, EMPLOYEES_KEY, &mut report)?;
    copy_collection::<RawMaterialItem>(flat, store, RAW_MATERIALS_KEY, &mut report)?;
    copy_collection::<Investment>(flat, store, INVESTMENTS_KEY, &mut report)?;
    copy_collection::<EquipmentItem>(flat, store, EQUIPMENT_KEY, &mut report)?;
    copy_collection::<PaymentRecord>(flat, store, PAYMENT_LOG_KEY, &mut report)?;

    if let Some(raw) = flat.get(GOALS_KEY) {
        let mut goals: Goals = parse_key(GOALS_KEY, raw)?;
        goals.id = Some(SINGLETON_ID);
        store.put(&mut goals)?;
        report.copied.insert(Goals::COLLECTION, 1);
    }

    if let Some(raw) = flat.get(EARNINGS_KEY) {
        let biweekly: f64 = raw.trim().parse().map_err(|_| MigrationError::Malformed {
            key: EARNINGS_KEY.to_string(),
            message: format!("`{raw}` is not a number"),
        })?;
        let mut ledger = EarningsLedger {
            id: Some(SINGLETON_ID),
            biweekly,
        };
        store.put(&mut ledger)?;
        report.copied.insert(EarningsLedger::COLLECTION, 1);
    }

    info!(
        "event=flat_migration module=store status=ok copied={}",
        report.total()
    );
    Ok(report)
}

fn copy_collection<T: StoredRecord + DeserializeOwned>(
    flat: &FlatStore,
    store: &mut RecordStore,
    key: &str,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    let Some(raw) = flat.get(key) else {
        return Ok(());
    };

    let mut records: Vec<T> = parse_key(key, raw)?;
    store.put_all(&mut records)?;
    report.copied.insert(T::COLLECTION, records.len());
    Ok(())
}

fn parse_key<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, MigrationError> {
    serde_json::from_str(raw).map_err(|err| MigrationError::Malformed {
        key: key.to_string(),
        message: err.to_string(),
    })
}
