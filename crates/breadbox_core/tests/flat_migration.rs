use breadbox_core::model::{
    EarningsLedger, EquipmentItem, Goals, Product, RawMaterialItem,
};
use breadbox_core::store::{
    default_collections, migrate_flat_store, FlatStore, MigrationError, RecordStore,
    StoredRecord, SINGLETON_ID,
};
use tempfile::TempDir;

fn open_store() -> RecordStore {
    let mut store = RecordStore::open_in_memory().unwrap();
    store.initialize(default_collections()).unwrap();
    store
}

fn flat_store(dir: &TempDir) -> FlatStore {
    FlatStore::open(dir.path().join("legacy.json")).unwrap()
}

#[test]
fn flat_store_reads_back_what_it_wrote() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.json");

    let mut flat = FlatStore::open(&path).unwrap();
    assert!(flat.get("products").is_none());

    flat.set("products", "[]").unwrap();
    flat.set("biweekly_earnings", "2500").unwrap();

    let reopened = FlatStore::open(&path).unwrap();
    assert_eq!(reopened.get("products"), Some("[]"));
    assert_eq!(reopened.get("biweekly_earnings"), Some("2500"));
    assert_eq!(reopened.keys().count(), 2);
}

#[test]
fn migration_copies_every_known_key() {
    let dir = TempDir::new().unwrap();
    let mut flat = flat_store(&dir);
    flat.set(
        "products",
        r#"[{"id":1,"name":"French Bread","presentations":[{"kind":"unit","price":1.5,"units":1},{"kind":"bag","price":7.0,"units":5}],"stock":100,"units_sold":0}]"#,
    )
    .unwrap();
    flat.set(
        "raw_materials",
        r#"[{"id":1,"name":"Flour","quantity":50.0,"unit":"kilograms","unit_price":0.8,"supplier":"Central Distributor","purchased_on":"2026-02-01"}]"#,
    )
    .unwrap();
    // Legacy equipment rows never carried ids.
    flat.set(
        "equipment",
        r#"[{"purchased_on":"2026-02-01","price":150.5,"supplier":"Industrial Ovens SA"},{"purchased_on":"2026-02-10","price":1200.0,"supplier":"Bakery Refrigeration"}]"#,
    )
    .unwrap();
    flat.set("goals", r#"{"daily":120.0,"biweekly":1800.0,"monthly":3000.0}"#)
        .unwrap();
    flat.set("biweekly_earnings", "3100.5").unwrap();

    let mut store = open_store();
    let report = migrate_flat_store(&flat, &mut store).unwrap();
    assert_eq!(report.total(), 6);
    assert_eq!(report.copied[Product::COLLECTION], 1);
    assert_eq!(report.copied[EquipmentItem::COLLECTION], 2);

    let products: Vec<Product> = store.get_all().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, Some(1));
    assert_eq!(products[0].presentations.len(), 2);

    let materials: Vec<RawMaterialItem> = store.get_all().unwrap();
    assert_eq!(materials[0].name, "Flour");

    let equipment: Vec<EquipmentItem> = store.get_all().unwrap();
    assert_eq!(equipment.len(), 2);
    assert!(equipment.iter().all(|item| item.id.is_some()));

    let goals: Goals = store.get_by_id(SINGLETON_ID).unwrap().unwrap();
    assert_eq!(goals.daily, 120.0);
    assert_eq!(goals.monthly, 3000.0);

    let ledger: EarningsLedger = store.get_by_id(SINGLETON_ID).unwrap().unwrap();
    assert_eq!(ledger.biweekly, 3100.5);
}

#[test]
fn migration_with_no_legacy_keys_copies_nothing() {
    let dir = TempDir::new().unwrap();
    let flat = flat_store(&dir);

    let mut store = open_store();
    let report = migrate_flat_store(&flat, &mut store).unwrap();
    assert_eq!(report.total(), 0);
    assert!(report.copied.is_empty());
}

#[test]
fn malformed_legacy_data_aborts_with_the_offending_key() {
    let dir = TempDir::new().unwrap();
    let mut flat = flat_store(&dir);
    flat.set("products", "not json at all").unwrap();

    let mut store = open_store();
    let err = migrate_flat_store(&flat, &mut store).unwrap_err();
    match err {
        MigrationError::Malformed { key, .. } => assert_eq!(key, "products"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_earnings_scalar_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut flat = flat_store(&dir);
    flat.set("biweekly_earnings", "lots of money").unwrap();

    let mut store = open_store();
    let err = migrate_flat_store(&flat, &mut store).unwrap_err();
    assert!(matches!(err, MigrationError::Malformed { .. }));
}
