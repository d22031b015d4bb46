use breadbox_core::model::{Goals, Product, Sale};
use breadbox_core::store::{
    default_collections, RecordStore, StoreError, StoredRecord, SINGLETON_ID,
};
use breadbox_core::PresentationKind;
use chrono::NaiveDate;
use std::collections::BTreeSet;

fn open_store() -> RecordStore {
    let mut store = RecordStore::open_in_memory().unwrap();
    store.initialize(default_collections()).unwrap();
    store
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sale_on(day: NaiveDate, product_id: i64, total: f64) -> Sale {
    Sale {
        id: None,
        date: day,
        product_id,
        product_name: "Baguette".to_string(),
        presentation: PresentationKind::Unit,
        units_per_presentation: 1,
        quantity: 1,
        units_sold: 1,
        unit_price: total,
        total,
    }
}

#[test]
fn put_assigns_unique_fresh_ids_to_every_id_less_record() {
    let mut store = open_store();

    let mut first = Product::new("Baguette", 1.5, None);
    store.put(&mut first).unwrap();

    let mut batch = vec![
        Product::new("Croissant", 2.0, Some(9.0)),
        Product::new("Brioche", 3.5, None),
        Product::new("Roll", 1.0, None),
    ];
    let ids = store.put_all(&mut batch).unwrap();

    let mut seen: BTreeSet<i64> = BTreeSet::new();
    seen.insert(first.id.unwrap());
    for (product, id) in batch.iter().zip(&ids) {
        assert_eq!(product.id, Some(*id));
        assert!(seen.insert(*id), "id {id} was reused");
    }
}

#[test]
fn get_all_returns_exactly_the_put_records() {
    let mut store = open_store();

    let mut batch = vec![
        Product::new("Baguette", 1.5, None),
        Product::new("Croissant", 2.0, None),
        Product::new("Brioche", 3.5, None),
    ];
    store.put_all(&mut batch).unwrap();

    let loaded: Vec<Product> = store.get_all().unwrap();
    assert_eq!(loaded.len(), batch.len());

    let expected: BTreeSet<String> = batch.iter().map(|product| product.name.clone()).collect();
    let actual: BTreeSet<String> = loaded.iter().map(|product| product.name.clone()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn get_by_id_roundtrips_the_stored_record() {
    let mut store = open_store();

    let mut product = Product::new("Croissant", 2.0, Some(9.0));
    let id = store.put(&mut product).unwrap();

    let loaded: Product = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, product);

    let missing: Option<Product> = store.get_by_id(9999).unwrap();
    assert!(missing.is_none());
}

#[test]
fn deleted_records_never_reappear() {
    let mut store = open_store();

    let mut keep = Product::new("Baguette", 1.5, None);
    let mut drop = Product::new("Croissant", 2.0, None);
    store.put(&mut keep).unwrap();
    let drop_id = store.put(&mut drop).unwrap();

    store.delete::<Product>(drop_id).unwrap();

    let loaded: Vec<Product> = store.get_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Baguette");
    assert!(store.get_by_id::<Product>(drop_id).unwrap().is_none());

    let err = store.delete::<Product>(drop_id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn updates_overwrite_in_place_without_growing_the_collection() {
    let mut store = open_store();

    let mut product = Product::new("Baguette", 1.5, None);
    store.put(&mut product).unwrap();

    product.stock = 40;
    store.put(&mut product).unwrap();

    let loaded: Vec<Product> = store.get_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].stock, 40);
}

#[test]
fn explicit_ids_are_kept_and_never_recycled() {
    let mut store = open_store();

    let mut explicit = Product::new("Baguette", 1.5, None);
    explicit.id = Some(42);
    store.put(&mut explicit).unwrap();
    assert_eq!(explicit.id, Some(42));

    let mut fresh = Product::new("Croissant", 2.0, None);
    let fresh_id = store.put(&mut fresh).unwrap();
    assert!(fresh_id > 42);
}

#[test]
fn secondary_index_lookup_matches_only_the_requested_value() {
    let mut store = open_store();

    let march_first = date(2026, 3, 1);
    let march_second = date(2026, 3, 2);
    let mut sales = vec![
        sale_on(march_first, 1, 5.0),
        sale_on(march_first, 2, 7.0),
        sale_on(march_second, 1, 3.0),
    ];
    store.put_all(&mut sales).unwrap();

    let on_first: Vec<Sale> = store.get_by_index("date", "2026-03-01").unwrap();
    assert_eq!(on_first.len(), 2);

    let of_product: Vec<Sale> = store.get_by_index("product_id", "1").unwrap();
    assert_eq!(of_product.len(), 2);

    let err = store.get_by_index::<Sale>("supplier", "x").unwrap_err();
    assert!(matches!(err, StoreError::UnknownIndex { .. }));
}

#[test]
fn index_rows_follow_updates_and_deletes() {
    let mut store = open_store();

    let mut sale = sale_on(date(2026, 3, 1), 1, 5.0);
    let id = store.put(&mut sale).unwrap();

    sale.date = date(2026, 3, 9);
    store.put(&mut sale).unwrap();

    assert!(store
        .get_by_index::<Sale>("date", "2026-03-01")
        .unwrap()
        .is_empty());
    assert_eq!(
        store.get_by_index::<Sale>("date", "2026-03-09").unwrap().len(),
        1
    );

    store.delete::<Sale>(id).unwrap();
    assert!(store
        .get_by_index::<Sale>("date", "2026-03-09")
        .unwrap()
        .is_empty());
}

#[test]
fn undeclared_collections_are_rejected_before_any_write() {
    let mut bare = RecordStore::open_in_memory().unwrap();

    let mut product = Product::new("Baguette", 1.5, None);
    let err = bare.put(&mut product).unwrap_err();
    assert!(matches!(err, StoreError::UnknownCollection(_)));

    bare.initialize(default_collections()).unwrap();
    let loaded: Vec<Product> = bare.get_all().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn initialize_is_idempotent_and_preserves_records() {
    let mut store = open_store();

    let mut product = Product::new("Baguette", 1.5, None);
    store.put(&mut product).unwrap();

    store.initialize(default_collections()).unwrap();
    let loaded: Vec<Product> = store.get_all().unwrap();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn singleton_records_stay_single_under_repeated_puts() {
    let mut store = open_store();

    let mut goals = Goals::default();
    store.put(&mut goals).unwrap();
    goals.daily = 250.0;
    store.put(&mut goals).unwrap();

    let all: Vec<Goals> = store.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, Some(SINGLETON_ID));
    assert_eq!(all[0].daily, 250.0);
    assert_eq!(Goals::COLLECTION, "goals");
}
