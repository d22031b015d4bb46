//! Product catalog module.
//!
//! # Responsibility
//! - Own the `products` collection: create, edit, delete, search.
//! - Apply stock movements when sales are registered.
//!
//! # Invariants
//! - A product write always passes `Product::validate()` first.
//! - Registering a sale never drives stock below zero.

use crate::model::{PresentationKind, Product};
use crate::service::{not_found, ServiceError, ServiceResult};
use crate::store::{RecordId, RecordStore};

/// Input for a new catalog entry. The bag price is optional; products
/// without one sell by the unit only.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: f64,
    pub bag_price: Option<f64>,
}

/// Full edit of an existing catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub unit_price: f64,
    pub bag_price: Option<f64>,
    pub stock: u32,
}

/// Everything the catalog screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub products: Vec<Product>,
}

pub struct CatalogService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> CatalogService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Registers a new product and returns it with its assigned id.
    pub fn add_product(&mut self, request: NewProduct) -> ServiceResult<Product> {
        let mut product = Product::new(request.name, request.unit_price, request.bag_price);
        product.validate()?;
        self.store.put(&mut product)?;
        Ok(product)
    }

    /// Rebuilds the presentations from the given prices and replaces the
    /// stock counter; the sold counter is preserved.
    pub fn update_product(
        &mut self,
        id: RecordId,
        request: ProductUpdate,
    ) -> ServiceResult<Product> {
        let existing: Product = self
            .store
            .get_by_id(id)?
            .ok_or_else(|| not_found::<Product>(id))?;

        let mut updated = Product::new(request.name, request.unit_price, request.bag_price);
        updated.id = existing.id;
        updated.stock = request.stock;
        updated.units_sold = existing.units_sold;
        updated.validate()?;

        self.store.put(&mut updated)?;
        Ok(updated)
    }

    pub fn delete_product(&mut self, id: RecordId) -> ServiceResult<()> {
        self.store.delete::<Product>(id)?;
        Ok(())
    }

    /// All products, ordered by id for stable display.
    pub fn products(&self) -> ServiceResult<Vec<Product>> {
        let mut products: Vec<Product> = self.store.get_all()?;
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    /// Exact-name lookup through the secondary index.
    pub fn find_by_name(&self, name: &str) -> ServiceResult<Vec<Product>> {
        Ok(self.store.get_by_index("name", name)?)
    }

    /// Case-insensitive substring search over product names.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let products = self.products()?;
        Ok(products
            .into_iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Moves `quantity` presentations of the given kind out of stock and
    /// onto the sold counter.
    pub fn register_sale(
        &mut self,
        product_id: RecordId,
        kind: PresentationKind,
        quantity: u32,
    ) -> ServiceResult<Product> {
        let mut product: Product = self
            .store
            .get_by_id(product_id)?
            .ok_or_else(|| not_found::<Product>(product_id))?;

        let presentation = product.presentation(kind).ok_or_else(|| {
            ServiceError::InvalidInput(format!(
                "product `{}` is not sold per {}",
                product.name,
                kind.label().to_lowercase()
            ))
        })?;

        let units = presentation.units * quantity;
        if product.stock < units {
            return Err(ServiceError::InsufficientStock {
                available: f64::from(product.stock),
                requested: f64::from(units),
            });
        }

        product.stock -= units;
        product.units_sold += units;
        self.store.put(&mut product)?;
        Ok(product)
    }

    pub fn view(&self) -> ServiceResult<CatalogView> {
        Ok(CatalogView {
            products: self.products()?,
        })
    }
}
