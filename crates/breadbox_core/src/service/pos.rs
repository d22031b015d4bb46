//! Point-of-sale module: cart, checkout and sales history.
//!
//! # Responsibility
//! - Hold the in-memory cart and turn it into persisted sales.
//! - Serve the sales history read model.
//!
//! # Invariants
//! - A cart line is only accepted while the product has enough stock.
//! - Checkout re-verifies stock for the whole cart and rejects it entirely
//!   on any shortage, leaving every collection unchanged.
//! - The sale batch of one checkout commits atomically.

use crate::model::{Goals, PresentationKind, Product, Sale};
use crate::service::{not_found, ServiceError, ServiceResult};
use crate::store::{RecordId, RecordStore, SINGLETON_ID};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;

/// One cart entry: a quantity of one presentation of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: RecordId,
    pub product_name: String,
    pub presentation: PresentationKind,
    pub units_per_presentation: u32,
    pub quantity: u32,
    /// Total single units this line takes from stock.
    pub units: u32,
    /// Price of one presentation.
    pub unit_price: f64,
    pub total: f64,
}

/// In-memory shopping cart; lives in the shell, not in storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.total).sum()
    }

    pub fn units(&self) -> u32 {
        self.lines.iter().map(|line| line.units).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Removes one line by position; out-of-range indexes are ignored.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub sale_ids: Vec<RecordId>,
    pub total: f64,
    pub units: u32,
    pub line_count: usize,
}

/// Product button on the sale screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTile {
    pub id: RecordId,
    pub name: String,
    pub base_price: f64,
    pub stock: u32,
    pub out_of_stock: bool,
}

/// Everything the point-of-sale screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PosView {
    pub tiles: Vec<ProductTile>,
    pub cart: Vec<CartLine>,
    pub cart_total: f64,
    pub today_revenue: f64,
    pub daily_goal_target: f64,
    pub daily_goal_percent: f64,
}

impl PosView {
    /// Case-insensitive tile filter for the search box.
    pub fn filter_tiles(&self, query: &str) -> Vec<&ProductTile> {
        let needle = query.to_lowercase();
        self.tiles
            .iter()
            .filter(|tile| tile.name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Everything the sales history screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesHistoryView {
    /// Sorted by date, newest first.
    pub rows: Vec<Sale>,
    pub total_revenue: f64,
    pub total_units: u32,
    pub sale_count: usize,
}

pub struct PosService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> PosService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Adds a line to the cart after checking the product's current stock.
    pub fn add_to_cart(
        &self,
        cart: &mut Cart,
        product_id: RecordId,
        kind: PresentationKind,
        quantity: u32,
    ) -> ServiceResult<()> {
        if quantity == 0 {
            return Err(ServiceError::InvalidInput(
                "quantity must be at least 1".to_string(),
            ));
        }

        let product: Product = self
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

        cart.lines.push(CartLine {
            product_id,
            product_name: product.name.clone(),
            presentation: kind,
            units_per_presentation: presentation.units,
            quantity,
            units,
            unit_price: presentation.price,
            total: presentation.price * f64::from(quantity),
        });
        Ok(())
    }

    /// Persists the cart as one sale per line, dated `today`, and applies
    /// the stock movement to each product.
    ///
    /// # Contract
    /// - The whole cart is re-verified against current stock first; any
    ///   shortage rejects the checkout with no state change.
    /// - The sale records commit in a single atomic batch.
    /// - The cart is cleared only after a successful commit.
    pub fn checkout(&mut self, cart: &mut Cart, today: NaiveDate) -> ServiceResult<CheckoutReceipt> {
        if cart.is_empty() {
            return Err(ServiceError::InvalidInput("the cart is empty".to_string()));
        }

        // Several lines may draw from the same product.
        let mut required_units: BTreeMap<RecordId, u32> = BTreeMap::new();
        for line in cart.lines() {
            *required_units.entry(line.product_id).or_insert(0) += line.units;
        }

        let mut products: BTreeMap<RecordId, Product> = BTreeMap::new();
        for (&product_id, &units) in &required_units {
            let product: Product = self
                .store
                .get_by_id(product_id)?
                .ok_or_else(|| not_found::<Product>(product_id))?;
            if product.stock < units {
                return Err(ServiceError::InsufficientStock {
                    available: f64::from(product.stock),
                    requested: f64::from(units),
                });
            }
            products.insert(product_id, product);
        }

        let mut sales: Vec<Sale> = cart
            .lines()
            .iter()
            .map(|line| Sale {
                id: None,
                date: today,
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                presentation: line.presentation,
                units_per_presentation: line.units_per_presentation,
                quantity: line.quantity,
                units_sold: line.units,
                unit_price: line.unit_price,
                total: line.total,
            })
            .collect();

        let sale_ids = self.store.put_all(&mut sales)?;

        for (product_id, units) in required_units {
            if let Some(product) = products.get_mut(&product_id) {
                product.stock -= units;
                product.units_sold += units;
                self.store.put(product)?;
            }
        }

        let receipt = CheckoutReceipt {
            sale_ids,
            total: cart.total(),
            units: cart.units(),
            line_count: cart.len(),
        };
        cart.clear();

        info!(
            "event=checkout module=pos status=ok lines={} units={} total={:.2}",
            receipt.line_count, receipt.units, receipt.total
        );
        Ok(receipt)
    }

    /// Sales recorded on one calendar day, via the date index.
    pub fn sales_on(&self, date: NaiveDate) -> ServiceResult<Vec<Sale>> {
        Ok(self.store.get_by_index("date", &date.to_string())?)
    }

    /// Sales of one product, via the product-id index.
    pub fn sales_of_product(&self, product_id: RecordId) -> ServiceResult<Vec<Sale>> {
        Ok(self
            .store
            .get_by_index("product_id", &product_id.to_string())?)
    }

    pub fn view(&self, cart: &Cart, today: NaiveDate) -> ServiceResult<PosView> {
        let mut products: Vec<Product> = self.store.get_all()?;
        products.sort_by_key(|product| product.id);

        let tiles = products
            .iter()
            .map(|product| ProductTile {
                id: product.id.unwrap_or_default(),
                name: product.name.clone(),
                base_price: product.base_price(),
                stock: product.stock,
                out_of_stock: product.out_of_stock(),
            })
            .collect();

        let today_revenue: f64 = self.sales_on(today)?.iter().map(|sale| sale.total).sum();
        let goals: Goals = self
            .store
            .get_by_id(SINGLETON_ID)?
            .unwrap_or_default();
        let daily_goal_percent = if goals.daily > 0.0 {
            (today_revenue / goals.daily * 100.0).min(100.0)
        } else {
            0.0
        };

        Ok(PosView {
            tiles,
            cart: cart.lines().to_vec(),
            cart_total: cart.total(),
            today_revenue,
            daily_goal_target: goals.daily,
            daily_goal_percent,
        })
    }

    pub fn history(&self) -> ServiceResult<SalesHistoryView> {
        let mut rows: Vec<Sale> = self.store.get_all()?;
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        let total_revenue = rows.iter().map(|sale| sale.total).sum();
        let total_units = rows.iter().map(|sale| sale.units_sold).sum();
        let sale_count = rows.len();

        Ok(SalesHistoryView {
            rows,
            total_revenue,
            total_units,
            sale_count,
        })
    }
}
