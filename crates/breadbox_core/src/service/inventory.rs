//! Raw-material inventory module.
//!
//! # Responsibility
//! - Own the `raw_materials` collection: intake, stock adjustment, removal.
//!
//! # Invariants
//! - Consuming more than the available quantity is rejected with no state
//!   change.

use crate::model::{MeasureUnit, RawMaterialItem};
use crate::service::{not_found, require_adjust_amount, ServiceError, ServiceResult};
use crate::store::{RecordId, RecordStore};
use chrono::NaiveDate;

/// Input for a new inventory item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRawMaterial {
    pub name: String,
    pub quantity: f64,
    pub unit: MeasureUnit,
    pub unit_price: f64,
    pub supplier: String,
    pub purchased_on: NaiveDate,
}

/// Stock adjustment operations offered by the inventory screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockAdjustment {
    /// Restock: add the amount to the current quantity.
    Add(f64),
    /// Consume/spend: subtract, rejected when more than available.
    Consume(f64),
    /// Replace the quantity with an exact count.
    Set(f64),
}

/// Everything the inventory screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    pub items: Vec<RawMaterialItem>,
    pub total_invested: f64,
    pub low_stock_count: usize,
}

pub struct InventoryService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> InventoryService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    pub fn add_item(&mut self, request: NewRawMaterial) -> ServiceResult<RawMaterialItem> {
        let mut item = RawMaterialItem {
            id: None,
            name: request.name,
            quantity: request.quantity,
            unit: request.unit,
            unit_price: request.unit_price,
            supplier: request.supplier,
            purchased_on: request.purchased_on,
        };
        item.validate()?;
        self.store.put(&mut item)?;
        Ok(item)
    }

    /// Applies one stock adjustment and returns the new quantity.
    pub fn adjust_stock(
        &mut self,
        id: RecordId,
        adjustment: StockAdjustment,
    ) -> ServiceResult<f64> {
        let mut item: RawMaterialItem = self
            .store
            .get_by_id(id)?
            .ok_or_else(|| not_found::<RawMaterialItem>(id))?;

        let new_quantity = match adjustment {
            StockAdjustment::Add(amount) => {
                require_adjust_amount(amount)?;
                item.quantity + amount
            }
            StockAdjustment::Consume(amount) => {
                require_adjust_amount(amount)?;
                if item.quantity < amount {
                    return Err(ServiceError::InsufficientStock {
                        available: item.quantity,
                        requested: amount,
                    });
                }
                item.quantity - amount
            }
            StockAdjustment::Set(amount) => {
                require_adjust_amount(amount)?;
                amount
            }
        };

        item.quantity = new_quantity;
        self.store.put(&mut item)?;
        Ok(new_quantity)
    }

    pub fn delete_item(&mut self, id: RecordId) -> ServiceResult<()> {
        self.store.delete::<RawMaterialItem>(id)?;
        Ok(())
    }

    pub fn items(&self) -> ServiceResult<Vec<RawMaterialItem>> {
        let mut items: Vec<RawMaterialItem> = self.store.get_all()?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    pub fn view(&self) -> ServiceResult<InventoryView> {
        let items = self.items()?;
        let total_invested = items.iter().map(RawMaterialItem::total_value).sum();
        let low_stock_count = items.iter().filter(|item| item.is_low_stock()).count();

        Ok(InventoryView {
            items,
            total_invested,
            low_stock_count,
        })
    }
}
