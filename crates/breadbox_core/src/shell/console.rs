//! Console dispatcher and home summary.
//!
//! # Responsibility
//! - Own the record store, the in-memory cart and the active module.
//! - Wrap cross-module flows (checkout, payroll, legacy migration) and
//!   convert their errors into user notices.
//!
//! # Invariants
//! - All domain collections are declared before the console is handed out.
//! - A failed flow leaves prior state unchanged and produces exactly one
//!   error notice.

use crate::model::{Employee, EquipmentItem, PresentationKind, Product, RawMaterialItem, Sale};
use crate::service::{
    Cart, FinanceService, PosService, ServiceResult, StaffService, WindowProgress,
};
use crate::shell::{format_money, ModuleId, Notice};
use crate::store::{
    default_collections, migrate_flat_store, FlatStore, RecordId, RecordStore, StoreResult,
};
use chrono::NaiveDate;
use log::error;
use std::fmt::Display;
use std::path::Path;

/// Aggregate numbers for the home dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSummary {
    pub today_revenue: f64,
    pub today_units: u32,
    pub today_sales: usize,
    pub total_revenue: f64,
    pub total_sales: usize,
    pub active_employees: usize,
    pub total_employees: usize,
    pub equipment_invested: f64,
    pub equipment_count: usize,
    pub product_count: usize,
    pub raw_material_value: f64,
    pub raw_material_count: usize,
    pub daily_goal: WindowProgress,
}

/// Top-level application object: one store, one cart, one active module.
pub struct Console {
    store: RecordStore,
    cart: Cart,
    active: ModuleId,
}

impl Console {
    /// Opens the console over a database file and declares every
    /// collection.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let mut store = RecordStore::open(path)?;
        store.initialize(default_collections())?;
        Ok(Self {
            store,
            cart: Cart::default(),
            active: ModuleId::Home,
        })
    }

    /// In-memory console for tests and smoke probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        let mut store = RecordStore::open_in_memory()?;
        store.initialize(default_collections())?;
        Ok(Self {
            store,
            cart: Cart::default(),
            active: ModuleId::Home,
        })
    }

    pub fn active(&self) -> ModuleId {
        self.active
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Swaps the visible module; selecting home recomputes the summary.
    pub fn select(
        &mut self,
        module: ModuleId,
        today: NaiveDate,
    ) -> ServiceResult<Option<HomeSummary>> {
        self.active = module;
        if module == ModuleId::Home {
            return Ok(Some(self.home_summary(today)?));
        }
        Ok(None)
    }

    /// Recomputes the aggregate numbers for the home dashboard.
    pub fn home_summary(&mut self, today: NaiveDate) -> ServiceResult<HomeSummary> {
        let daily_goal = FinanceService::new(&mut self.store)
            .goal_progress(today)?
            .daily;

        let sales: Vec<Sale> = self.store.get_all()?;
        let employees: Vec<Employee> = self.store.get_all()?;
        let equipment: Vec<EquipmentItem> = self.store.get_all()?;
        let products: Vec<Product> = self.store.get_all()?;
        let raw_materials: Vec<RawMaterialItem> = self.store.get_all()?;

        let today_sales: Vec<&Sale> = sales.iter().filter(|sale| sale.date == today).collect();

        Ok(HomeSummary {
            today_revenue: today_sales.iter().map(|sale| sale.total).sum(),
            today_units: today_sales.iter().map(|sale| sale.units_sold).sum(),
            today_sales: today_sales.len(),
            total_revenue: sales.iter().map(|sale| sale.total).sum(),
            total_sales: sales.len(),
            active_employees: employees.iter().filter(|employee| employee.active).count(),
            total_employees: employees.len(),
            equipment_invested: equipment.iter().map(|item| item.price).sum(),
            equipment_count: equipment.len(),
            product_count: products.len(),
            raw_material_value: raw_materials
                .iter()
                .map(RawMaterialItem::total_value)
                .sum(),
            raw_material_count: raw_materials.len(),
            daily_goal,
        })
    }

    /// Puts a product presentation into the cart.
    pub fn add_to_cart(
        &mut self,
        product_id: RecordId,
        kind: PresentationKind,
        quantity: u32,
    ) -> Notice {
        let Self { store, cart, .. } = self;
        match PosService::new(store).add_to_cart(cart, product_id, kind, quantity) {
            Ok(()) => Notice::success("Product added to cart"),
            Err(err) => error_notice("add_to_cart", err),
        }
    }

    /// Removes one cart line by position.
    pub fn remove_cart_line(&mut self, index: usize) -> Notice {
        match self.cart.remove_line(index) {
            Some(line) => Notice::info(format!("Removed {} from cart", line.product_name)),
            None => Notice::error("No such cart line"),
        }
    }

    /// Finalizes the current cart as a sale.
    pub fn checkout(&mut self, today: NaiveDate) -> Notice {
        let result = PosService::new(&mut self.store).checkout(&mut self.cart, today);
        match result {
            Ok(receipt) => Notice::success(format!(
                "Sale completed: {}",
                format_money(receipt.total)
            )),
            Err(err) => error_notice("checkout", err),
        }
    }

    /// Pays the biweekly payroll out of the earnings ledger.
    pub fn pay_payroll(&mut self, today: NaiveDate) -> Notice {
        match StaffService::new(&mut self.store).pay_payroll(today) {
            Ok(payment) => Notice::success(format!(
                "Payroll paid: {}",
                format_money(payment.amount)
            )),
            Err(err) => error_notice("pay_payroll", err),
        }
    }

    /// One-time copy of legacy flat-store data into the record store.
    pub fn migrate_legacy(&mut self, flat: &FlatStore) -> Notice {
        match migrate_flat_store(flat, &mut self.store) {
            Ok(report) => Notice::info(format!(
                "Migrated {} legacy records",
                report.total()
            )),
            Err(err) => error_notice("migrate_legacy", err),
        }
    }
}

fn error_notice(action: &str, err: impl Display) -> Notice {
    error!("event=notice module=shell status=error action={action} error={err}");
    Notice::error(err.to_string())
}
