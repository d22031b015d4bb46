//! Core domain logic for the Breadbox bakery console.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod service;
pub mod shell;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    EarningsLedger, Employee, EquipmentItem, Goals, Investment, InvestmentCategory,
    PaymentRecord, Presentation, PresentationKind, Product, RawMaterialItem, Sale,
    ValidationError,
};
pub use service::{
    Cart, CatalogService, EquipmentService, FinanceService, InventoryService, PosService,
    ServiceError, StaffService, StockAdjustment,
};
pub use shell::{format_money, Console, HomeSummary, ModuleId, Notice, NoticeKind};
pub use store::{
    default_collections, migrate_flat_store, FlatStore, RecordId, RecordStore, StoreError,
    StoredRecord, SINGLETON_ID,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
