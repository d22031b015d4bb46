//! Domain module services.
//!
//! # Responsibility
//! - Orchestrate record-store calls into per-module use-case APIs.
//! - Convert user input into validated records before persistence.
//!
//! # Invariants
//! - Every mutation persists immediately; services keep no dirty state.
//! - Services stay storage-agnostic beyond the record store contracts.

use crate::model::ValidationError;
use crate::store::{RecordId, StoreError, StoredRecord};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod catalog;
mod equipment;
mod finance;
mod inventory;
mod pos;
mod staff;

pub use catalog::{CatalogService, CatalogView, NewProduct, ProductUpdate};
pub use equipment::{EquipmentService, EquipmentView, NewEquipment};
pub use finance::{
    FinanceService, FinanceView, GoalProgress, NewInvestment, PeriodTotals, ProductStat,
    ProfitAnalysis, SalesMetrics, TopProduct, TrendDay, WindowProgress,
};
pub use inventory::{InventoryService, InventoryView, NewRawMaterial, StockAdjustment};
pub use pos::{
    Cart, CartLine, CheckoutReceipt, PosService, PosView, ProductTile, SalesHistoryView,
};
pub use staff::{
    EmployeeRow, PayrollSummary, StaffService, StaffView, BIWEEKLY_DAYS, DAILY_WAGE,
    MONTHLY_DAYS,
};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Module-level error, converted into a user notice at the shell boundary.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    InvalidInput(String),
    InsufficientStock { available: f64, requested: f64 },
    InsufficientFunds { available: f64, required: f64 },
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::InsufficientStock {
                available,
                requested,
            } => write!(
                f,
                "not enough stock: {requested} requested, {available} available"
            ),
            Self::InsufficientFunds {
                available,
                required,
            } => write!(
                f,
                "not enough funds: {required:.2} required, {available:.2} available"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Not-found for a typed collection, shaped like the store's own error.
pub(crate) fn not_found<T: StoredRecord>(id: RecordId) -> ServiceError {
    ServiceError::Store(StoreError::NotFound {
        collection: T::COLLECTION.to_string(),
        id,
    })
}

/// Adjustment amounts come straight from form input.
pub(crate) fn require_adjust_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ServiceError::InvalidInput(
            "enter a valid, non-negative amount".to_string(),
        ));
    }
    Ok(())
}
