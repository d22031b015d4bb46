//! Typed record shapes, one module per collection.
//!
//! # Responsibility
//! - Define the canonical data structures persisted by the record store.
//! - Validate user-entered values before they reach persistence.
//!
//! # Invariants
//! - Every record carries `Option<RecordId>`; the store assigns ids.
//! - No invariant is enforced across collections; a sale keeps its own
//!   snapshot of the product name it referenced.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod employee;
mod equipment;
mod goals;
mod investment;
mod ledger;
mod product;
mod raw_material;
mod sale;

pub use employee::{Employee, PaymentRecord};
pub use equipment::EquipmentItem;
pub use goals::Goals;
pub use investment::{Investment, InvestmentCategory};
pub use ledger::EarningsLedger;
pub use product::{Presentation, PresentationKind, Product, BAG_UNITS, INITIAL_STOCK};
pub use raw_material::{MeasureUnit, RawMaterialItem};
pub use sale::Sale;

/// Rejection reasons for user-entered record values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField(&'static str),
    NegativeAmount(&'static str),
    MissingPresentation,
    ZeroUnitCount,
    NonPositiveTarget(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "field `{field}` must not be empty"),
            Self::NegativeAmount(field) => {
                write!(f, "field `{field}` must be a non-negative number")
            }
            Self::MissingPresentation => {
                write!(f, "a product needs at least one presentation")
            }
            Self::ZeroUnitCount => {
                write!(f, "a presentation must contain at least one unit")
            }
            Self::NonPositiveTarget(field) => {
                write!(f, "goal `{field}` must be greater than zero")
            }
        }
    }
}

impl Error for ValidationError {}

/// A non-empty, non-whitespace check shared by the name-carrying records.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

/// Amounts entered by the user must be finite and non-negative.
pub(crate) fn require_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::NegativeAmount(field));
    }
    Ok(())
}
