//! Raw-material inventory model.
//!
//! # Invariants
//! - Quantities are measured in the item's own unit and may be fractional.
//! - Low-stock thresholds depend on the measure unit, not the item.

use crate::model::{require_amount, require_text, ValidationError};
use crate::store::{RecordId, StoredRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureUnit {
    Kilograms,
    Liters,
    Units,
    Grams,
}

impl MeasureUnit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Liters => "l",
            Self::Units => "units",
            Self::Grams => "g",
        }
    }

    /// Quantity under which an item counts as running low.
    pub fn low_stock_threshold(&self) -> f64 {
        match self {
            Self::Kilograms | Self::Liters => 10.0,
            Self::Units => 50.0,
            Self::Grams => 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialItem {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub name: String,
    pub quantity: f64,
    pub unit: MeasureUnit,
    pub unit_price: f64,
    pub supplier: String,
    pub purchased_on: NaiveDate,
}

impl RawMaterialItem {
    /// Current stock value: quantity times unit price.
    pub fn total_value(&self) -> f64 {
        self.quantity * self.unit_price
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.unit.low_stock_threshold()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("supplier", &self.supplier)?;
        require_amount("quantity", self.quantity)?;
        require_amount("unit_price", self.unit_price)?;
        Ok(())
    }
}

impl StoredRecord for RawMaterialItem {
    const COLLECTION: &'static str = "raw_materials";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
