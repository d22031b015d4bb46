//! Sale line model.

use crate::model::product::PresentationKind;
use crate::store::{RecordId, StoredRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sold line: a quantity of one presentation of one product.
///
/// The product name is a snapshot taken at checkout; deleting the product
/// later does not rewrite past sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: NaiveDate,
    pub product_id: RecordId,
    pub product_name: String,
    pub presentation: PresentationKind,
    pub units_per_presentation: u32,
    /// Presentations sold (bags or single pieces).
    pub quantity: u32,
    /// Total single units leaving stock: `units_per_presentation * quantity`.
    pub units_sold: u32,
    /// Price of one presentation at sale time.
    pub unit_price: f64,
    pub total: f64,
}

impl Sale {
    /// Human-readable presentation, e.g. `Unit` or `Bag (5 units)`.
    pub fn presentation_label(&self) -> String {
        match self.presentation {
            PresentationKind::Unit => "Unit".to_string(),
            PresentationKind::Bag => format!("Bag ({} units)", self.units_per_presentation),
        }
    }
}

impl StoredRecord for Sale {
    const COLLECTION: &'static str = "sales";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
