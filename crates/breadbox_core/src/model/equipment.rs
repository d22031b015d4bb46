//! Equipment purchase model.

use crate::model::{require_amount, require_text, ValidationError};
use crate::store::{RecordId, StoredRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A one-off equipment purchase (oven, mixer, fridge, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub purchased_on: NaiveDate,
    pub price: f64,
    pub supplier: String,
}

impl EquipmentItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("supplier", &self.supplier)?;
        require_amount("price", self.price)?;
        Ok(())
    }
}

impl StoredRecord for EquipmentItem {
    const COLLECTION: &'static str = "equipment";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
