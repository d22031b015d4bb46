//! Investment entry model.

use crate::model::{require_amount, ValidationError};
use crate::store::{RecordId, StoredRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentCategory {
    General,
    Tools,
    RawMaterials,
    Equipment,
    Renovation,
    Other,
}

impl InvestmentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Tools => "Tools",
            Self::RawMaterials => "Raw materials",
            Self::Equipment => "Equipment",
            Self::Renovation => "Renovation",
            Self::Other => "Other",
        }
    }
}

impl Default for InvestmentCategory {
    fn default() -> Self {
        Self::General
    }
}

/// Money put into the business, deducted from net profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: InvestmentCategory,
    pub description: String,
    pub amount: f64,
}

impl Investment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_amount("amount", self.amount)
    }
}

impl StoredRecord for Investment {
    const COLLECTION: &'static str = "investments";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
