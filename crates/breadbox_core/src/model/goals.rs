//! Sales goal configuration.
//!
//! # Invariants
//! - A single goals record exists per store, pinned to the singleton id.
//! - Targets are strictly positive; progress math divides by them.

use crate::model::ValidationError;
use crate::store::{RecordId, StoredRecord, SINGLETON_ID};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_GOAL: f64 = 100.0;
pub const DEFAULT_BIWEEKLY_GOAL: f64 = 1500.0;
pub const DEFAULT_MONTHLY_GOAL: f64 = 2500.0;

/// Configurable revenue targets per horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub daily: f64,
    pub biweekly: f64,
    pub monthly: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            id: Some(SINGLETON_ID),
            daily: DEFAULT_DAILY_GOAL,
            biweekly: DEFAULT_BIWEEKLY_GOAL,
            monthly: DEFAULT_MONTHLY_GOAL,
        }
    }
}

impl Goals {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("daily", self.daily),
            ("biweekly", self.biweekly),
            ("monthly", self.monthly),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::NonPositiveTarget(field));
            }
        }
        Ok(())
    }
}

impl StoredRecord for Goals {
    const COLLECTION: &'static str = "goals";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
