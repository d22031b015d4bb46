//! Employee and payroll payment models.

use crate::model::{require_text, ValidationError};
use crate::store::{RecordId, StoredRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub name: String,
    pub active: bool,
}

impl Employee {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self {
            id: None,
            name: name.into(),
            active,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl StoredRecord for Employee {
    const COLLECTION: &'static str = "employees";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}

/// Payroll payment history entry, appended on every successful payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub date: NaiveDate,
    pub amount: f64,
    pub active_employees: u32,
}

impl StoredRecord for PaymentRecord {
    const COLLECTION: &'static str = "payment_log";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
