//! Earnings ledger singleton.
//!
//! The earnings module writes the biweekly earnings scalar; payroll reads
//! it before paying out. Both sides share it through the store, never
//! through ambient state.

use crate::store::{RecordId, StoredRecord, SINGLETON_ID};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIWEEKLY_EARNINGS: f64 = 2500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsLedger {
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Earnings available in the current two-week window.
    pub biweekly: f64,
}

impl Default for EarningsLedger {
    fn default() -> Self {
        Self {
            id: Some(SINGLETON_ID),
            biweekly: DEFAULT_BIWEEKLY_EARNINGS,
        }
    }
}

impl StoredRecord for EarningsLedger {
    const COLLECTION: &'static str = "ledger";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
