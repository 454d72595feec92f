//! Free-form tank log entries (dip readings, top-ups, adjustments).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::impl_timestamped;
use crate::collection::Record;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankEntryRecord {
    pub id: String,
    pub branch_id: BranchId,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub tank_no: String,
    #[serde(default)]
    pub oil_type: String,
    #[serde(default)]
    pub quantity: f64,
    /// Whatever else the branch wants to log with the entry.
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TankEntryRecord {
    pub fn new(id: impl Into<String>, branch_id: BranchId) -> Self {
        Self {
            id: id.into(),
            branch_id,
            ..Self::default()
        }
    }
}

impl Entity for TankEntryRecord {
    const KIND: &'static str = "tank entry";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(TankEntryRecord);

impl Record for TankEntryRecord {}

impl BranchScoped for TankEntryRecord {
    fn membership(&self) -> Membership<'_> {
        Membership::Own(self.branch_id)
    }
}
