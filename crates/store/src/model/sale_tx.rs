//! Branch-to-branch sale transactions kept alongside pump sales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::impl_timestamped;
use crate::collection::Record;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTransaction {
    pub id: String,
    #[serde(default)]
    pub tx_date: Option<NaiveDate>,
    pub from_branch_id: BranchId,
    pub to_branch_id: BranchId,
    #[serde(default)]
    pub oil_type: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub price_per_liter: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SaleTransaction {
    pub fn new(id: impl Into<String>, from_branch_id: BranchId, to_branch_id: BranchId) -> Self {
        Self {
            id: id.into(),
            from_branch_id,
            to_branch_id,
            ..Self::default()
        }
    }
}

impl Entity for SaleTransaction {
    const KIND: &'static str = "sale transaction";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(SaleTransaction);

impl Record for SaleTransaction {}

impl BranchScoped for SaleTransaction {
    fn membership(&self) -> Membership<'_> {
        Membership::Pair {
            from: self.from_branch_id,
            to: Some(self.to_branch_id),
        }
    }
}
