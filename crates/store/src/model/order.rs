//! Per-branch demand rows that roll up into purchase orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::impl_timestamped;
use crate::collection::Record;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
    Ordered,
}

/// Aggregate demand of one branch for one oil type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryItem {
    pub id: String,
    pub branch_id: BranchId,
    #[serde(default)]
    pub branch_name: String,
    pub oil_type: String,
    pub quantity: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderSummaryItem {
    pub fn new(
        id: impl Into<String>,
        branch_id: BranchId,
        oil_type: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            branch_id,
            oil_type: oil_type.into(),
            quantity,
            ..Self::default()
        }
    }
}

impl Entity for OrderSummaryItem {
    const KIND: &'static str = "order";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(OrderSummaryItem);

impl Record for OrderSummaryItem {}

impl BranchScoped for OrderSummaryItem {
    fn membership(&self) -> Membership<'_> {
        Membership::Own(self.branch_id)
    }
}
