//! Purchase orders placed with the supplier depot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::{OilLine, impl_timestamped, sum_totals};
use crate::collection::Record;
use crate::scope::{BranchScoped, Membership};

/// Delivery lifecycle of a purchase order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurchaseOrderStatus {
    #[default]
    Ordered,
    InTransit,
    Delivered,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Status only moves forward; cancellation is allowed until delivery.
    pub fn can_advance_to(self, next: Self) -> bool {
        use PurchaseOrderStatus::*;
        matches!(
            (self, next),
            (Ordered, InTransit)
                | (Ordered, Delivered)
                | (InTransit, Delivered)
                | (Ordered, Cancelled)
                | (InTransit, Cancelled)
        )
    }
}

/// The slice of a purchase order destined for one branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderBranch {
    pub branch_id: BranchId,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub items: Vec<OilLine>,
}

/// Identified by its `orderNo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub order_no: String,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub items: Vec<OilLine>,
    #[serde(default)]
    pub branches: Vec<PurchaseOrderBranch>,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    /// Order whose header items are rolled up from the per-branch rows.
    pub fn new(order_no: impl Into<String>, branches: Vec<PurchaseOrderBranch>) -> Self {
        let mut order = Self {
            order_no: order_no.into(),
            items: roll_up(&branches),
            branches,
            ..Self::default()
        };
        order.recompute();
        order
    }
}

/// Merge branch rows into header lines, one per (oil type, price).
pub fn roll_up(branches: &[PurchaseOrderBranch]) -> Vec<OilLine> {
    let mut rolled_up: Vec<OilLine> = Vec::new();
    for line in branches.iter().flat_map(|b| b.items.iter()) {
        let same = rolled_up
            .iter_mut()
            .find(|l| l.oil_type == line.oil_type && l.price_per_liter == line.price_per_liter);
        match same {
            Some(existing) => {
                existing.quantity += line.quantity;
                existing.total_amount += line.total_amount;
            }
            None => rolled_up.push(line.clone()),
        }
    }
    rolled_up
}

impl Entity for PurchaseOrder {
    const KIND: &'static str = "purchase order";

    fn id(&self) -> &str {
        &self.order_no
    }
}

impl_timestamped!(PurchaseOrder);

impl Record for PurchaseOrder {
    /// Header items are stored as given; only the total follows them.
    fn recompute(&mut self) {
        self.total_amount = sum_totals(&self.items);
    }
}

impl BranchScoped for PurchaseOrder {
    fn membership(&self) -> Membership<'_> {
        Membership::AnyRow(self.branches.iter().map(|b| b.branch_id).collect())
    }
}
