//! Internal oil orders: a branch asking the hub (or another branch) for oil.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::impl_timestamped;
use crate::collection::Record;
use crate::numbering::DocumentType;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InternalOrderStatus {
    #[default]
    Pending,
    Approved,
    Shipped,
    Delivered,
    Cancelled,
}

impl InternalOrderStatus {
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

/// Where the oil for a line is physically drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DeliverySource {
    /// Delivered straight from a truck compartment.
    Truck {
        truck_id: String,
        #[serde(default)]
        compartment: Option<u8>,
    },
    /// Pumped out of the fulfilling branch's underground tank.
    Suction {
        #[serde(default)]
        tank_no: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalOrderItem {
    pub oil_type: String,
    /// Litres asked for by the requesting branch.
    pub requested_quantity: f64,
    /// Litres actually allotted on approval.
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub price_per_liter: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub delivery_source: Option<DeliverySource>,
    #[serde(default)]
    pub transport_no: Option<String>,
}

impl InternalOrderItem {
    /// A request line; allotted quantity starts equal to the request.
    pub fn requested(oil_type: impl Into<String>, quantity: f64, price_per_liter: f64) -> Self {
        Self {
            oil_type: oil_type.into(),
            requested_quantity: quantity,
            quantity,
            price_per_liter,
            total_amount: quantity * price_per_liter,
            delivery_source: None,
            transport_no: None,
        }
    }

    /// Allot `quantity` litres against this line's request.
    pub fn allotted(&self, quantity: f64) -> Self {
        Self {
            quantity,
            total_amount: quantity * self.price_per_liter,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalOilOrder {
    pub id: String,
    pub order_no: String,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub requested_date: Option<NaiveDate>,
    pub from_branch_id: BranchId,
    #[serde(default)]
    pub from_branch_name: String,
    #[serde(default)]
    pub assigned_from_branch_id: Option<BranchId>,
    #[serde(default)]
    pub assigned_from_branch_name: Option<String>,
    #[serde(default)]
    pub items: Vec<InternalOrderItem>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: InternalOrderStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_by: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InternalOilOrder {
    pub fn new(
        id: impl Into<String>,
        order_no: impl Into<String>,
        from_branch_id: BranchId,
        items: Vec<InternalOrderItem>,
    ) -> Self {
        let mut order = Self {
            id: id.into(),
            order_no: order_no.into(),
            from_branch_id,
            items,
            ..Self::default()
        };
        order.recompute();
        order
    }

    pub fn requested_liters(&self) -> f64 {
        self.items.iter().map(|i| i.requested_quantity).sum()
    }

    pub fn allotted_liters(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

impl Entity for InternalOilOrder {
    const KIND: &'static str = "internal oil order";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(InternalOilOrder);

impl Record for InternalOilOrder {
    const DOCUMENT_TYPE: Option<DocumentType> = Some(DocumentType::InternalOilOrder);

    fn document_no(&self) -> Option<&str> {
        Some(&self.order_no)
    }

    /// The order total always equals the sum of its line totals.
    fn recompute(&mut self) {
        self.total_amount = self.items.iter().map(|i| i.total_amount).sum();
    }
}

impl BranchScoped for InternalOilOrder {
    fn membership(&self) -> Membership<'_> {
        Membership::HubRouted {
            requester: self.from_branch_id,
            assigned: self.assigned_from_branch_id,
        }
    }
}
