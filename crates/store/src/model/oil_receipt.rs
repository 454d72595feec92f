//! Oil receipts: stock received into a branch's tanks, checked by dipstick.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::impl_timestamped;
use crate::collection::Record;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OilReceiptStatus {
    #[default]
    Draft,
    Verified,
}

/// One tank's delivery with dip readings before and after unloading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OilReceiptLine {
    pub oil_type: String,
    #[serde(default)]
    pub tank_no: Option<String>,
    /// Litres stated on the delivery paperwork.
    pub quantity: f64,
    pub before_dip: f64,
    pub after_dip: f64,
    #[serde(default)]
    pub price_per_liter: f64,
    /// Measured increase minus stated quantity; negative means a shortfall.
    #[serde(default)]
    pub variance: f64,
    #[serde(default)]
    pub total_amount: f64,
}

impl OilReceiptLine {
    pub fn new(
        oil_type: impl Into<String>,
        quantity: f64,
        before_dip: f64,
        after_dip: f64,
        price_per_liter: f64,
    ) -> Self {
        let mut line = Self {
            oil_type: oil_type.into(),
            tank_no: None,
            quantity,
            before_dip,
            after_dip,
            price_per_liter,
            variance: 0.0,
            total_amount: 0.0,
        };
        line.recompute();
        line
    }

    fn recompute(&mut self) {
        self.variance = (self.after_dip - self.before_dip) - self.quantity;
        self.total_amount = self.quantity * self.price_per_liter;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OilReceipt {
    pub id: String,
    pub receipt_no: String,
    #[serde(default)]
    pub receipt_date: Option<NaiveDate>,
    pub branch_id: BranchId,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub items: Vec<OilReceiptLine>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: OilReceiptStatus,
    #[serde(default)]
    pub verified_by: Option<String>,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OilReceipt {
    pub fn new(
        id: impl Into<String>,
        receipt_no: impl Into<String>,
        branch_id: BranchId,
        items: Vec<OilReceiptLine>,
    ) -> Self {
        let mut receipt = Self {
            id: id.into(),
            receipt_no: receipt_no.into(),
            branch_id,
            items,
            ..Self::default()
        };
        receipt.recompute();
        receipt
    }

    pub fn total_variance(&self) -> f64 {
        self.items.iter().map(|l| l.variance).sum()
    }
}

impl Entity for OilReceipt {
    const KIND: &'static str = "oil receipt";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(OilReceipt);

impl Record for OilReceipt {
    fn document_no(&self) -> Option<&str> {
        Some(&self.receipt_no)
    }

    fn recompute(&mut self) {
        for line in &mut self.items {
            line.recompute();
        }
        self.total_amount = self.items.iter().map(|l| l.total_amount).sum();
    }
}

impl BranchScoped for OilReceipt {
    fn membership(&self) -> Membership<'_> {
        Membership::Own(self.branch_id)
    }
}
