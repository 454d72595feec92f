//! Customer receipts issued by a branch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::{OilLine, impl_timestamped, sum_totals};
use crate::collection::Record;
use crate::numbering::DocumentType;
use crate::scope::{BranchScoped, Membership};

/// Thai VAT rate applied when a receipt is built from lines.
pub const VAT_RATE: f64 = 0.07;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiptStatus {
    #[default]
    Draft,
    Issued,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub receipt_no: String,
    #[serde(default)]
    pub receipt_date: Option<NaiveDate>,
    pub branch_id: BranchId,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<OilLine>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub vat_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: ReceiptStatus,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Receipt {
    /// Receipt whose subtotal, VAT and total are computed from `items`.
    pub fn new(
        id: impl Into<String>,
        receipt_no: impl Into<String>,
        branch_id: BranchId,
        items: Vec<OilLine>,
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
}

impl Entity for Receipt {
    const KIND: &'static str = "receipt";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(Receipt);

impl Record for Receipt {
    const DOCUMENT_TYPE: Option<DocumentType> = Some(DocumentType::Receipt);

    fn document_no(&self) -> Option<&str> {
        Some(&self.receipt_no)
    }

    /// Subtotal, VAT (rounded to satang) and total follow the lines.
    fn recompute(&mut self) {
        self.subtotal = sum_totals(&self.items);
        self.vat_amount = (self.subtotal * VAT_RATE * 100.0).round() / 100.0;
        self.total_amount = self.subtotal + self.vat_amount;
    }
}

impl BranchScoped for Receipt {
    fn membership(&self) -> Membership<'_> {
        Membership::Own(self.branch_id)
    }
}
