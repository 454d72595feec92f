//! Internal pump sales: wholesale fuel sold by one branch to another branch or
//! an outside customer, paid in instalments.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::{OilLine, impl_timestamped, sum_totals};
use crate::collection::Record;
use crate::numbering::DocumentType;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaleStatus {
    #[default]
    Normal,
    Cancelled,
}

/// Approval state of the sale's payment request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentRequestStatus {
    #[default]
    None,
    Pending,
    Approved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Cheque,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub id: String,
    pub paid_at: DateTime<Utc>,
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInvoice {
    pub invoice_no: String,
    pub issued_at: DateTime<Utc>,
    pub amount: f64,
    pub payment_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalPumpSale {
    pub id: String,
    pub sale_no: String,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    /// Selling branch.
    pub branch_id: BranchId,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub buyer_branch_id: Option<BranchId>,
    #[serde(default)]
    pub buyer_branch_name: Option<String>,
    /// Set instead of `buyer_branch_id` for outside customers.
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<OilLine>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub payment_history: Vec<PaymentEntry>,
    #[serde(default)]
    pub tax_invoices: Vec<TaxInvoice>,
    #[serde(default)]
    pub payment_request_status: PaymentRequestStatus,
    #[serde(default)]
    pub status: SaleStatus,
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

impl InternalPumpSale {
    /// Sale to another branch.
    pub fn to_branch(
        id: impl Into<String>,
        sale_no: impl Into<String>,
        seller: BranchId,
        buyer: BranchId,
        items: Vec<OilLine>,
    ) -> Self {
        let total_amount = sum_totals(&items);
        Self {
            id: id.into(),
            sale_no: sale_no.into(),
            branch_id: seller,
            buyer_branch_id: Some(buyer),
            items,
            total_amount,
            ..Self::default()
        }
    }

    /// Sale to an outside customer.
    pub fn to_customer(
        id: impl Into<String>,
        sale_no: impl Into<String>,
        seller: BranchId,
        customer_name: impl Into<String>,
        items: Vec<OilLine>,
    ) -> Self {
        let total_amount = sum_totals(&items);
        Self {
            id: id.into(),
            sale_no: sale_no.into(),
            branch_id: seller,
            customer_name: Some(customer_name.into()),
            items,
            total_amount,
            ..Self::default()
        }
    }

    pub fn outstanding_amount(&self) -> f64 {
        (self.total_amount - self.paid_amount).max(0.0)
    }

    /// Settled once the paid amount reaches the total; no rounding slack.
    pub fn is_settled(&self) -> bool {
        self.paid_amount >= self.total_amount
    }
}

impl Entity for InternalPumpSale {
    const KIND: &'static str = "internal pump sale";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(InternalPumpSale);

impl Record for InternalPumpSale {
    const DOCUMENT_TYPE: Option<DocumentType> = Some(DocumentType::InternalPumpSale);

    fn document_no(&self) -> Option<&str> {
        Some(&self.sale_no)
    }
}

impl BranchScoped for InternalPumpSale {
    fn membership(&self) -> Membership<'_> {
        Membership::Pair {
            from: self.branch_id,
            to: self.buyer_branch_id,
        }
    }
}
