//! Price quotations prepared for one or more branches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::{OilLine, impl_timestamped, sum_totals};
use crate::collection::Record;
use crate::numbering::DocumentType;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Confirmed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationBranch {
    pub branch_id: BranchId,
    #[serde(default)]
    pub branch_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub quotation_no: String,
    #[serde(default)]
    pub quotation_date: Option<NaiveDate>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub branches: Vec<QuotationBranch>,
    #[serde(default)]
    pub items: Vec<OilLine>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: QuotationStatus,
    #[serde(default)]
    pub confirmed_by: Option<String>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quotation {
    pub fn new(
        id: impl Into<String>,
        quotation_no: impl Into<String>,
        branch_ids: impl IntoIterator<Item = BranchId>,
        items: Vec<OilLine>,
    ) -> Self {
        let mut quotation = Self {
            id: id.into(),
            quotation_no: quotation_no.into(),
            branches: branch_ids
                .into_iter()
                .map(|branch_id| QuotationBranch {
                    branch_id,
                    branch_name: String::new(),
                })
                .collect(),
            items,
            ..Self::default()
        };
        quotation.recompute();
        quotation
    }
}

impl Entity for Quotation {
    const KIND: &'static str = "quotation";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(Quotation);

impl Record for Quotation {
    const DOCUMENT_TYPE: Option<DocumentType> = Some(DocumentType::Quotation);

    fn document_no(&self) -> Option<&str> {
        Some(&self.quotation_no)
    }

    fn recompute(&mut self) {
        self.total_amount = sum_totals(&self.items);
    }
}

impl BranchScoped for Quotation {
    fn membership(&self) -> Membership<'_> {
        Membership::AnyRow(self.branches.iter().map(|b| b.branch_id).collect())
    }
}
