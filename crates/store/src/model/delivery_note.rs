//! Delivery notes accompanying oil moved between branches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::{OilLine, impl_timestamped, sum_totals};
use crate::collection::Record;
use crate::numbering::DocumentType;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryNoteStatus {
    #[default]
    Draft,
    Sent,
    Delivered,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryNote {
    pub id: String,
    pub delivery_note_no: String,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    pub from_branch_id: BranchId,
    #[serde(default)]
    pub from_branch_name: String,
    pub to_branch_id: BranchId,
    #[serde(default)]
    pub to_branch_name: String,
    #[serde(default)]
    pub items: Vec<OilLine>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: DeliveryNoteStatus,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_signed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub receiver_signed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeliveryNote {
    pub fn new(
        id: impl Into<String>,
        delivery_note_no: impl Into<String>,
        from_branch_id: BranchId,
        to_branch_id: BranchId,
        items: Vec<OilLine>,
    ) -> Self {
        let mut note = Self {
            id: id.into(),
            delivery_note_no: delivery_note_no.into(),
            from_branch_id,
            to_branch_id,
            items,
            ..Self::default()
        };
        note.recompute();
        note
    }
}

impl Entity for DeliveryNote {
    const KIND: &'static str = "delivery note";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(DeliveryNote);

impl Record for DeliveryNote {
    const DOCUMENT_TYPE: Option<DocumentType> = Some(DocumentType::DeliveryNote);

    fn document_no(&self) -> Option<&str> {
        Some(&self.delivery_note_no)
    }

    fn recompute(&mut self) {
        self.total_amount = sum_totals(&self.items);
    }
}

impl BranchScoped for DeliveryNote {
    fn membership(&self) -> Membership<'_> {
        Membership::Pair {
            from: self.from_branch_id,
            to: Some(self.to_branch_id),
        }
    }
}
