//! Append-only audit trail of store commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Approved,
    Confirmed,
    Signed,
    Issued,
    Started,
    Completed,
    Shipped,
    Delivered,
    Verified,
    Cancelled,
    FuelingRecorded,
    PaymentRequested,
    PaymentRecorded,
    StatusAdvanced,
}

/// One immutable entry: who did what to which record, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub entity_kind: String,
    pub entity_id: String,
    pub actor: Option<String>,
    pub action: AuditAction,
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one record, oldest first.
    pub fn for_entity<'a>(
        &'a self,
        entity_kind: &str,
        entity_id: &str,
    ) -> impl Iterator<Item = &'a AuditEntry> {
        self.entries
            .iter()
            .filter(move |e| e.entity_kind == entity_kind && e.entity_id == entity_id)
    }
}
