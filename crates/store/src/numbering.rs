//! Running document numbers.
//!
//! Each document type owns a monotonic counter. The store exposes two
//! protocols over it:
//!
//! - **peek / advance**: read the next number, format it into a document, then
//!   advance once the document has been created. Two writers peeking before
//!   either advances will collide; this is only safe behind a single writer.
//! - **reserve**: increment-and-format in one step under `&mut` access.
//!
//! Counters never decrease and there is no rollback.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{DomainError, DomainResult};

/// Document types that draw their numbers from a running counter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Quotation,
    DeliveryNote,
    Receipt,
    InternalOilOrder,
    InternalPumpSale,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Quotation,
        DocumentType::DeliveryNote,
        DocumentType::Receipt,
        DocumentType::InternalOilOrder,
        DocumentType::InternalPumpSale,
    ];

    /// Tag used by callers to address the counter.
    pub fn tag(self) -> &'static str {
        match self {
            DocumentType::Quotation => "quotation",
            DocumentType::DeliveryNote => "delivery-note",
            DocumentType::Receipt => "receipt",
            DocumentType::InternalOilOrder => "internal-oil-order",
            DocumentType::InternalPumpSale => "internal-pump-sale",
        }
    }

    pub fn default_prefix(self) -> &'static str {
        match self {
            DocumentType::Quotation => "QT",
            DocumentType::DeliveryNote => "DN",
            DocumentType::Receipt => "RCP",
            DocumentType::InternalOilOrder => "IO",
            DocumentType::InternalPumpSale => "SL",
        }
    }
}

impl core::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| DomainError::not_found("running number", s))
    }
}

/// Seed configuration for one counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingSeed {
    pub document_type: DocumentType,
    pub prefix: String,
    pub start: u64,
}

impl NumberingSeed {
    pub fn default_for(document_type: DocumentType) -> Self {
        Self {
            document_type,
            prefix: document_type.default_prefix().to_string(),
            start: 1,
        }
    }
}

/// Counter state for one document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningNumber {
    pub document_type: DocumentType,
    pub prefix: String,
    pub year: i32,
    pub current_number: u64,
    pub last_updated: DateTime<Utc>,
}

impl RunningNumber {
    /// `PREFIX-YYYY-NNNN` for the current counter value.
    pub fn formatted(&self) -> String {
        format!("{}-{}-{:04}", self.prefix, self.year, self.current_number)
    }
}

/// All registered counters, keyed by document type.
#[derive(Debug, Clone, Default)]
pub struct RunningNumbers {
    counters: BTreeMap<DocumentType, RunningNumber>,
}

impl RunningNumbers {
    /// Register one counter per seed, stamped with the current year.
    pub fn seeded(seeds: &[NumberingSeed], now: DateTime<Utc>) -> Self {
        let counters = seeds
            .iter()
            .map(|seed| {
                (
                    seed.document_type,
                    RunningNumber {
                        document_type: seed.document_type,
                        prefix: seed.prefix.clone(),
                        year: now.year(),
                        current_number: seed.start,
                        last_updated: now,
                    },
                )
            })
            .collect();
        Self { counters }
    }

    pub fn get(&self, document_type: DocumentType) -> Option<&RunningNumber> {
        self.counters.get(&document_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RunningNumber> {
        self.counters.values()
    }

    /// Current counter value for `tag`, or `"1"` when no counter is registered.
    pub fn peek_next(&self, tag: &str) -> String {
        tag.parse::<DocumentType>()
            .ok()
            .and_then(|t| self.counters.get(&t))
            .map(|c| c.current_number.to_string())
            .unwrap_or_else(|| "1".to_string())
    }

    /// Formatted document number for the current counter value.
    pub fn format_current(&self, document_type: DocumentType) -> Option<String> {
        self.counters.get(&document_type).map(RunningNumber::formatted)
    }

    /// Increment the counter for `tag` by one.
    pub fn advance(&mut self, tag: &str, now: DateTime<Utc>) -> DomainResult<&RunningNumber> {
        let document_type: DocumentType = tag.parse()?;
        let counter = self
            .counters
            .get_mut(&document_type)
            .ok_or_else(|| DomainError::not_found("running number", tag))?;
        counter.current_number += 1;
        counter.last_updated = now;
        Ok(counter)
    }

    /// Take the current number and advance past it in one step.
    pub fn reserve(
        &mut self,
        document_type: DocumentType,
        now: DateTime<Utc>,
    ) -> DomainResult<String> {
        let counter = self
            .counters
            .get_mut(&document_type)
            .ok_or_else(|| DomainError::not_found("running number", document_type.tag()))?;
        let number = counter.formatted();
        counter.current_number += 1;
        counter.last_updated = now;
        Ok(number)
    }
}
