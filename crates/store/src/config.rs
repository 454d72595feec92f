//! Store configuration.

use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, DomainError, DomainResult};

use crate::numbering::{DocumentType, NumberingSeed};

/// Environment variable overriding the hub branch id.
pub const HUB_BRANCH_ENV: &str = "FUELOPS_HUB_BRANCH_ID";

/// Environment variable toggling document-number uniqueness checks.
pub const UNIQUE_NUMBERS_ENV: &str = "FUELOPS_ENFORCE_UNIQUE_NUMBERS";

/// Business policy knobs for a [`DomainStore`](crate::DomainStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Branch that fulfils internal oil orders and therefore sees all of them.
    pub hub_branch_id: BranchId,
    /// Reject creates/updates that reuse a document number within a collection.
    pub enforce_unique_document_numbers: bool,
    /// Running-number counters registered at construction.
    pub numbering: Vec<NumberingSeed>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            hub_branch_id: BranchId::new(1),
            enforce_unique_document_numbers: true,
            numbering: DocumentType::ALL
                .into_iter()
                .map(NumberingSeed::default_for)
                .collect(),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `FUELOPS_*` environment variables.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(HUB_BRANCH_ENV) {
            config.hub_branch_id = raw.parse()?;
        }

        if let Some(raw) = lookup(UNIQUE_NUMBERS_ENV) {
            let flag = raw.trim().to_ascii_lowercase();
            config.enforce_unique_document_numbers = match flag.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(DomainError::validation(format!(
                        "{UNIQUE_NUMBERS_ENV} must be a boolean, got '{other}'"
                    )));
                }
            };
        }

        Ok(config)
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("invalid store config: {e}")))
    }
}
