//! Static reference data supplied when the store is built.
//!
//! Branches, legal entities and the truck/trailer registries are read-only for
//! the lifetime of a store.

use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, DomainError, DomainResult};

/// A physical fuel-station location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl Branch {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: BranchId::new(id),
            name: name.into(),
            code: String::new(),
        }
    }
}

/// Company that legally owns one or more branches (shown on tax documents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalEntity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub branch_ids: Vec<BranchId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    pub plate_no: String,
    #[serde(default)]
    pub capacity_liters: f64,
    #[serde(default)]
    pub home_branch_id: Option<BranchId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trailer {
    pub id: String,
    pub plate_no: String,
    #[serde(default)]
    pub capacity_liters: f64,
}

/// Read-only registries the store resolves names and vehicles against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceData {
    pub branches: Vec<Branch>,
    pub legal_entities: Vec<LegalEntity>,
    pub trucks: Vec<Truck>,
    pub trailers: Vec<Trailer>,
}

impl ReferenceData {
    pub fn with_branches(branches: Vec<Branch>) -> Self {
        Self {
            branches,
            ..Self::default()
        }
    }

    pub fn from_json(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("invalid reference data: {e}")))
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn branch_name(&self, id: BranchId) -> Option<&str> {
        self.branch(id).map(|b| b.name.as_str())
    }

    pub fn legal_entity_for(&self, branch_id: BranchId) -> Option<&LegalEntity> {
        self.legal_entities
            .iter()
            .find(|e| e.branch_ids.contains(&branch_id))
    }

    pub fn truck(&self, truck_id: &str) -> Option<&Truck> {
        self.trucks.iter().find(|t| t.id == truck_id)
    }

    pub fn trailer(&self, trailer_id: &str) -> Option<&Trailer> {
        self.trailers.iter().find(|t| t.id == trailer_id)
    }
}
