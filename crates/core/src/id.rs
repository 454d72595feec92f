//! Identifiers used across the domain.

use core::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a fuel-station branch.
///
/// Branch ids are small integers assigned by the reference data; id `1` is the
/// central depot in the default configuration.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BranchId(u32);

impl BranchId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for BranchId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for BranchId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for BranchId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_id(format!("BranchId: {e}")))?;
        Ok(Self(id))
    }
}

/// Source of fresh record identifiers.
///
/// Callers mint ids before calling `create`; the store assumes they are unique.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Time-ordered UUIDv7 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Ids;

impl IdGenerator for UuidV7Ids {
    fn next_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers for tests and fixtures.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
