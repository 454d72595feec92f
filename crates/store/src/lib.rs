//! `fuelops-store`: in-memory domain store for a fuel-station back office.
//!
//! One [`DomainStore`] owns every entity collection (orders, quotations,
//! delivery notes, receipts, transport, oil receipts, internal oil orders and
//! pump sales), the running-number counters and an append-only audit log.
//! Reads go through branch-scoped views; writes are synchronous commands that
//! either apply completely or leave the store untouched.

pub mod audit;
pub mod collection;
pub mod config;
pub mod model;
pub mod numbering;
pub mod reference;
pub mod scope;
pub mod store;
pub mod tax_invoice;

pub use audit::{AuditAction, AuditEntry, AuditLog};
pub use collection::{Collection, Record, merge_patch};
pub use config::StoreConfig;
pub use model::*;
pub use numbering::{DocumentType, NumberingSeed, RunningNumber};
pub use reference::{Branch, LegalEntity, ReferenceData, Trailer, Truck};
pub use scope::{BranchScoped, BranchSelection, Membership};
pub use store::{Collections, Deletable, DomainStore, DomainStoreBuilder, ScopedView, Stored};
pub use tax_invoice::{FixedSuffix, RandomSuffix, SuffixSource, tax_invoice_number};

pub use fuelops_core::{
    BranchId, Clock, DomainError, DomainResult, IdGenerator, ManualClock, SequentialIds,
    SystemClock, UuidV7Ids,
};
