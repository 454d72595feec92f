//! The domain store: single owner of every entity collection and counter.
//!
//! ## Command model
//!
//! Every command takes `&mut self` and runs to completion before the next one,
//! so the store is its own single writer. Multi-record changes are applied to
//! a copy of the record and committed only when every check passed; a rejected
//! command leaves the store exactly as it was.
//!
//! The store does not synchronize across processes. Sharing one instance
//! between writers needs an outer lock, and the peek-then-advance numbering
//! protocol is only safe behind such a lock (prefer [`DomainStore::reserve`]).

mod views;
mod workflow;

pub use views::ScopedView;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use fuelops_core::{Clock, DomainError, DomainResult, IdGenerator, SystemClock, UuidV7Ids};

use crate::audit::{AuditAction, AuditEntry, AuditLog};
use crate::collection::{Collection, Record, merge_patch};
use crate::config::StoreConfig;
use crate::model::{
    DeliveryNote, DriverJob, InternalOilOrder, InternalPumpSale, OilReceipt, OrderSummaryItem,
    PurchaseOrder, Quotation, Receipt, SaleTransaction, TankEntryRecord, TransportDelivery,
};
use crate::numbering::{DocumentType, RunningNumber, RunningNumbers};
use crate::reference::ReferenceData;
use crate::tax_invoice::{RandomSuffix, SuffixSource};

/// Every entity collection, one per record kind.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    orders: Collection<OrderSummaryItem>,
    purchase_orders: Collection<PurchaseOrder>,
    quotations: Collection<Quotation>,
    delivery_notes: Collection<DeliveryNote>,
    receipts: Collection<Receipt>,
    transport_deliveries: Collection<TransportDelivery>,
    driver_jobs: Collection<DriverJob>,
    oil_receipts: Collection<OilReceipt>,
    tank_entries: Collection<TankEntryRecord>,
    internal_orders: Collection<InternalOilOrder>,
    pump_sales: Collection<InternalPumpSale>,
    sale_transactions: Collection<SaleTransaction>,
}

/// A record kind with a home collection in the store.
pub trait Stored: Record {
    fn collection(collections: &Collections) -> &Collection<Self>;
    fn collection_mut(collections: &mut Collections) -> &mut Collection<Self>;
}

/// Record kinds that may be removed. Everything else is an audit trail once
/// created.
pub trait Deletable: Stored {}

macro_rules! stored {
    ($t:ty, $field:ident) => {
        impl Stored for $t {
            fn collection(collections: &Collections) -> &Collection<Self> {
                &collections.$field
            }

            fn collection_mut(collections: &mut Collections) -> &mut Collection<Self> {
                &mut collections.$field
            }
        }
    };
}

stored!(OrderSummaryItem, orders);
stored!(PurchaseOrder, purchase_orders);
stored!(Quotation, quotations);
stored!(DeliveryNote, delivery_notes);
stored!(Receipt, receipts);
stored!(TransportDelivery, transport_deliveries);
stored!(DriverJob, driver_jobs);
stored!(OilReceipt, oil_receipts);
stored!(TankEntryRecord, tank_entries);
stored!(InternalOilOrder, internal_orders);
stored!(InternalPumpSale, pump_sales);
stored!(SaleTransaction, sale_transactions);

impl Deletable for DeliveryNote {}
impl Deletable for Receipt {}
impl Deletable for OilReceipt {}

/// In-memory domain store for the branch back office.
pub struct DomainStore {
    config: StoreConfig,
    reference: ReferenceData,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    suffixes: Box<dyn SuffixSource>,
    numbers: RunningNumbers,
    /// Numbers handed out by `reserve` whose document has not been created yet.
    reserved: BTreeSet<(DocumentType, String)>,
    audit: AuditLog,
    collections: Collections,
}

/// Wires a [`DomainStore`] with its collaborators.
pub struct DomainStoreBuilder {
    config: StoreConfig,
    reference: ReferenceData,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    suffixes: Box<dyn SuffixSource>,
}

impl DomainStoreBuilder {
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn suffixes(mut self, suffixes: impl SuffixSource + 'static) -> Self {
        self.suffixes = Box::new(suffixes);
        self
    }

    pub fn build(self) -> DomainStore {
        let numbers = RunningNumbers::seeded(&self.config.numbering, self.clock.now());
        tracing::info!(
            hub_branch_id = %self.config.hub_branch_id,
            branches = self.reference.branches.len(),
            counters = self.config.numbering.len(),
            "domain store initialized"
        );
        DomainStore {
            config: self.config,
            reference: self.reference,
            clock: self.clock,
            ids: self.ids,
            suffixes: self.suffixes,
            numbers,
            reserved: BTreeSet::new(),
            audit: AuditLog::new(),
            collections: Collections::default(),
        }
    }
}

impl DomainStore {
    /// Store with the default configuration, wall clock, UUIDv7 ids and random
    /// invoice suffixes.
    pub fn new(reference: ReferenceData) -> Self {
        Self::builder(reference).build()
    }

    pub fn builder(reference: ReferenceData) -> DomainStoreBuilder {
        DomainStoreBuilder {
            config: StoreConfig::default(),
            reference,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidV7Ids),
            suffixes: Box::new(RandomSuffix),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Mint an id for a record about to be created.
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// Audit entries for one record, oldest first.
    pub fn history<T: Stored>(&self, id: &str) -> Vec<&AuditEntry> {
        self.audit.for_entity(T::KIND, id).collect()
    }

    // --- running numbers ------------------------------------------------

    /// Current counter for `tag` as a string; `"1"` for unregistered tags.
    pub fn peek_next(&self, tag: &str) -> String {
        self.numbers.peek_next(tag)
    }

    /// Advance the counter for `tag` by one.
    pub fn advance(&mut self, tag: &str) -> DomainResult<&RunningNumber> {
        let now = self.clock.now();
        self.numbers.advance(tag, now)
    }

    /// Formatted document number for the current counter, without advancing.
    pub fn format_number(&self, document_type: DocumentType) -> Option<String> {
        self.numbers.format_current(document_type)
    }

    /// Take the current formatted number and advance past it.
    ///
    /// Creating a document that carries a reserved number does not advance the
    /// counter a second time.
    pub fn reserve(&mut self, document_type: DocumentType) -> DomainResult<String> {
        let now = self.clock.now();
        let number = self.numbers.reserve(document_type, now)?;
        self.reserved.insert((document_type, number.clone()));
        Ok(number)
    }

    pub fn running_numbers(&self) -> impl Iterator<Item = &RunningNumber> {
        self.numbers.iter()
    }

    // --- generic CRUD ---------------------------------------------------

    /// Append a record, stamping its timestamps.
    ///
    /// Sequenced document kinds advance their running number by one after the
    /// record is stored, unless the record carries a number from
    /// [`reserve`](Self::reserve). The caller is expected to have formatted the
    /// number into the record beforehand.
    pub fn create<T: Stored>(&mut self, mut entity: T) -> DomainResult<&T> {
        let now = self.clock.now();

        if self.config.enforce_unique_document_numbers {
            if let Some(document_no) = entity.document_no() {
                if T::collection(&self.collections).document_no_taken(document_no, None) {
                    tracing::warn!(
                        kind = T::KIND,
                        document_no,
                        "duplicate document number rejected"
                    );
                    return Err(DomainError::conflict(format!(
                        "{} number '{}' is already in use",
                        T::KIND,
                        document_no
                    )));
                }
            }
        }

        entity.recompute();
        entity.stamp_created(now);
        let id = entity.id().to_string();
        let document_no = entity.document_no().map(str::to_string);
        T::collection_mut(&mut self.collections).insert(entity)?;

        if let Some(document_type) = T::DOCUMENT_TYPE {
            let was_reserved = document_no
                .is_some_and(|no| self.reserved.remove(&(document_type, no)));
            if !was_reserved {
                if let Err(err) = self.numbers.advance(document_type.tag(), now) {
                    tracing::warn!(
                        kind = T::KIND,
                        %document_type,
                        error = %err,
                        "running number not advanced"
                    );
                }
            }
        }

        self.record_audit(now, T::KIND, &id, None, AuditAction::Created, String::new());
        tracing::debug!(kind = T::KIND, id = %id, "record created");
        self.require::<T>(&id)
    }

    /// Shallow-merge `patch` (a JSON object in the record's camelCase shape)
    /// into the record with `id`.
    pub fn update<T: Stored>(&mut self, id: &str, patch: JsonValue) -> DomainResult<&T> {
        let now = self.clock.now();
        let enforce_unique = self.config.enforce_unique_document_numbers;
        let collection = T::collection_mut(&mut self.collections);

        let current = collection.get(id).ok_or_else(|| {
            tracing::warn!(kind = T::KIND, id, "update on unknown record");
            DomainError::not_found(T::KIND, id)
        })?;
        let mut merged = merge_patch(current, &patch)?;

        if enforce_unique {
            if let Some(document_no) = merged.document_no() {
                if collection.document_no_taken(document_no, Some(id)) {
                    return Err(DomainError::conflict(format!(
                        "{} number '{}' is already in use",
                        T::KIND,
                        document_no
                    )));
                }
            }
        }

        merged.recompute();
        merged.stamp_updated(now);
        collection.modify(id, |record| {
            *record = merged;
            Ok(())
        })?;

        let fields = patch
            .as_object()
            .map(|o| o.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        self.record_audit(now, T::KIND, id, None, AuditAction::Updated, fields);
        tracing::debug!(kind = T::KIND, id, "record updated");
        self.require::<T>(id)
    }

    /// Remove a record of a deletable kind.
    pub fn delete<T: Deletable>(&mut self, id: &str) -> DomainResult<T> {
        let now = self.clock.now();
        let removed = T::collection_mut(&mut self.collections).remove(id)?;
        self.record_audit(now, T::KIND, id, None, AuditAction::Deleted, String::new());
        tracing::info!(kind = T::KIND, id, "record deleted");
        Ok(removed)
    }

    // --- internals ------------------------------------------------------

    /// Apply a workflow step to one record.
    ///
    /// `change` receives a draft and the command time and returns the audit
    /// note; the draft is committed (with derived fields refreshed and
    /// `updatedAt` stamped) only if it returns `Ok`.
    fn apply<T, F>(
        &mut self,
        id: &str,
        actor: Option<&str>,
        action: AuditAction,
        change: F,
    ) -> DomainResult<&T>
    where
        T: Stored,
        F: FnOnce(&mut T, DateTime<Utc>) -> DomainResult<String>,
    {
        let now = self.clock.now();
        let outcome = T::collection_mut(&mut self.collections).modify(id, |record| {
            let note = change(record, now)?;
            record.recompute();
            record.stamp_updated(now);
            Ok(note)
        });

        match outcome {
            Ok(note) => {
                tracing::info!(kind = T::KIND, id, ?action, actor, "{note}");
                self.record_audit(now, T::KIND, id, actor, action, note);
                self.require::<T>(id)
            }
            Err(err) => {
                tracing::warn!(kind = T::KIND, id, ?action, error = %err, "command rejected");
                Err(err)
            }
        }
    }

    fn record_audit(
        &mut self,
        at: DateTime<Utc>,
        kind: &'static str,
        id: &str,
        actor: Option<&str>,
        action: AuditAction,
        note: String,
    ) {
        self.audit.record(AuditEntry {
            at,
            entity_kind: kind.to_string(),
            entity_id: id.to_string(),
            actor: actor.map(str::to_string),
            action,
            note,
        });
    }
}
