//! Read side: lookups, natural-key queries and branch-scoped views.
//!
//! Views are recomputed on every call; never hold one across a command.

use fuelops_core::{BranchId, DomainError, DomainResult};

use super::{DomainStore, Stored};
use crate::model::{
    DeliveryNote, DriverJob, InternalOilOrder, InternalPumpSale, OilReceipt, OrderSummaryItem,
    PurchaseOrder, Quotation, Receipt, TankEntryRecord, TransportDelivery,
};
use crate::reference::Branch;
use crate::scope::{BranchScoped, BranchSelection};

/// Records visible under a branch selection, next to the unfiltered list.
#[derive(Debug)]
pub struct ScopedView<'a, T> {
    pub visible: Vec<&'a T>,
    pub all: &'a [T],
}

impl<T> ScopedView<'_, T> {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn total_count(&self) -> usize {
        self.all.len()
    }
}

impl DomainStore {
    pub fn all<T: Stored>(&self) -> &[T] {
        T::collection(&self.collections).as_slice()
    }

    pub fn get<T: Stored>(&self, id: &str) -> Option<&T> {
        T::collection(&self.collections).get(id)
    }

    pub fn require<T: Stored>(&self, id: &str) -> DomainResult<&T> {
        self.get::<T>(id)
            .ok_or_else(|| DomainError::not_found(T::KIND, id))
    }

    pub fn find_by_document_no<T: Stored>(&self, document_no: &str) -> Option<&T> {
        T::collection(&self.collections).find_by_document_no(document_no)
    }

    /// Records admitted by `selection`; an empty selection admits all.
    pub fn scoped<T>(&self, selection: &BranchSelection) -> Vec<&T>
    where
        T: Stored + BranchScoped,
    {
        let hub = self.config.hub_branch_id;
        T::collection(&self.collections)
            .iter()
            .filter(|record| record.membership().admits(selection, hub))
            .collect()
    }

    pub fn view<T>(&self, selection: &BranchSelection) -> ScopedView<'_, T>
    where
        T: Stored + BranchScoped,
    {
        ScopedView {
            visible: self.scoped(selection),
            all: self.all(),
        }
    }

    // --- natural keys ---------------------------------------------------

    pub fn purchase_order(&self, order_no: &str) -> Option<&PurchaseOrder> {
        self.get(order_no)
    }

    pub fn quotation_by_no(&self, quotation_no: &str) -> Option<&Quotation> {
        self.find_by_document_no(quotation_no)
    }

    pub fn delivery_note_by_no(&self, delivery_note_no: &str) -> Option<&DeliveryNote> {
        self.find_by_document_no(delivery_note_no)
    }

    pub fn receipt_by_no(&self, receipt_no: &str) -> Option<&Receipt> {
        self.find_by_document_no(receipt_no)
    }

    pub fn oil_receipt_by_no(&self, receipt_no: &str) -> Option<&OilReceipt> {
        self.find_by_document_no(receipt_no)
    }

    pub fn internal_order_by_no(&self, order_no: &str) -> Option<&InternalOilOrder> {
        self.find_by_document_no(order_no)
    }

    pub fn pump_sale_by_no(&self, sale_no: &str) -> Option<&InternalPumpSale> {
        self.find_by_document_no(sale_no)
    }

    pub fn transport_by_no(&self, transport_no: &str) -> Option<&TransportDelivery> {
        self.find_by_document_no(transport_no)
    }

    pub fn transport_by_truck(&self, truck_id: &str) -> Option<&TransportDelivery> {
        TransportDelivery::collection(&self.collections).find(|t| t.truck_id == truck_id)
    }

    pub fn transport_by_trailer(&self, trailer_id: &str) -> Option<&TransportDelivery> {
        TransportDelivery::collection(&self.collections)
            .find(|t| t.trailer_id.as_deref() == Some(trailer_id))
    }

    pub fn driver_job_for_transport(&self, transport_no: &str) -> Option<&DriverJob> {
        DriverJob::collection(&self.collections).find(|j| j.transport_no == transport_no)
    }

    pub fn order_for_branch(&self, branch_id: BranchId) -> Option<&OrderSummaryItem> {
        OrderSummaryItem::collection(&self.collections).find(|o| o.branch_id == branch_id)
    }

    pub fn tank_entry_for_branch(&self, branch_id: BranchId) -> Option<&TankEntryRecord> {
        TankEntryRecord::collection(&self.collections).find(|e| e.branch_id == branch_id)
    }

    pub fn branches(&self) -> &[Branch] {
        &self.reference.branches
    }
}
