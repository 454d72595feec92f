//! Workflow commands: state transitions with derived-field side effects.

use fuelops_core::{BranchId, DomainError, DomainResult};
use serde_json::Value as JsonValue;

use super::DomainStore;
use crate::audit::AuditAction;
use crate::collection::merge_patch;
use crate::model::{
    DeliveryNote, DeliveryNoteStatus, DriverJob, DriverJobStatus, FuelingRecord, InternalOilOrder,
    InternalOrderItem, InternalOrderStatus, InternalPumpSale, OilReceipt, OilReceiptStatus,
    OrderStatus, OrderSummaryItem, PaymentEntry, PaymentMethod, PaymentRequestStatus,
    PurchaseOrder, PurchaseOrderStatus, Quotation, QuotationStatus, Receipt, ReceiptStatus,
    SaleStatus, SaleTransaction, TaxInvoice, TransportDelivery, TransportStatus,
};
use crate::tax_invoice::tax_invoice_number;

fn ensure_reading(value: f64, what: &str) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{what} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

impl DomainStore {
    // --- orders, purchase orders, quotations ----------------------------

    pub fn approve_order(
        &mut self,
        order_id: &str,
        approved_by: &str,
    ) -> DomainResult<&OrderSummaryItem> {
        self.apply(
            order_id,
            Some(approved_by),
            AuditAction::Approved,
            |order: &mut OrderSummaryItem, now| {
                order.status = OrderStatus::Approved;
                order.approved_by = Some(approved_by.to_string());
                order.approved_at = Some(now);
                Ok(format!("approved by {approved_by}"))
            },
        )
    }

    /// Move a purchase order forward through its delivery lifecycle.
    pub fn advance_purchase_order(
        &mut self,
        order_no: &str,
        status: PurchaseOrderStatus,
    ) -> DomainResult<&PurchaseOrder> {
        self.apply(order_no, None, AuditAction::StatusAdvanced, |order: &mut PurchaseOrder, _| {
            if !order.status.can_advance_to(status) {
                return Err(DomainError::invariant(format!(
                    "purchase order cannot move from {:?} to {:?}",
                    order.status, status
                )));
            }
            let from = order.status;
            order.status = status;
            Ok(format!("status {from:?} -> {status:?}"))
        })
    }

    pub fn confirm_quotation(&mut self, id: &str, confirmed_by: &str) -> DomainResult<&Quotation> {
        self.apply(id, Some(confirmed_by), AuditAction::Confirmed, |q: &mut Quotation, now| {
            q.status = QuotationStatus::Confirmed;
            q.confirmed_by = Some(confirmed_by.to_string());
            q.confirmed_at = Some(now);
            Ok(format!("confirmed by {confirmed_by}"))
        })
    }

    // --- delivery notes and receipts ------------------------------------

    /// Record a signature. The receiver's signature completes the delivery;
    /// the sender's only marks the note as sent and never touches receiver
    /// fields.
    pub fn sign_delivery_note(
        &mut self,
        id: &str,
        signature: &str,
        is_receiver: bool,
    ) -> DomainResult<&DeliveryNote> {
        self.apply(id, Some(signature), AuditAction::Signed, |note: &mut DeliveryNote, now| {
            if is_receiver {
                note.status = DeliveryNoteStatus::Delivered;
                note.receiver_name = Some(signature.to_string());
                note.receiver_signed_at = Some(now);
                Ok(format!("received by {signature}"))
            } else {
                if note.status == DeliveryNoteStatus::Delivered {
                    return Err(DomainError::invariant("delivery note is already delivered"));
                }
                note.status = DeliveryNoteStatus::Sent;
                note.sender_name = Some(signature.to_string());
                note.sender_signed_at = Some(now);
                Ok(format!("sent by {signature}"))
            }
        })
    }

    pub fn issue_receipt(&mut self, id: &str) -> DomainResult<&Receipt> {
        self.apply(id, None, AuditAction::Issued, |receipt: &mut Receipt, now| {
            receipt.status = ReceiptStatus::Issued;
            receipt.issued_at.get_or_insert(now);
            Ok(format!("receipt {} issued", receipt.receipt_no))
        })
    }

    pub fn verify_oil_receipt(&mut self, id: &str, verified_by: &str) -> DomainResult<&OilReceipt> {
        self.apply(id, Some(verified_by), AuditAction::Verified, |receipt: &mut OilReceipt, now| {
            receipt.status = OilReceiptStatus::Verified;
            receipt.verified_by = Some(verified_by.to_string());
            receipt.verified_at = Some(now);
            Ok(format!("verified with variance {:.2} L", receipt.total_variance()))
        })
    }

    // --- transport and driver jobs --------------------------------------

    pub fn start_transport(
        &mut self,
        id: &str,
        start_odometer: f64,
    ) -> DomainResult<&TransportDelivery> {
        ensure_reading(start_odometer, "start odometer")?;
        self.apply(id, None, AuditAction::Started, |t: &mut TransportDelivery, now| {
            if t.status == TransportStatus::Completed {
                return Err(DomainError::invariant("transport is already completed"));
            }
            t.status = TransportStatus::InTransit;
            t.start_odometer = Some(start_odometer);
            t.start_time = Some(now);
            Ok(format!("departed at odometer {start_odometer}"))
        })
    }

    /// Finish a trip; distance is `end − start`, or 0 when no start was taken.
    pub fn complete_transport(
        &mut self,
        id: &str,
        end_odometer: f64,
    ) -> DomainResult<&TransportDelivery> {
        ensure_reading(end_odometer, "end odometer")?;
        self.apply(id, None, AuditAction::Completed, |t: &mut TransportDelivery, now| {
            if t.status == TransportStatus::Completed {
                return Err(DomainError::invariant("transport is already completed"));
            }
            let distance = match t.start_odometer {
                Some(start) if end_odometer < start => {
                    return Err(DomainError::validation(format!(
                        "end odometer {end_odometer} is below start odometer {start}"
                    )));
                }
                Some(start) => end_odometer - start,
                None => 0.0,
            };
            t.end_odometer = Some(end_odometer);
            t.total_distance = distance;
            t.status = TransportStatus::Completed;
            t.end_time = Some(now);
            Ok(format!("arrived after {distance} km"))
        })
    }

    /// Append a fueling record; earlier records are never replaced.
    pub fn add_fueling_record(
        &mut self,
        job_id: &str,
        mut record: FuelingRecord,
    ) -> DomainResult<&DriverJob> {
        if !record.liters.is_finite() || record.liters <= 0.0 {
            return Err(DomainError::validation("fueling liters must be positive"));
        }
        if record.id.is_empty() {
            record.id = self.ids.next_id();
        }
        self.apply(job_id, None, AuditAction::FuelingRecorded, |job: &mut DriverJob, now| {
            if job.status == DriverJobStatus::Cancelled {
                return Err(DomainError::invariant("driver job is cancelled"));
            }
            record.recorded_at.get_or_insert(now);
            let note = format!("fueled {} L at {}", record.liters, record.station);
            job.fueling_records.push(record);
            Ok(note)
        })
    }

    pub fn start_driver_job(&mut self, job_id: &str) -> DomainResult<&DriverJob> {
        self.apply(job_id, None, AuditAction::Started, |job: &mut DriverJob, now| {
            if job.status != DriverJobStatus::Assigned {
                return Err(DomainError::invariant(format!(
                    "driver job cannot start from {:?}",
                    job.status
                )));
            }
            job.status = DriverJobStatus::InProgress;
            job.started_at = Some(now);
            Ok(format!("driver {} started", job.driver_name))
        })
    }

    pub fn complete_driver_job(&mut self, job_id: &str) -> DomainResult<&DriverJob> {
        self.apply(job_id, None, AuditAction::Completed, |job: &mut DriverJob, now| {
            if matches!(job.status, DriverJobStatus::Completed | DriverJobStatus::Cancelled) {
                return Err(DomainError::invariant(format!(
                    "driver job cannot complete from {:?}",
                    job.status
                )));
            }
            job.status = DriverJobStatus::Completed;
            job.completed_at = Some(now);
            Ok(format!("completed with {} L fueled", job.fueled_liters()))
        })
    }

    // --- internal oil orders --------------------------------------------

    /// Approve an order: the approved lines replace the requested ones
    /// wholesale and the total follows them.
    pub fn approve_internal_order(
        &mut self,
        order_id: &str,
        approved_by: &str,
        fulfilling_branch_id: BranchId,
        items: Vec<InternalOrderItem>,
    ) -> DomainResult<&InternalOilOrder> {
        let fulfilling_branch_name = self
            .reference
            .branch_name(fulfilling_branch_id)
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::validation(format!("unknown fulfilling branch {fulfilling_branch_id}"))
            })?;
        if items.is_empty() {
            return Err(DomainError::validation("approval must allot at least one line"));
        }
        if items.iter().any(|i| !i.quantity.is_finite() || i.quantity < 0.0) {
            return Err(DomainError::validation("allotted quantities must be non-negative"));
        }

        self.apply(
            order_id,
            Some(approved_by),
            AuditAction::Approved,
            |order: &mut InternalOilOrder, now| {
                if order.status != InternalOrderStatus::Pending {
                    return Err(DomainError::invariant(format!(
                        "only pending orders can be approved (order is {:?})",
                        order.status
                    )));
                }
                order.items = items;
                order.total_amount = order.items.iter().map(|i| i.total_amount).sum();
                order.assigned_from_branch_id = Some(fulfilling_branch_id);
                order.assigned_from_branch_name = Some(fulfilling_branch_name.clone());
                order.status = InternalOrderStatus::Approved;
                order.approved_by = Some(approved_by.to_string());
                order.approved_at = Some(now);
                Ok(format!(
                    "approved by {approved_by} from {fulfilling_branch_name}, total {:.2}",
                    order.total_amount
                ))
            },
        )
    }

    pub fn ship_internal_order(&mut self, order_id: &str) -> DomainResult<&InternalOilOrder> {
        self.apply(order_id, None, AuditAction::Shipped, |order: &mut InternalOilOrder, _| {
            if order.status != InternalOrderStatus::Approved {
                return Err(DomainError::invariant("only approved orders can be shipped"));
            }
            order.status = InternalOrderStatus::Shipped;
            Ok(format!("order {} shipped", order.order_no))
        })
    }

    pub fn deliver_internal_order(&mut self, order_id: &str) -> DomainResult<&InternalOilOrder> {
        self.apply(order_id, None, AuditAction::Delivered, |order: &mut InternalOilOrder, _| {
            if order.status != InternalOrderStatus::Shipped {
                return Err(DomainError::invariant("only shipped orders can be delivered"));
            }
            order.status = InternalOrderStatus::Delivered;
            Ok(format!("order {} delivered", order.order_no))
        })
    }

    /// Cancel an order. The cancellation lands in the audit log; existing
    /// notes are left alone.
    pub fn cancel_internal_order(
        &mut self,
        order_id: &str,
        cancelled_by: &str,
    ) -> DomainResult<&InternalOilOrder> {
        self.apply(
            order_id,
            Some(cancelled_by),
            AuditAction::Cancelled,
            |order: &mut InternalOilOrder, now| {
                if !order.status.is_cancellable() {
                    return Err(DomainError::invariant(format!(
                        "order in status {:?} cannot be cancelled",
                        order.status
                    )));
                }
                order.status = InternalOrderStatus::Cancelled;
                order.cancelled_by = Some(cancelled_by.to_string());
                order.cancelled_at = Some(now);
                Ok(format!("Cancelled by {cancelled_by} at {}", now.to_rfc3339()))
            },
        )
    }

    // --- internal pump sales --------------------------------------------

    pub fn cancel_internal_pump_sale(
        &mut self,
        sale_id: &str,
        cancelled_by: &str,
    ) -> DomainResult<&InternalPumpSale> {
        self.apply(
            sale_id,
            Some(cancelled_by),
            AuditAction::Cancelled,
            |sale: &mut InternalPumpSale, now| {
                if sale.status == SaleStatus::Cancelled {
                    return Err(DomainError::invariant("sale is already cancelled"));
                }
                sale.status = SaleStatus::Cancelled;
                sale.cancelled_by = Some(cancelled_by.to_string());
                sale.cancelled_at = Some(now);
                Ok(format!("Cancelled by {cancelled_by} at {}", now.to_rfc3339()))
            },
        )
    }

    /// Ask for payment approval on a sale (`none → pending`).
    pub fn request_internal_payment(&mut self, sale_id: &str) -> DomainResult<&InternalPumpSale> {
        self.apply(sale_id, None, AuditAction::PaymentRequested, |sale: &mut InternalPumpSale, _| {
            if sale.status == SaleStatus::Cancelled {
                return Err(DomainError::invariant("cannot request payment on a cancelled sale"));
            }
            if sale.payment_request_status == PaymentRequestStatus::None {
                sale.payment_request_status = PaymentRequestStatus::Pending;
            }
            Ok(format!("payment request {:?}", sale.payment_request_status))
        })
    }

    /// Record one instalment and issue its tax invoice. The payment request
    /// is approved once the paid amount reaches the sale total.
    pub fn record_internal_payment(
        &mut self,
        sale_id: &str,
        amount: f64,
        method: PaymentMethod,
        note: Option<&str>,
    ) -> DomainResult<&InternalPumpSale> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::validation(format!(
                "payment amount must be positive, got {amount}"
            )));
        }
        let payment_id = self.ids.next_id();
        let suffix = self.suffixes.next_suffix();

        self.apply(sale_id, None, AuditAction::PaymentRecorded, |sale: &mut InternalPumpSale, now| {
            if sale.status == SaleStatus::Cancelled {
                return Err(DomainError::invariant("cannot pay a cancelled sale"));
            }

            let invoice_no = tax_invoice_number(now, suffix);
            sale.payment_history.push(PaymentEntry {
                id: payment_id.clone(),
                paid_at: now,
                amount,
                method,
                note: note.map(str::to_string),
            });
            sale.paid_amount += amount;
            sale.tax_invoices.push(TaxInvoice {
                invoice_no: invoice_no.clone(),
                issued_at: now,
                amount,
                payment_id,
            });
            if sale.is_settled() {
                sale.payment_request_status = PaymentRequestStatus::Approved;
            }

            Ok(format!(
                "paid {amount:.2} by {method:?} (invoice {invoice_no}), {:.2} of {:.2}",
                sale.paid_amount, sale.total_amount
            ))
        })
    }

    // --- sale transactions ----------------------------------------------

    /// Merge-update a sale transaction, inserting `fallback` (merged with the
    /// same patch) when no transaction with `tx_id` exists yet.
    pub fn update_sale_tx(
        &mut self,
        tx_id: &str,
        patch: JsonValue,
        fallback: Option<SaleTransaction>,
    ) -> DomainResult<&SaleTransaction> {
        if self.get::<SaleTransaction>(tx_id).is_some() {
            return self.update::<SaleTransaction>(tx_id, patch);
        }

        let Some(entity) = fallback else {
            tracing::warn!(id = tx_id, "sale transaction update without fallback");
            return Err(DomainError::not_found("sale transaction", tx_id));
        };
        if entity.id != tx_id {
            return Err(DomainError::validation(format!(
                "fallback id '{}' does not match '{tx_id}'",
                entity.id
            )));
        }
        let merged = merge_patch(&entity, &patch)?;
        self.create(merged)
    }
}
