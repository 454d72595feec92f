use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

use fuelops_store::{
    AuditAction, Branch, BranchId, BranchSelection, DeliveryNote, DeliveryNoteStatus,
    DocumentType, DomainError, DomainStore, DriverJob, DriverJobStatus, FixedSuffix,
    FuelingRecord, InternalOilOrder, InternalOrderItem, InternalOrderStatus, InternalPumpSale,
    ManualClock, OilLine, OilReceipt, OilReceiptLine, OilReceiptStatus, OrderStatus,
    OrderSummaryItem, PaymentMethod, PaymentRequestStatus, PurchaseOrder, PurchaseOrderBranch,
    PurchaseOrderStatus, Quotation, Receipt, ReceiptStatus, ReferenceData, SaleStatus,
    SaleTransaction, SequentialIds, StoreConfig, TransportDelivery, TransportStatus,
};

fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
}

fn b(id: u32) -> BranchId {
    BranchId::new(id)
}

fn reference() -> ReferenceData {
    ReferenceData::with_branches(vec![
        Branch::new(1, "Hub Depot"),
        Branch::new(2, "Ayutthaya"),
        Branch::new(3, "Saraburi"),
    ])
}

fn store_with(config: StoreConfig) -> (DomainStore, Arc<ManualClock>) {
    fuelops_observability::tracing::init(fuelops_observability::LogFormat::Pretty);
    let clock = Arc::new(ManualClock::new(test_time()));
    let store = DomainStore::builder(reference())
        .config(config)
        .clock(clock.clone())
        .ids(SequentialIds::new("id"))
        .suffixes(FixedSuffix(7))
        .build();
    (store, clock)
}

fn test_store() -> (DomainStore, Arc<ManualClock>) {
    store_with(StoreConfig::default())
}

fn diesel_order(store: &mut DomainStore) -> String {
    let order_no = store.format_number(DocumentType::InternalOilOrder).unwrap();
    let order = InternalOilOrder::new(
        "io-1",
        order_no,
        b(3),
        vec![InternalOrderItem::requested("Diesel", 1000.0, 30.0)],
    );
    store.create(order).unwrap().id.clone()
}

fn pump_sale(store: &mut DomainStore, total_liters: f64) -> String {
    let sale = InternalPumpSale::to_branch(
        "sale-1",
        "SL-2024-0001",
        b(1),
        b(2),
        vec![OilLine::new("Diesel", total_liters, 30.0)],
    );
    store.create(sale).unwrap().id.clone()
}

#[test]
fn internal_order_is_approved_with_allotted_lines() {
    let (mut store, _clock) = test_store();
    let id = diesel_order(&mut store);

    let order = store.get::<InternalOilOrder>(&id).unwrap();
    assert_eq!(order.order_no, "IO-2024-0001");
    assert_eq!(order.total_amount, 30_000.0);
    assert_eq!(order.status, InternalOrderStatus::Pending);
    assert_eq!(store.peek_next("internal-oil-order"), "2");

    let allotted = order.items[0].allotted(950.0);
    let approved = store
        .approve_internal_order(&id, "manager", b(1), vec![allotted])
        .unwrap();

    assert_eq!(approved.total_amount, 28_500.0);
    assert_eq!(approved.status, InternalOrderStatus::Approved);
    assert_eq!(approved.assigned_from_branch_id, Some(b(1)));
    assert_eq!(approved.assigned_from_branch_name.as_deref(), Some("Hub Depot"));
    assert_eq!(approved.approved_by.as_deref(), Some("manager"));
    assert_eq!(approved.approved_at, Some(test_time()));
    assert_eq!(approved.items[0].requested_quantity, 1000.0);
}

#[test]
fn internal_order_visibility_follows_requester_assignee_and_hub() {
    let (mut store, _clock) = test_store();
    let id = diesel_order(&mut store);
    let line = InternalOrderItem::requested("Diesel", 1000.0, 30.0).allotted(950.0);
    store.approve_internal_order(&id, "manager", b(1), vec![line]).unwrap();

    let visible = |store: &DomainStore, ids: &[u32]| {
        let selection: BranchSelection = ids.iter().copied().map(BranchId::new).collect();
        store.scoped::<InternalOilOrder>(&selection).len()
    };

    assert_eq!(visible(&store, &[2]), 0);
    assert_eq!(visible(&store, &[1]), 1);
    assert_eq!(visible(&store, &[3]), 1);
    assert_eq!(visible(&store, &[]), 1);

    let view = store.view::<InternalOilOrder>(&BranchSelection::of([b(2)]));
    assert_eq!(view.visible_count(), 0);
    assert_eq!(view.total_count(), 1);
}

#[test]
fn configured_hub_sees_every_internal_order() {
    let config = StoreConfig {
        hub_branch_id: b(2),
        ..StoreConfig::default()
    };
    let (mut store, _clock) = store_with(config);
    diesel_order(&mut store);

    assert_eq!(store.scoped::<InternalOilOrder>(&BranchSelection::of([b(2)])).len(), 1);
    assert!(store.scoped::<InternalOilOrder>(&BranchSelection::of([b(1)])).is_empty());
}

#[test]
fn approval_validates_before_touching_the_order() {
    let (mut store, _clock) = test_store();
    let id = diesel_order(&mut store);
    let line = InternalOrderItem::requested("Diesel", 1000.0, 30.0);

    let err = store
        .approve_internal_order(&id, "manager", b(99), vec![line.clone()])
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = store.approve_internal_order(&id, "manager", b(1), vec![]).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    store.cancel_internal_order(&id, "clerk").unwrap();
    let err = store
        .approve_internal_order(&id, "manager", b(1), vec![line])
        .unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)));
    assert_eq!(
        store.get::<InternalOilOrder>(&id).unwrap().status,
        InternalOrderStatus::Cancelled
    );
}

#[test]
fn cancellation_is_audited_and_keeps_existing_notes() {
    let (mut store, clock) = test_store();
    let id = diesel_order(&mut store);
    store
        .update::<InternalOilOrder>(&id, json!({ "notes": "urgent, before Friday" }))
        .unwrap();

    clock.advance(Duration::minutes(5));
    let cancelled = store.cancel_internal_order(&id, "clerk").unwrap();
    assert_eq!(cancelled.status, InternalOrderStatus::Cancelled);
    assert_eq!(cancelled.notes.as_deref(), Some("urgent, before Friday"));
    assert_eq!(cancelled.cancelled_by.as_deref(), Some("clerk"));

    let history = store.history::<InternalOilOrder>(&id);
    let last = history.last().unwrap();
    assert_eq!(last.action, AuditAction::Cancelled);
    assert_eq!(last.actor.as_deref(), Some("clerk"));
    assert!(last.note.starts_with("Cancelled by clerk at 2024-06-15T09:35:00"));

    let err = store.cancel_internal_order(&id, "clerk").unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)));
}

#[test]
fn shipping_and_delivery_follow_approval() {
    let (mut store, _clock) = test_store();
    let id = diesel_order(&mut store);

    assert!(store.ship_internal_order(&id).is_err());

    let line = InternalOrderItem::requested("Diesel", 1000.0, 30.0);
    store.approve_internal_order(&id, "manager", b(1), vec![line]).unwrap();
    assert!(store.deliver_internal_order(&id).is_err());
    store.ship_internal_order(&id).unwrap();
    let delivered = store.deliver_internal_order(&id).unwrap();
    assert_eq!(delivered.status, InternalOrderStatus::Delivered);

    assert!(store.cancel_internal_order(&id, "clerk").is_err());
}

#[test]
fn transport_trip_records_distance() {
    let (mut store, clock) = test_store();
    store
        .create(TransportDelivery::new("t-1", "T1", b(1), vec![b(2), b(3)]))
        .unwrap();

    let started = store.start_transport("t-1", 10_000.0).unwrap();
    assert_eq!(started.status, TransportStatus::InTransit);
    assert_eq!(started.start_time, Some(test_time()));

    clock.advance(Duration::hours(6));
    let done = store.complete_transport("t-1", 10_450.0).unwrap();
    assert_eq!(done.status, TransportStatus::Completed);
    assert_eq!(done.total_distance, 450.0);
    assert_eq!(done.end_time, Some(test_time() + Duration::hours(6)));

    let err = store.complete_transport("t-1", 10_500.0).unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)));
    assert!(store.transport_by_no("T1").is_some());
}

#[test]
fn transport_odometer_readings_are_checked() {
    let (mut store, _clock) = test_store();
    store
        .create(TransportDelivery::new("t-1", "T1", b(1), vec![b(2)]))
        .unwrap();
    store
        .create(TransportDelivery::new("t-2", "T2", b(1), vec![b(3)]))
        .unwrap();

    assert!(matches!(
        store.start_transport("t-1", f64::NAN).unwrap_err(),
        DomainError::Validation(_)
    ));
    store.start_transport("t-1", 10_000.0).unwrap();
    assert!(matches!(
        store.complete_transport("t-1", 9_000.0).unwrap_err(),
        DomainError::Validation(_)
    ));
    assert_eq!(
        store.get::<TransportDelivery>("t-1").unwrap().status,
        TransportStatus::InTransit
    );

    let done = store.complete_transport("t-2", 500.0).unwrap();
    assert_eq!(done.total_distance, 0.0);
}

#[test]
fn sender_signature_never_completes_a_delivery() {
    let (mut store, _clock) = test_store();
    let note = DeliveryNote::new(
        "dn-1",
        "DN-2024-0001",
        b(1),
        b(2),
        vec![OilLine::new("Gasohol 95", 500.0, 35.0)],
    );
    store.create(note).unwrap();

    let sent = store.sign_delivery_note("dn-1", "Somchai", false).unwrap();
    assert_eq!(sent.status, DeliveryNoteStatus::Sent);
    assert_eq!(sent.sender_name.as_deref(), Some("Somchai"));
    assert_eq!(sent.receiver_name, None);

    let delivered = store.sign_delivery_note("dn-1", "Malee", true).unwrap();
    assert_eq!(delivered.status, DeliveryNoteStatus::Delivered);
    assert_eq!(delivered.receiver_name.as_deref(), Some("Malee"));
    assert_eq!(delivered.sender_name.as_deref(), Some("Somchai"));

    let err = store.sign_delivery_note("dn-1", "Somchai", false).unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)));
    assert_eq!(
        store.get::<DeliveryNote>("dn-1").unwrap().status,
        DeliveryNoteStatus::Delivered
    );
}

#[test]
fn commands_on_unknown_ids_change_nothing() {
    let (mut store, _clock) = test_store();
    store
        .create(OrderSummaryItem::new("o-1", b(2), "Diesel", 5000.0))
        .unwrap();
    let audit_before = store.audit_log().len();

    assert!(store.approve_order("missing", "manager").unwrap_err().is_not_found());
    assert!(store.issue_receipt("missing").unwrap_err().is_not_found());
    assert!(store.start_transport("missing", 1.0).unwrap_err().is_not_found());
    assert!(store
        .update::<OrderSummaryItem>("missing", json!({ "quantity": 1.0 }))
        .unwrap_err()
        .is_not_found());

    assert_eq!(store.all::<OrderSummaryItem>().len(), 1);
    assert_eq!(
        store.get::<OrderSummaryItem>("o-1").unwrap().status,
        OrderStatus::Pending
    );
    assert_eq!(store.audit_log().len(), audit_before);
}

#[test]
fn update_merges_fields_and_restamps() {
    let (mut store, clock) = test_store();
    store
        .create(OrderSummaryItem::new("o-1", b(2), "Diesel", 5000.0))
        .unwrap();

    clock.advance(Duration::minutes(1));
    let updated = store
        .update::<OrderSummaryItem>(
            "o-1",
            json!({ "quantity": 4500.0, "createdAt": "2000-01-01T00:00:00Z" }),
        )
        .unwrap();
    assert_eq!(updated.quantity, 4500.0);
    assert_eq!(updated.oil_type, "Diesel");
    assert_eq!(updated.created_at, Some(test_time()));
    assert_eq!(updated.updated_at, Some(test_time() + Duration::minutes(1)));

    let err = store
        .update::<OrderSummaryItem>("o-1", json!({ "quantity": "lots" }))
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let approved = store.approve_order("o-1", "manager").unwrap();
    assert_eq!(approved.status, OrderStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("manager"));
}

#[test]
fn creating_a_numbered_document_advances_its_counter() {
    let (mut store, _clock) = test_store();
    assert_eq!(store.peek_next("quotation"), "1");
    assert_eq!(store.peek_next("no-such-counter"), "1");

    let quotation_no = store.format_number(DocumentType::Quotation).unwrap();
    assert_eq!(quotation_no, "QT-2024-0001");
    let quotation = Quotation::new(
        "q-1",
        quotation_no.clone(),
        [b(1), b(2)],
        vec![OilLine::new("Diesel", 100.0, 30.0)],
    );
    store.create(quotation).unwrap();
    assert_eq!(store.peek_next("quotation"), "2");
    assert_eq!(store.peek_next("receipt"), "1");

    let duplicate = Quotation::new("q-2", quotation_no, [b(3)], vec![]);
    let err = store.create(duplicate).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
    assert_eq!(store.peek_next("quotation"), "2");
    assert_eq!(store.all::<Quotation>().len(), 1);

    let confirmed = store.confirm_quotation("q-1", "sales lead").unwrap();
    assert_eq!(confirmed.total_amount, 3000.0);
    assert!(store.quotation_by_no("QT-2024-0001").is_some());

    assert!(store.advance("no-such-counter").unwrap_err().is_not_found());
    assert_eq!(store.reserve(DocumentType::Quotation).unwrap(), "QT-2024-0002");
    assert_eq!(store.peek_next("quotation"), "3");
}

#[test]
fn duplicate_numbers_are_allowed_when_enforcement_is_off() {
    let config = StoreConfig {
        enforce_unique_document_numbers: false,
        ..StoreConfig::default()
    };
    let (mut store, _clock) = store_with(config);
    store
        .create(Quotation::new("q-1", "QT-1", [b(1)], vec![]))
        .unwrap();
    store
        .create(Quotation::new("q-2", "QT-1", [b(2)], vec![]))
        .unwrap();
    assert_eq!(store.all::<Quotation>().len(), 2);
}

#[test]
fn only_deletable_kinds_are_removed() {
    let (mut store, _clock) = test_store();
    store
        .create(Receipt::new(
            "r-1",
            "RCP-2024-0001",
            b(2),
            vec![OilLine::new("Diesel", 100.0, 30.0)],
        ))
        .unwrap();

    let issued = store.issue_receipt("r-1").unwrap();
    assert_eq!(issued.status, ReceiptStatus::Issued);
    assert_eq!(issued.issued_at, Some(test_time()));

    let removed = store.delete::<Receipt>("r-1").unwrap();
    assert_eq!(removed.receipt_no, "RCP-2024-0001");
    assert!(store.get::<Receipt>("r-1").is_none());
    assert!(store.delete::<Receipt>("r-1").unwrap_err().is_not_found());

    let history = store.history::<Receipt>("r-1");
    assert_eq!(history.last().unwrap().action, AuditAction::Deleted);
}

#[test]
fn sale_transaction_update_inserts_fallback_when_missing() {
    let (mut store, _clock) = test_store();

    let err = store
        .update_sale_tx("tx-1", json!({ "status": "paid" }), None)
        .unwrap_err();
    assert!(err.is_not_found());

    let fallback = SaleTransaction::new("tx-1", b(1), b(3));
    let created = store
        .update_sale_tx("tx-1", json!({ "status": "paid" }), Some(fallback))
        .unwrap();
    assert_eq!(created.status, "paid");
    assert_eq!(created.to_branch_id, b(3));

    let updated = store
        .update_sale_tx("tx-1", json!({ "quantity": 800.0 }), None)
        .unwrap();
    assert_eq!(updated.status, "paid");
    assert_eq!(updated.quantity, 800.0);
    assert_eq!(store.all::<SaleTransaction>().len(), 1);

    let mismatched = SaleTransaction::new("tx-9", b(1), b(3));
    let err = store
        .update_sale_tx("tx-2", json!({}), Some(mismatched))
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn instalments_settle_the_sale_and_issue_invoices() {
    let (mut store, _clock) = test_store();
    let id = pump_sale(&mut store, 100.0);

    let requested = store.request_internal_payment(&id).unwrap();
    assert_eq!(requested.payment_request_status, PaymentRequestStatus::Pending);

    let first = store
        .record_internal_payment(&id, 1000.0, PaymentMethod::Transfer, Some("first half"))
        .unwrap();
    assert_eq!(first.paid_amount, 1000.0);
    assert_eq!(first.payment_request_status, PaymentRequestStatus::Pending);
    assert_eq!(
        first.tax_invoices[0].invoice_no,
        format!("TAX-{}-007", test_time().timestamp_millis())
    );
    assert_eq!(first.tax_invoices[0].payment_id, first.payment_history[0].id);

    let second = store
        .record_internal_payment(&id, 2000.0, PaymentMethod::Cash, None)
        .unwrap();
    assert_eq!(second.paid_amount, 3000.0);
    assert_eq!(second.payment_history.len(), 2);
    assert_eq!(second.tax_invoices.len(), 2);
    assert_eq!(second.payment_request_status, PaymentRequestStatus::Approved);
}

#[test]
fn payments_are_rejected_on_bad_amounts_and_cancelled_sales() {
    let (mut store, _clock) = test_store();
    let id = pump_sale(&mut store, 100.0);

    for amount in [0.0, -5.0, f64::INFINITY] {
        let err = store
            .record_internal_payment(&id, amount, PaymentMethod::Cash, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    let cancelled = store.cancel_internal_pump_sale(&id, "clerk").unwrap();
    assert_eq!(cancelled.status, SaleStatus::Cancelled);

    let err = store
        .record_internal_payment(&id, 100.0, PaymentMethod::Cash, None)
        .unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)));
    assert!(store.get::<InternalPumpSale>(&id).unwrap().payment_history.is_empty());
}

#[test]
fn driver_job_collects_fueling_records_until_completed() {
    let (mut store, clock) = test_store();
    store
        .create(DriverJob::new("job-1", "T1", b(1), vec![b(2)]))
        .unwrap();

    store.start_driver_job("job-1").unwrap();
    assert!(store.start_driver_job("job-1").is_err());

    let refuel = |liters| FuelingRecord {
        station: "PTT Saraburi".to_string(),
        liters,
        ..FuelingRecord::default()
    };
    store.add_fueling_record("job-1", refuel(120.0)).unwrap();
    clock.advance(Duration::hours(2));
    let job = store.add_fueling_record("job-1", refuel(80.0)).unwrap();
    assert_eq!(job.fueling_records.len(), 2);
    assert_eq!(job.fueling_records[0].id, "id-1");
    assert_eq!(job.fueling_records[1].recorded_at, Some(test_time() + Duration::hours(2)));

    assert!(matches!(
        store.add_fueling_record("job-1", refuel(0.0)).unwrap_err(),
        DomainError::Validation(_)
    ));

    let done = store.complete_driver_job("job-1").unwrap();
    assert_eq!(done.status, DriverJobStatus::Completed);
    assert_eq!(done.fueled_liters(), 200.0);
    assert!(store.driver_job_for_transport("T1").is_some());
}

#[test]
fn purchase_order_status_only_moves_forward() {
    let (mut store, _clock) = test_store();
    let order = PurchaseOrder::new(
        "PO-001",
        vec![PurchaseOrderBranch {
            branch_id: b(2),
            branch_name: "Ayutthaya".to_string(),
            items: vec![OilLine::new("Diesel", 10_000.0, 29.5)],
        }],
    );
    store.create(order).unwrap();

    let in_transit = store
        .advance_purchase_order("PO-001", PurchaseOrderStatus::InTransit)
        .unwrap();
    assert_eq!(in_transit.status, PurchaseOrderStatus::InTransit);
    assert!(store
        .advance_purchase_order("PO-001", PurchaseOrderStatus::Ordered)
        .is_err());

    store
        .advance_purchase_order("PO-001", PurchaseOrderStatus::Delivered)
        .unwrap();
    let err = store
        .advance_purchase_order("PO-001", PurchaseOrderStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)));

    let order = store.purchase_order("PO-001").unwrap();
    assert_eq!(order.total_amount, 295_000.0);
    assert_eq!(store.scoped::<PurchaseOrder>(&BranchSelection::of([b(2)])).len(), 1);
    assert!(store.scoped::<PurchaseOrder>(&BranchSelection::of([b(3)])).is_empty());
}

#[test]
fn oil_receipt_variance_is_kept_current_and_verified() {
    let (mut store, _clock) = test_store();
    let receipt = OilReceipt::new(
        "or-1",
        "OR-2024-0001",
        b(2),
        vec![OilReceiptLine::new("Diesel", 5000.0, 1200.0, 6180.0, 30.0)],
    );
    store.create(receipt).unwrap();
    assert_eq!(store.get::<OilReceipt>("or-1").unwrap().total_variance(), -20.0);

    let verified = store.verify_oil_receipt("or-1", "supervisor").unwrap();
    assert_eq!(verified.status, OilReceiptStatus::Verified);
    assert_eq!(verified.verified_by.as_deref(), Some("supervisor"));
    assert_eq!(verified.total_amount, 150_000.0);

    let history = store.history::<OilReceipt>("or-1");
    let actions: Vec<_> = history.iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![AuditAction::Created, AuditAction::Verified]);
}

#[test]
fn reserved_numbers_are_not_advanced_again_on_create() {
    let (mut store, _clock) = test_store();

    let first = store.reserve(DocumentType::Quotation).unwrap();
    assert_eq!(first, "QT-2024-0001");
    store
        .create(Quotation::new("q-1", first, [b(1)], vec![]))
        .unwrap();

    let second = store.reserve(DocumentType::Quotation).unwrap();
    assert_eq!(second, "QT-2024-0002");
    assert_eq!(store.peek_next("quotation"), "3");

    // A number formatted by hand still advances once on create.
    let third = store.format_number(DocumentType::Quotation).unwrap();
    assert_eq!(third, "QT-2024-0003");
    store
        .create(Quotation::new("q-3", third, [b(1)], vec![]))
        .unwrap();
    assert_eq!(store.peek_next("quotation"), "4");
}

#[test]
fn payment_just_short_of_the_total_stays_pending() {
    let (mut store, _clock) = test_store();
    let id = pump_sale(&mut store, 100.0);
    store.request_internal_payment(&id).unwrap();

    let short = store
        .record_internal_payment(&id, 2999.996, PaymentMethod::Cash, None)
        .unwrap();
    assert_eq!(short.payment_request_status, PaymentRequestStatus::Pending);

    let settled = store
        .record_internal_payment(&id, 1.0, PaymentMethod::Cash, None)
        .unwrap();
    assert!(settled.paid_amount >= settled.total_amount);
    assert_eq!(settled.payment_request_status, PaymentRequestStatus::Approved);
}

#[test]
fn purchase_order_items_are_stored_and_patched_as_given() {
    let (mut store, _clock) = test_store();
    let mut order = PurchaseOrder::new(
        "PO-002",
        vec![PurchaseOrderBranch {
            branch_id: b(2),
            branch_name: "Ayutthaya".to_string(),
            items: vec![OilLine::new("Diesel", 100.0, 30.0)],
        }],
    );
    order.items = vec![OilLine::new("Diesel", 120.0, 30.0)];
    let created = store.create(order).unwrap();
    assert_eq!(created.items[0].quantity, 120.0);
    assert_eq!(created.total_amount, 3600.0);

    let patched = store
        .update::<PurchaseOrder>(
            "PO-002",
            json!({
                "items": [{
                    "oilType": "Diesel",
                    "quantity": 150.0,
                    "pricePerLiter": 30.0,
                    "totalAmount": 4500.0
                }]
            }),
        )
        .unwrap();
    assert_eq!(patched.items[0].quantity, 150.0);
    assert_eq!(patched.total_amount, 4500.0);
    assert_eq!(patched.branches[0].items[0].quantity, 100.0);
}

#[test]
fn receipt_totals_follow_patched_lines() {
    let (mut store, _clock) = test_store();
    store
        .create(Receipt::new(
            "r-1",
            "RCP-2024-0001",
            b(2),
            vec![OilLine::new("Diesel", 100.0, 30.0)],
        ))
        .unwrap();

    let updated = store
        .update::<Receipt>(
            "r-1",
            json!({
                "items": [{
                    "oilType": "Diesel",
                    "quantity": 200.0,
                    "pricePerLiter": 30.0,
                    "totalAmount": 6000.0
                }]
            }),
        )
        .unwrap();
    assert_eq!(updated.subtotal, 6000.0);
    assert_eq!(updated.vat_amount, 420.0);
    assert_eq!(updated.total_amount, 6420.0);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn payment_request_is_approved_exactly_when_the_running_sum_reaches_the_total(
        amounts in prop::collection::vec(1.0f64..2_000.0, 1..8),
    ) {
        let (mut store, _clock) = test_store();
        let id = pump_sale(&mut store, 100.0);
        store.request_internal_payment(&id).unwrap();

        let mut running = 0.0;
        for (n, amount) in amounts.iter().enumerate() {
            running += *amount;
            let sale = store
                .record_internal_payment(&id, *amount, PaymentMethod::Transfer, None)
                .unwrap();

            prop_assert_eq!(sale.paid_amount, running);
            prop_assert_eq!(sale.payment_history.len(), n + 1);
            prop_assert_eq!(sale.tax_invoices.len(), n + 1);
            let expected = if running >= 3000.0 {
                PaymentRequestStatus::Approved
            } else {
                PaymentRequestStatus::Pending
            };
            prop_assert_eq!(sale.payment_request_status, expected);
        }
    }
}
