//! Business entities kept by the store.
//!
//! All records serialize with camelCase field names, which is also the shape
//! partial-update patches are written in.

/// Implements `Timestamped` for records with `created_at`/`updated_at` options.
macro_rules! impl_timestamped {
    ($t:ty) => {
        impl fuelops_core::Timestamped for $t {
            fn stamp_created(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.created_at = Some(at);
                self.updated_at = Some(at);
            }

            fn stamp_updated(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.updated_at = Some(at);
            }
        }
    };
}

pub(crate) use impl_timestamped;

pub mod delivery_note;
pub mod internal_order;
pub mod oil_receipt;
pub mod order;
pub mod pump_sale;
pub mod purchase_order;
pub mod quotation;
pub mod receipt;
pub mod sale_tx;
pub mod tank_entry;
pub mod transport;

use serde::{Deserialize, Serialize};

pub use delivery_note::{DeliveryNote, DeliveryNoteStatus};
pub use internal_order::{DeliverySource, InternalOilOrder, InternalOrderItem, InternalOrderStatus};
pub use oil_receipt::{OilReceipt, OilReceiptLine, OilReceiptStatus};
pub use order::{OrderStatus, OrderSummaryItem};
pub use pump_sale::{
    InternalPumpSale, PaymentEntry, PaymentMethod, PaymentRequestStatus, SaleStatus, TaxInvoice,
};
pub use purchase_order::{PurchaseOrder, PurchaseOrderBranch, PurchaseOrderStatus};
pub use quotation::{Quotation, QuotationBranch, QuotationStatus};
pub use receipt::{Receipt, ReceiptStatus};
pub use sale_tx::SaleTransaction;
pub use tank_entry::TankEntryRecord;
pub use transport::{DriverJob, DriverJobStatus, FuelingRecord, TransportDelivery, TransportStatus};

/// Priced quantity of one oil type, shared by most document kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OilLine {
    pub oil_type: String,
    /// Litres.
    pub quantity: f64,
    pub price_per_liter: f64,
    #[serde(default)]
    pub total_amount: f64,
}

impl OilLine {
    /// Line with `totalAmount = quantity × pricePerLiter`.
    pub fn new(oil_type: impl Into<String>, quantity: f64, price_per_liter: f64) -> Self {
        Self {
            oil_type: oil_type.into(),
            quantity,
            price_per_liter,
            total_amount: quantity * price_per_liter,
        }
    }
}

pub(crate) fn sum_totals(lines: &[OilLine]) -> f64 {
    lines.iter().map(|l| l.total_amount).sum()
}
