//! Tax-invoice numbers issued with each internal payment.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Source of the three-digit suffix that disambiguates invoices issued in the
/// same millisecond.
pub trait SuffixSource: Send + Sync {
    /// A value in `0..1000`.
    fn next_suffix(&self) -> u16;
}

/// Uniformly random suffixes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl SuffixSource for RandomSuffix {
    fn next_suffix(&self) -> u16 {
        rand::thread_rng().gen_range(0..1000)
    }
}

/// Always the same suffix, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSuffix(pub u16);

impl SuffixSource for FixedSuffix {
    fn next_suffix(&self) -> u16 {
        self.0 % 1000
    }
}

/// `TAX-<unix millis>-<NNN>`.
pub fn tax_invoice_number(at: DateTime<Utc>, suffix: u16) -> String {
    format!("TAX-{}-{:03}", at.timestamp_millis(), suffix % 1000)
}
