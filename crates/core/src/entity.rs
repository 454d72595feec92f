//! Record identity and store-managed timestamps.

use chrono::{DateTime, Utc};

/// A record with a stable identity.
///
/// Every record kept by the store is identified by a string id that stays
/// stable across partial updates.
pub trait Entity {
    /// Human-readable kind used in errors and logs (e.g. `"delivery note"`).
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &str;
}

/// Entities whose creation/modification times are stamped by the store.
///
/// Implementations for records without such fields leave the defaults.
pub trait Timestamped {
    fn stamp_created(&mut self, _at: DateTime<Utc>) {}

    fn stamp_updated(&mut self, _at: DateTime<Utc>) {}
}
