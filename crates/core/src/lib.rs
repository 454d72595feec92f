//! `fuelops-core`: primitives shared by every fuelops crate.
//!
//! Errors, branch ids, time and id sources. Nothing here touches I/O.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{Entity, Timestamped};
pub use error::{DomainError, DomainResult};
pub use id::{BranchId, IdGenerator, SequentialIds, UuidV7Ids};
