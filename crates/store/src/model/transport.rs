//! Truck trips between branches and the driver jobs that run them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fuelops_core::{BranchId, Entity};

use super::impl_timestamped;
use crate::collection::Record;
use crate::scope::{BranchScoped, Membership};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportStatus {
    #[default]
    Idle,
    InTransit,
    Completed,
}

/// One truck trip from a source branch to one or more destinations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportDelivery {
    pub id: String,
    pub transport_no: String,
    #[serde(default)]
    pub transport_date: Option<NaiveDate>,
    #[serde(default)]
    pub truck_id: String,
    #[serde(default)]
    pub trailer_id: Option<String>,
    #[serde(default)]
    pub driver_name: String,
    pub source_branch_id: BranchId,
    #[serde(default)]
    pub destination_branch_ids: Vec<BranchId>,
    #[serde(default)]
    pub start_odometer: Option<f64>,
    #[serde(default)]
    pub end_odometer: Option<f64>,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TransportStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TransportDelivery {
    pub fn new(
        id: impl Into<String>,
        transport_no: impl Into<String>,
        source_branch_id: BranchId,
        destination_branch_ids: Vec<BranchId>,
    ) -> Self {
        Self {
            id: id.into(),
            transport_no: transport_no.into(),
            source_branch_id,
            destination_branch_ids,
            ..Self::default()
        }
    }
}

impl Entity for TransportDelivery {
    const KIND: &'static str = "transport delivery";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(TransportDelivery);

impl Record for TransportDelivery {
    fn document_no(&self) -> Option<&str> {
        Some(&self.transport_no)
    }
}

impl BranchScoped for TransportDelivery {
    fn membership(&self) -> Membership<'_> {
        Membership::Route {
            source: self.source_branch_id,
            destinations: &self.destination_branch_ids,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverJobStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

/// Fuel put into the truck during a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelingRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub station: String,
    pub liters: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub odometer: Option<f64>,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A driver's assignment for one transport trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverJob {
    pub id: String,
    pub transport_no: String,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub truck_id: String,
    pub source_branch_id: BranchId,
    #[serde(default)]
    pub destination_branch_ids: Vec<BranchId>,
    #[serde(default)]
    pub status: DriverJobStatus,
    #[serde(default)]
    pub fueling_records: Vec<FuelingRecord>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DriverJob {
    pub fn new(
        id: impl Into<String>,
        transport_no: impl Into<String>,
        source_branch_id: BranchId,
        destination_branch_ids: Vec<BranchId>,
    ) -> Self {
        Self {
            id: id.into(),
            transport_no: transport_no.into(),
            source_branch_id,
            destination_branch_ids,
            ..Self::default()
        }
    }

    pub fn fueled_liters(&self) -> f64 {
        self.fueling_records.iter().map(|r| r.liters).sum()
    }
}

impl Entity for DriverJob {
    const KIND: &'static str = "driver job";

    fn id(&self) -> &str {
        &self.id
    }
}

impl_timestamped!(DriverJob);

impl Record for DriverJob {}

impl BranchScoped for DriverJob {
    fn membership(&self) -> Membership<'_> {
        Membership::Route {
            source: self.source_branch_id,
            destinations: &self.destination_branch_ids,
        }
    }
}
