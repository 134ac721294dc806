//! Projections of the records owned by the shop-management backend.
//!
//! The engine only reads and writes these fields; the backend may carry more.
//! Record ids are opaque strings minted by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status as reported by the backend.
///
/// Only non-[`Canceled`](Self::Canceled) records participate in conflict
/// detection. Statuses this engine does not know about are preserved
/// verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Canceled,
    #[serde(untagged)]
    Other(String),
}

impl AppointmentStatus {
    /// Whether this appointment blocks other bookings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Canceled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: String,
    pub customer_id: String,
    pub vehicle_id: String,
    pub location_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_numbers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub customer_id: String,
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Open work order attached to a customer. Fetched alongside upcoming
/// appointments on the verify path; the engine never mutates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: String,
    pub customer_id: String,
    pub status: String,
}

/// Fields for a new appointment. Validation and the conflict check have
/// already passed by the time one of these is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub customer_id: String,
    pub vehicle_id: String,
    pub location_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Partial update applied on reschedule. Only the interval moves; status
/// transitions are the backend's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone_numbers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub customer_id: String,
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub size: String,
}
