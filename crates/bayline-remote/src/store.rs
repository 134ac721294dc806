//! The persistence seam between the engine and the shop-management backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::RemoteResult;
use crate::model::{
    AppointmentPatch, AppointmentRecord, CustomerRecord, NewAppointment, NewCustomer, NewVehicle,
    TicketRecord, VehicleRecord,
};

/// Filter for an appointment search at the remote store.
#[derive(Debug, Clone)]
pub struct AppointmentQuery {
    pub location_id: String,
    /// Inclusive lower bound on appointment start.
    pub starts_after: DateTime<Utc>,
    /// Exclusive upper bound on appointment start.
    pub starts_before: DateTime<Utc>,
    /// Drop canceled records at the remote where possible; callers still
    /// re-filter on status locally.
    pub exclude_canceled: bool,
    pub customer_id: Option<String>,
    pub page_size: Option<u32>,
}

/// Remote operations the engine consumes, as black-box I/O.
///
/// Implementations do not retry; a failed call surfaces to the caller as a
/// [`RemoteError`](crate::error::RemoteError). The engine treats whatever
/// this trait returns as the current truth.
#[async_trait]
pub trait ShopStore: Send + Sync {
    async fn search_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> RemoteResult<Vec<AppointmentRecord>>;

    async fn create_appointment(&self, fields: &NewAppointment)
    -> RemoteResult<AppointmentRecord>;

    async fn update_appointment(&self, id: &str, patch: &AppointmentPatch) -> RemoteResult<()>;

    async fn delete_appointment(&self, id: &str) -> RemoteResult<()>;

    /// Lookup by canonical E.164 phone. `Ok(None)` when no customer carries
    /// the number; that is a normal outcome, not an error.
    async fn search_customer_by_phone(&self, e164: &str) -> RemoteResult<Option<CustomerRecord>>;

    async fn create_customer(&self, fields: &NewCustomer) -> RemoteResult<CustomerRecord>;

    async fn list_vehicles_for_customer(
        &self,
        customer_id: &str,
    ) -> RemoteResult<Vec<VehicleRecord>>;

    async fn create_vehicle(&self, fields: &NewVehicle) -> RemoteResult<VehicleRecord>;

    async fn list_open_tickets(&self, customer_id: &str) -> RemoteResult<Vec<TicketRecord>>;
}
