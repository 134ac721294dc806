//! Bayline integration test support.
//!
//! Provides an in-memory [`ShopStore`] fake with the same observable
//! behavior the engine relies on at the real backend: windowed appointment
//! search, find-by-phone, per-customer vehicle listing, and soft-removal on
//! delete. Ids are minted as UUIDs. State sits behind a mutex so a fake can
//! be shared between an engine and a test's own assertions.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bayline_remote::error::{RemoteError, RemoteResult};
use bayline_remote::model::{
    AppointmentPatch, AppointmentRecord, AppointmentStatus, CustomerRecord, NewAppointment,
    NewCustomer, NewVehicle, TicketRecord, VehicleRecord,
};
use bayline_remote::store::{AppointmentQuery, ShopStore};

#[derive(Debug, Default)]
struct State {
    appointments: Vec<AppointmentRecord>,
    customers: Vec<CustomerRecord>,
    vehicles: Vec<VehicleRecord>,
    tickets: Vec<TicketRecord>,
}

/// In-memory stand-in for the shop-management backend.
#[derive(Debug, Default)]
pub struct MemoryShopStore {
    state: Mutex<State>,
}

fn mint_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

impl MemoryShopStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake store mutex poisoned")
    }

    /// Seeds a customer directly, bypassing the resolver.
    pub fn seed_customer(&self, first: &str, last: &str, phones: &[&str]) -> CustomerRecord {
        let record = CustomerRecord {
            id: mint_id("cus"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_numbers: phones.iter().map(ToString::to_string).collect(),
        };
        self.lock().customers.push(record.clone());
        record
    }

    /// Seeds an appointment directly, bypassing the booking path.
    pub fn seed_appointment(
        &self,
        customer_id: &str,
        location_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: AppointmentStatus,
    ) -> AppointmentRecord {
        let record = AppointmentRecord {
            id: mint_id("apt"),
            customer_id: customer_id.to_string(),
            vehicle_id: mint_id("veh"),
            location_id: location_id.to_string(),
            title: "Seeded appointment".to_string(),
            start,
            end,
            status,
        };
        self.lock().appointments.push(record.clone());
        record
    }

    pub fn seed_ticket(&self, customer_id: &str, status: &str) -> TicketRecord {
        let record = TicketRecord {
            id: mint_id("tkt"),
            customer_id: customer_id.to_string(),
            status: status.to_string(),
        };
        self.lock().tickets.push(record.clone());
        record
    }

    /// Current state of an appointment, if it exists.
    #[must_use]
    pub fn appointment(&self, id: &str) -> Option<AppointmentRecord> {
        self.lock().appointments.iter().find(|a| a.id == id).cloned()
    }

    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.lock().customers.len()
    }

    #[must_use]
    pub fn vehicle_count(&self) -> usize {
        self.lock().vehicles.len()
    }
}

#[async_trait]
impl ShopStore for MemoryShopStore {
    async fn search_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> RemoteResult<Vec<AppointmentRecord>> {
        let state = self.lock();
        let mut hits: Vec<AppointmentRecord> = state
            .appointments
            .iter()
            .filter(|a| a.location_id == query.location_id)
            .filter(|a| a.start >= query.starts_after && a.start < query.starts_before)
            .filter(|a| !query.exclude_canceled || a.status.is_active())
            .filter(|a| {
                query
                    .customer_id
                    .as_ref()
                    .is_none_or(|id| &a.customer_id == id)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|a| a.start);
        if let Some(page_size) = query.page_size {
            hits.truncate(page_size as usize);
        }
        Ok(hits)
    }

    async fn create_appointment(
        &self,
        fields: &NewAppointment,
    ) -> RemoteResult<AppointmentRecord> {
        let record = AppointmentRecord {
            id: mint_id("apt"),
            customer_id: fields.customer_id.clone(),
            vehicle_id: fields.vehicle_id.clone(),
            location_id: fields.location_id.clone(),
            title: fields.title.clone(),
            start: fields.start,
            end: fields.end,
            status: AppointmentStatus::Scheduled,
        };
        self.lock().appointments.push(record.clone());
        Ok(record)
    }

    async fn update_appointment(&self, id: &str, patch: &AppointmentPatch) -> RemoteResult<()> {
        let mut state = self.lock();
        let record = state
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RemoteError::NotFound(format!("appointment {id}")))?;
        record.start = patch.start;
        record.end = patch.end;
        Ok(())
    }

    async fn delete_appointment(&self, id: &str) -> RemoteResult<()> {
        // The real backend soft-removes; model that as a status flip so
        // canceled records stay visible to unfiltered searches.
        let mut state = self.lock();
        let record = state
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RemoteError::NotFound(format!("appointment {id}")))?;
        record.status = AppointmentStatus::Canceled;
        Ok(())
    }

    async fn search_customer_by_phone(&self, e164: &str) -> RemoteResult<Option<CustomerRecord>> {
        Ok(self
            .lock()
            .customers
            .iter()
            .find(|c| c.phone_numbers.iter().any(|p| p == e164))
            .cloned())
    }

    async fn create_customer(&self, fields: &NewCustomer) -> RemoteResult<CustomerRecord> {
        let record = CustomerRecord {
            id: mint_id("cus"),
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            phone_numbers: fields.phone_numbers.clone(),
        };
        self.lock().customers.push(record.clone());
        Ok(record)
    }

    async fn list_vehicles_for_customer(
        &self,
        customer_id: &str,
    ) -> RemoteResult<Vec<VehicleRecord>> {
        Ok(self
            .lock()
            .vehicles
            .iter()
            .filter(|v| v.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn create_vehicle(&self, fields: &NewVehicle) -> RemoteResult<VehicleRecord> {
        let record = VehicleRecord {
            id: mint_id("veh"),
            customer_id: fields.customer_id.clone(),
            make: fields.make.clone(),
            model: fields.model.clone(),
            year: fields.year,
            size: Some(fields.size.clone()),
        };
        self.lock().vehicles.push(record.clone());
        Ok(record)
    }

    async fn list_open_tickets(&self, customer_id: &str) -> RemoteResult<Vec<TicketRecord>> {
        Ok(self
            .lock()
            .tickets
            .iter()
            .filter(|t| t.customer_id == customer_id && t.status == "open")
            .cloned()
            .collect())
    }
}
