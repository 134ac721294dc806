//! The five request/response operations exposed to the routing layer.
//!
//! Inputs arrive as already-parsed primitives (phone strings, RFC 3339
//! instant strings, free-text names); outputs are values or a
//! [`ServiceError`]. Wall-clock time is threaded in explicitly so behavior
//! is deterministic under test. Everything is request-scoped; the remote
//! store holds all state.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use bayline_core::config::Settings;
use bayline_core::constants::{CONFLICT_WINDOW_HOURS, DAY_SCAN_HOURS};
use bayline_core::util::phone::normalize_phone;
use bayline_remote::model::{AppointmentPatch, AppointmentRecord, CustomerRecord, NewAppointment};
use bayline_remote::store::{AppointmentQuery, ShopStore};

use crate::calendar::{BusinessHoursPolicy, ShopCalendar};
use crate::conflict::has_conflict;
use crate::error::{ServiceError, ServiceResult};
use crate::interval::AppointmentInterval;
use crate::locator::find_appointment_at;
use crate::resolver::{resolve_customer, resolve_vehicle};
use crate::slots::{Slot, day_slots, range_slots};

/// Which window an availability query scans.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotWindow {
    /// The shop-local calendar day the reference instant falls on.
    Day { reference: String },
    /// An explicit UTC `[start, end)` range.
    Range { start: String, end: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub window: SlotWindow,
    /// Appointment duration to test candidates with; defaults to the
    /// configured fixed duration.
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: Option<i32>,
    /// RFC 3339 start instant.
    pub start: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub appointment: AppointmentRecord,
    pub customer_created: bool,
    pub vehicle_created: bool,
    /// Shop-local rendering of the booked start.
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutcome {
    pub appointment: AppointmentRecord,
    /// Open work orders on file for the customer, fetched alongside the
    /// appointment lookup.
    pub open_ticket_count: usize,
    pub display: String,
}

/// The availability & conflict resolution engine.
pub struct Engine {
    store: Arc<dyn ShopStore>,
    calendar: ShopCalendar,
    policy: BusinessHoursPolicy,
    location_id: String,
    appointment_minutes: u32,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("location_id", &self.location_id)
            .field("appointment_minutes", &self.appointment_minutes)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// ## Summary
    /// Builds an engine from loaded settings and a store.
    ///
    /// ## Errors
    /// Returns an error if the configured timezone is unknown or the
    /// appointment duration is zero.
    pub fn from_settings(store: Arc<dyn ShopStore>, settings: &Settings) -> ServiceResult<Self> {
        if settings.shop.appointment_minutes == 0 {
            return Err(ServiceError::InvalidInput(
                "shop.appointment_minutes must be positive".to_string(),
            ));
        }
        Ok(Self {
            store,
            calendar: ShopCalendar::from_identifier(&settings.shop.timezone)?,
            policy: BusinessHoursPolicy::default(),
            location_id: settings.remote.location_id.clone(),
            appointment_minutes: settings.shop.appointment_minutes,
        })
    }

    /// Replaces the default business-hours policy. Intended for hosts with a
    /// non-standard schedule and for tests that pin their own policy.
    #[must_use]
    pub fn with_policy(mut self, policy: BusinessHoursPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// ## Summary
    /// Lists bookable slots for a day or an explicit range.
    ///
    /// Existing bookings for the scanned window are fetched once, then the
    /// slot generator filters candidates against the business-hours policy
    /// and those bookings. A day the policy closes entirely yields an empty
    /// list, not an error.
    ///
    /// ## Errors
    /// `InvalidInput` for unparseable instants or a zero duration, before
    /// any remote call; remote faults otherwise.
    #[tracing::instrument(skip(self), fields(location_id = %self.location_id))]
    pub async fn availability(
        &self,
        query: &AvailabilityQuery,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<Slot>> {
        let duration = query.duration_minutes.unwrap_or(self.appointment_minutes);
        if duration == 0 {
            return Err(ServiceError::InvalidInput(
                "duration_minutes must be positive".to_string(),
            ));
        }

        match &query.window {
            SlotWindow::Day { reference } => {
                let reference = parse_instant("reference", reference)?;
                let scan = TimeDelta::hours(DAY_SCAN_HOURS);
                let existing = self
                    .busy_intervals(reference - scan, reference + scan)
                    .await?;
                Ok(day_slots(
                    &self.calendar,
                    &self.policy,
                    reference,
                    now,
                    duration,
                    &existing,
                ))
            }
            SlotWindow::Range { start, end } => {
                let start = parse_instant("start", start)?;
                let end = parse_instant("end", end)?;
                if end <= start {
                    return Err(ServiceError::InvalidInput(
                        "range end must be after range start".to_string(),
                    ));
                }
                let existing = self.busy_intervals(start, end).await?;
                Ok(range_slots(
                    &self.calendar,
                    &self.policy,
                    start,
                    end,
                    duration,
                    &existing,
                ))
            }
        }
    }

    /// ## Summary
    /// Books an appointment: resolves the customer and vehicle idempotently,
    /// re-checks the slot for conflicts, then creates the record.
    ///
    /// The conflict check runs immediately before the create even when the
    /// slot came from [`availability`](Self::availability) - time has passed
    /// and the remote state may have changed.
    ///
    /// ## Side Effects
    /// May create a customer and a vehicle; creates an appointment.
    ///
    /// ## Errors
    /// `InvalidInput` before any remote call; `Conflict` if the slot is
    /// taken; remote faults otherwise.
    #[tracing::instrument(skip(self, request), fields(location_id = %self.location_id))]
    pub async fn book(&self, request: &BookingRequest, now: DateTime<Utc>) -> ServiceResult<BookingOutcome> {
        require_nonempty("name", &request.name)?;
        require_nonempty("phone", &request.phone)?;
        require_nonempty("vehicle_make", &request.vehicle_make)?;
        require_nonempty("vehicle_model", &request.vehicle_model)?;
        let start = parse_instant("start", &request.start)?;
        if start <= now {
            return Err(ServiceError::InvalidInput(
                "start must be in the future".to_string(),
            ));
        }
        let candidate = AppointmentInterval::from_start(start, self.appointment_minutes)?;

        let (customer, customer_created) =
            resolve_customer(self.store.as_ref(), &request.name, &request.phone).await?;
        let (vehicle, vehicle_created) = resolve_vehicle(
            self.store.as_ref(),
            &customer.id,
            &request.vehicle_make,
            &request.vehicle_model,
            request.vehicle_year,
        )
        .await?;

        if has_conflict(self.store.as_ref(), &self.location_id, &candidate, None).await? {
            return Err(ServiceError::Conflict(format!(
                "slot at {} is already booked",
                self.calendar.display(start)
            )));
        }

        let title = request.title.clone().unwrap_or_else(|| {
            format!(
                "{} {} service",
                request.vehicle_make.trim(),
                request.vehicle_model.trim()
            )
        });
        let appointment = self
            .store
            .create_appointment(&NewAppointment {
                customer_id: customer.id,
                vehicle_id: vehicle.id,
                location_id: self.location_id.clone(),
                title,
                start: candidate.start,
                end: candidate.end,
            })
            .await?;

        tracing::debug!(appointment_id = %appointment.id, "Appointment booked");
        Ok(BookingOutcome {
            display: self.calendar.display(appointment.start),
            appointment,
            customer_created,
            vehicle_created,
        })
    }

    /// ## Summary
    /// Verifies an appointment by phone and exact start instant.
    ///
    /// The customer's appointments and open work orders are fetched
    /// concurrently - an intentional fan-out with no ordering dependency.
    ///
    /// ## Errors
    /// `NotFound` if no customer carries the phone or no appointment starts
    /// at the instant; remote faults otherwise.
    #[tracing::instrument(skip(self, phone))]
    pub async fn verify(&self, phone: &str, start: &str) -> ServiceResult<VerifyOutcome> {
        require_nonempty("phone", phone)?;
        let target = parse_instant("start", start)?;
        let customer = self.customer_by_phone(phone).await?;

        let (appointment, tickets) = tokio::join!(
            find_appointment_at(
                self.store.as_ref(),
                &self.location_id,
                &customer.id,
                target
            ),
            self.store.list_open_tickets(&customer.id),
        );
        let appointment = appointment?.ok_or_else(|| {
            ServiceError::NotFound(format!(
                "no appointment at {}",
                self.calendar.display(target)
            ))
        })?;
        let tickets = tickets?;

        Ok(VerifyOutcome {
            display: self.calendar.display(appointment.start),
            appointment,
            open_ticket_count: tickets.len(),
        })
    }

    /// ## Summary
    /// Cancels the appointment starting exactly at the given instant.
    /// Terminal: the engine never transitions a canceled appointment back to
    /// active.
    ///
    /// ## Side Effects
    /// Deletes the appointment at the remote store.
    ///
    /// ## Errors
    /// `NotFound` if the customer or appointment is absent; remote faults
    /// otherwise.
    #[tracing::instrument(skip(self, phone))]
    pub async fn cancel(&self, phone: &str, start: &str) -> ServiceResult<()> {
        require_nonempty("phone", phone)?;
        let target = parse_instant("start", start)?;
        let customer = self.customer_by_phone(phone).await?;

        let appointment =
            find_appointment_at(self.store.as_ref(), &self.location_id, &customer.id, target)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "no appointment at {}",
                        self.calendar.display(target)
                    ))
                })?;

        self.store.delete_appointment(&appointment.id).await?;
        tracing::debug!(appointment_id = %appointment.id, "Appointment canceled");
        Ok(())
    }

    /// ## Summary
    /// Moves an appointment to a new start, keeping its status.
    ///
    /// The conflict check excludes the appointment's own id, so moving to a
    /// time that coincides with its old interval is never reported as a
    /// conflict with itself.
    ///
    /// ## Side Effects
    /// Updates the appointment interval at the remote store.
    ///
    /// ## Errors
    /// `NotFound` if the customer or appointment is absent; `Conflict` if
    /// the new slot is taken; remote faults otherwise.
    #[tracing::instrument(skip(self, phone))]
    pub async fn reschedule(
        &self,
        phone: &str,
        old_start: &str,
        new_start: &str,
    ) -> ServiceResult<AppointmentRecord> {
        require_nonempty("phone", phone)?;
        let old_start = parse_instant("old_start", old_start)?;
        let new_start = parse_instant("new_start", new_start)?;
        let customer = self.customer_by_phone(phone).await?;

        let appointment = find_appointment_at(
            self.store.as_ref(),
            &self.location_id,
            &customer.id,
            old_start,
        )
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "no appointment at {}",
                self.calendar.display(old_start)
            ))
        })?;

        let candidate = AppointmentInterval::from_start(new_start, self.appointment_minutes)?;
        if has_conflict(
            self.store.as_ref(),
            &self.location_id,
            &candidate,
            Some(&appointment.id),
        )
        .await?
        {
            return Err(ServiceError::Conflict(format!(
                "slot at {} is already booked",
                self.calendar.display(new_start)
            )));
        }

        self.store
            .update_appointment(
                &appointment.id,
                &AppointmentPatch {
                    start: candidate.start,
                    end: candidate.end,
                },
            )
            .await?;

        tracing::debug!(appointment_id = %appointment.id, "Appointment rescheduled");
        Ok(AppointmentRecord {
            start: candidate.start,
            end: candidate.end,
            ..appointment
        })
    }

    /// Customer lookup by phone without the create fallback. Absence maps to
    /// `NotFound` for the verify/cancel/reschedule paths.
    async fn customer_by_phone(&self, phone: &str) -> ServiceResult<CustomerRecord> {
        let e164 = normalize_phone(phone);
        self.store
            .search_customer_by_phone(&e164)
            .await?
            .ok_or_else(|| ServiceError::NotFound("no customer with that phone number".to_string()))
    }

    /// Active appointment intervals overlapping a scan window, padded on
    /// both sides so bookings that start outside the window but reach into
    /// it are still seen.
    async fn busy_intervals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ServiceResult<Vec<AppointmentInterval>> {
        let pad = TimeDelta::hours(CONFLICT_WINDOW_HOURS);
        let records = self
            .store
            .search_appointments(&AppointmentQuery {
                location_id: self.location_id.clone(),
                starts_after: from - pad,
                starts_before: to + pad,
                exclude_canceled: true,
                customer_id: None,
                page_size: None,
            })
            .await?;

        Ok(records
            .into_iter()
            .filter(|record| record.status.is_active())
            .map(|record| AppointmentInterval {
                start: record.start,
                end: record.end,
            })
            .collect())
    }
}

fn require_nonempty(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

fn parse_instant(field: &str, value: &str) -> ServiceResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| ServiceError::InvalidInput(format!("{field}: unparseable instant: {e}")))
}
