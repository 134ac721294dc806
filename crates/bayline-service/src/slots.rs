//! Candidate slot generation.
//!
//! Walks instants at a fixed step across a window, keeping the ones that
//! fall inside the business-hours policy and don't collide with existing
//! bookings. Two modes: an explicit UTC range, and a single shop-local day
//! picked out of a wide scan around a reference instant.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use bayline_core::constants::{DAY_SCAN_HOURS, SLOT_STEP_MINUTES};

use crate::calendar::{BusinessHoursPolicy, ShopCalendar};
use crate::interval::AppointmentInterval;

/// A bookable start instant with its shop-local rendering. Two views of the
/// same instant, never separately tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub display: String,
}

fn step() -> TimeDelta {
    TimeDelta::minutes(i64::from(SLOT_STEP_MINUTES))
}

/// Rounds an instant down onto the step grid (grid is epoch-aligned).
fn align_to_step(instant: DateTime<Utc>) -> DateTime<Utc> {
    let step_secs = i64::from(SLOT_STEP_MINUTES) * 60;
    instant - TimeDelta::seconds(instant.timestamp().rem_euclid(step_secs))
}

fn is_free(candidate: &AppointmentInterval, existing: &[AppointmentInterval]) -> bool {
    existing.iter().all(|busy| !candidate.overlaps(busy))
}

/// ## Summary
/// Generates slots across an explicit UTC `[range_start, range_end)`.
///
/// Candidates start at `range_start` and advance by the fixed step. A
/// candidate survives iff its shop-local position is inside the
/// business-hours policy and it overlaps no existing interval. A weekday the
/// policy closes entirely simply contributes no slots.
#[must_use]
pub fn range_slots(
    calendar: &ShopCalendar,
    policy: &BusinessHoursPolicy,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration_minutes: u32,
    existing: &[AppointmentInterval],
) -> Vec<Slot> {
    let duration = TimeDelta::minutes(i64::from(duration_minutes));
    let mut slots = Vec::new();

    let mut cursor = range_start;
    while cursor < range_end {
        let components = calendar.components(cursor);
        let candidate = AppointmentInterval {
            start: cursor,
            end: cursor + duration,
        };
        if policy.is_open(&components) && is_free(&candidate, existing) {
            slots.push(Slot {
                start: cursor,
                display: calendar.display(cursor),
            });
        }
        cursor += step();
    }

    tracing::debug!(
        count = slots.len(),
        start = %range_start,
        end = %range_end,
        "Generated range-mode slots"
    );
    slots
}

/// ## Summary
/// Generates slots for the shop-local calendar day a reference instant falls
/// on.
///
/// Scans a wide UTC window (`reference` +/- 18 hours) aligned to the step
/// grid, retaining candidates whose shop-local date equals the target date,
/// that pass the business-hours test for that weekday, that satisfy the
/// weekday's lead-time rule against the explicit `now`, and that overlap no
/// existing interval.
#[must_use]
pub fn day_slots(
    calendar: &ShopCalendar,
    policy: &BusinessHoursPolicy,
    reference: DateTime<Utc>,
    now: DateTime<Utc>,
    duration_minutes: u32,
    existing: &[AppointmentInterval],
) -> Vec<Slot> {
    let duration = TimeDelta::minutes(i64::from(duration_minutes));
    let target_date = calendar.local_date(reference);
    let scan_end = reference + TimeDelta::hours(DAY_SCAN_HOURS);
    let mut slots = Vec::new();

    let mut cursor = align_to_step(reference - TimeDelta::hours(DAY_SCAN_HOURS));
    while cursor < scan_end {
        let candidate_start = cursor;
        cursor += step();

        if calendar.local_date(candidate_start) != target_date {
            continue;
        }
        let components = calendar.components(candidate_start);
        if !policy.is_open(&components) {
            continue;
        }
        if let Some(hours) = policy.hours_for(components.weekday)
            && let Some(lead) = hours.min_lead
            && candidate_start - now < lead
        {
            continue;
        }
        let candidate = AppointmentInterval {
            start: candidate_start,
            end: candidate_start + duration,
        };
        if is_free(&candidate, existing) {
            slots.push(Slot {
                start: candidate_start,
                display: calendar.display(candidate_start),
            });
        }
    }

    tracing::debug!(
        count = slots.len(),
        %target_date,
        "Generated single-day slots"
    );
    slots
}
