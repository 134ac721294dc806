//! The single authority for "is this slot still free".
//!
//! Both slot generation and the commit path go through the same predicate,
//! and the commit-time check is re-run even for a slot the generator offered
//! moments earlier: the remote state may have changed, and with last-write-
//! wins at the store this re-check is the only defense against two
//! near-simultaneous bookings.

use chrono::TimeDelta;

use bayline_core::constants::CONFLICT_WINDOW_HOURS;
use bayline_remote::store::{AppointmentQuery, ShopStore};

use crate::error::ServiceResult;
use crate::interval::AppointmentInterval;

/// ## Summary
/// Whether a candidate interval collides with an existing non-canceled
/// appointment at a location.
///
/// Fetches appointments in a window of `candidate.start` +/- 24 hours - far
/// wider than any single appointment, so the in-memory filter is
/// authoritative regardless of remote-side pagination or sort - then applies
/// the half-open overlap predicate. `exclude_id` drops one appointment from
/// consideration; the reschedule path passes the id of the appointment being
/// moved so it cannot conflict with itself.
///
/// ## Errors
/// Propagates remote faults unchanged. Best-effort: this is a re-check, not
/// a lock.
pub async fn has_conflict(
    store: &dyn ShopStore,
    location_id: &str,
    candidate: &AppointmentInterval,
    exclude_id: Option<&str>,
) -> ServiceResult<bool> {
    let window = TimeDelta::hours(CONFLICT_WINDOW_HOURS);
    let existing = store
        .search_appointments(&AppointmentQuery {
            location_id: location_id.to_string(),
            starts_after: candidate.start - window,
            starts_before: candidate.start + window,
            exclude_canceled: true,
            customer_id: None,
            page_size: None,
        })
        .await?;

    let conflict = existing
        .iter()
        .filter(|record| record.status.is_active())
        .filter(|record| exclude_id.is_none_or(|id| record.id != id))
        .any(|record| {
            candidate.overlaps(&AppointmentInterval {
                start: record.start,
                end: record.end,
            })
        });

    tracing::debug!(
        location_id,
        candidate_start = %candidate.start,
        exclude_id = ?exclude_id,
        conflict,
        "Checked candidate against existing bookings"
    );
    Ok(conflict)
}
