//! Exact-start appointment lookup for the verify/cancel/reschedule flows.

use chrono::{DateTime, TimeDelta, Utc};

use bayline_core::constants::{APPOINTMENT_PAGE_SIZE, CONFLICT_WINDOW_HOURS};
use bayline_remote::model::AppointmentRecord;
use bayline_remote::store::{AppointmentQuery, ShopStore};

use crate::error::ServiceResult;

/// ## Summary
/// Resolves a customer's appointment whose start equals `target` exactly.
///
/// Instant equality, not interval containment - there is no tolerance
/// window. Fetches the customer's non-canceled appointments in a bounded
/// window around the target and picks the exact match. `Ok(None)` means "not
/// found", a normal outcome the caller maps to its own taxonomy.
///
/// ## Errors
/// Propagates remote faults unchanged.
pub async fn find_appointment_at(
    store: &dyn ShopStore,
    location_id: &str,
    customer_id: &str,
    target: DateTime<Utc>,
) -> ServiceResult<Option<AppointmentRecord>> {
    let window = TimeDelta::hours(CONFLICT_WINDOW_HOURS);
    let upcoming = store
        .search_appointments(&AppointmentQuery {
            location_id: location_id.to_string(),
            starts_after: target - window,
            starts_before: target + window,
            exclude_canceled: true,
            customer_id: Some(customer_id.to_string()),
            page_size: Some(APPOINTMENT_PAGE_SIZE),
        })
        .await?;

    let found = upcoming
        .into_iter()
        .filter(|record| record.status.is_active())
        .find(|record| record.start == target);

    tracing::debug!(
        customer_id,
        target = %target,
        found = found.is_some(),
        "Located appointment by exact start"
    );
    Ok(found)
}
