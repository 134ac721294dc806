//! Half-open appointment intervals and the overlap predicate shared by slot
//! generation and conflict checking.

use chrono::{DateTime, TimeDelta, Utc};

use bayline_core::error::{CoreError, CoreResult};

/// A `[start, end)` interval. `end > start` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AppointmentInterval {
    /// ## Summary
    /// Builds an interval from a start instant and a duration in minutes.
    ///
    /// ## Errors
    /// Returns an error if the duration is zero, which would break the
    /// `end > start` invariant.
    pub fn from_start(start: DateTime<Utc>, duration_minutes: u32) -> CoreResult<Self> {
        if duration_minutes == 0 {
            return Err(CoreError::InvariantViolation(
                "appointment interval must have positive duration",
            ));
        }
        Ok(Self {
            start,
            end: start + TimeDelta::minutes(i64::from(duration_minutes)),
        })
    }

    /// Whether two half-open intervals share at least one instant:
    /// `a.start < b.end && a.end > b.start`. Symmetric; back-to-back
    /// intervals do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}
