//! Shop-local calendar positions and the business-hours policy.
//!
//! All conversions go through the real timezone database (`chrono-tz`), never
//! a fixed offset, so weekday/hour attribution stays correct across daylight
//! saving transitions.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

use bayline_core::error::{CoreError, CoreResult};

/// Shop-local calendar position of an instant. Derived and ephemeral - never
/// persisted, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopTimeComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 0 = Sunday through 6 = Saturday.
    pub weekday: u32,
    pub hour: u32,
    pub minute: u32,
}

impl ShopTimeComponents {
    /// Minutes elapsed since shop-local midnight.
    #[must_use]
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// Converts UTC instants into the shop's local calendar.
#[derive(Debug, Clone, Copy)]
pub struct ShopCalendar {
    tz: Tz,
}

impl ShopCalendar {
    /// ## Summary
    /// Builds a calendar anchored to an IANA timezone identifier.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the identifier is not a
    /// known IANA timezone.
    pub fn from_identifier(identifier: &str) -> CoreResult<Self> {
        let tz = Tz::from_str(identifier).map_err(|_| {
            CoreError::InvalidConfiguration(format!("unknown shop timezone: {identifier}"))
        })?;
        Ok(Self { tz })
    }

    /// Shop-local calendar position of an instant.
    #[must_use]
    pub fn components(&self, instant: DateTime<Utc>) -> ShopTimeComponents {
        let local = instant.with_timezone(&self.tz);
        ShopTimeComponents {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            weekday: local.weekday().num_days_from_sunday(),
            hour: local.hour(),
            minute: local.minute(),
        }
    }

    /// Shop-local calendar date an instant falls on.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Human-readable rendering of an instant, localized to the shop
    /// timezone. The other view of the same instant a slot carries.
    #[must_use]
    pub fn display(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.tz)
            .format("%a, %b %-d at %-I:%M %p")
            .to_string()
    }
}

/// Opening hours for one weekday, in minutes since local midnight.
#[derive(Debug, Clone, Copy)]
pub struct DayHours {
    pub open_minute: u32,
    pub close_minute: u32,
    /// Minimum notice before a slot on this weekday is bookable, if the
    /// weekday carries a lead-time rule.
    pub min_lead: Option<TimeDelta>,
}

impl DayHours {
    #[must_use]
    pub fn new(open_minute: u32, close_minute: u32) -> Self {
        Self {
            open_minute,
            close_minute,
            min_lead: None,
        }
    }

    #[must_use]
    pub fn with_lead(mut self, lead: TimeDelta) -> Self {
        self.min_lead = Some(lead);
        self
    }
}

/// Weekday-indexed opening hours. A missing entry means the shop is closed
/// that day. Process-wide constant, never mutated at runtime.
#[derive(Debug, Clone)]
pub struct BusinessHoursPolicy {
    /// Indexed by weekday, 0 = Sunday.
    days: [Option<DayHours>; 7],
}

impl BusinessHoursPolicy {
    #[must_use]
    pub fn new(days: [Option<DayHours>; 7]) -> Self {
        Self { days }
    }

    /// Opening hours for a weekday (0 = Sunday), if the shop opens at all.
    #[must_use]
    pub fn hours_for(&self, weekday: u32) -> Option<DayHours> {
        self.days.get(weekday as usize).copied().flatten()
    }

    /// Whether the shop is open at a shop-local position:
    /// `open <= hour*60+minute < close` for that weekday.
    #[must_use]
    pub fn is_open(&self, components: &ShopTimeComponents) -> bool {
        self.hours_for(components.weekday).is_some_and(|hours| {
            let minute = components.minute_of_day();
            hours.open_minute <= minute && minute < hours.close_minute
        })
    }
}

impl Default for BusinessHoursPolicy {
    /// Mon-Fri 08:00-17:30, Sat 08:00-12:00 with a 24-hour lead-time rule,
    /// Sunday closed.
    fn default() -> Self {
        let weekday = Some(DayHours::new(8 * 60, 17 * 60 + 30));
        let saturday = Some(DayHours::new(8 * 60, 12 * 60).with_lead(TimeDelta::hours(24)));
        Self {
            days: [None, weekday, weekday, weekday, weekday, weekday, saturday],
        }
    }
}
