/// Scheduling constants shared across crates
pub const DEFAULT_SHOP_TIMEZONE: &str = "America/New_York";

/// Spacing between candidate slot start times, in minutes.
pub const SLOT_STEP_MINUTES: u32 = 30;

/// Fixed appointment duration on the booking path, in minutes.
pub const DEFAULT_APPOINTMENT_MINUTES: u32 = 30;

/// Half-width of the fetch window around a candidate when checking for
/// conflicts, in hours. Far larger than any single appointment so the
/// in-memory filter stays authoritative regardless of remote-side
/// pagination or sort order.
pub const CONFLICT_WINDOW_HOURS: i64 = 24;

/// Half-width of the UTC scan window around the reference instant in
/// single-day slot generation, in hours. Wide enough to cover a full
/// shop-local day at any offset from UTC.
pub const DAY_SCAN_HOURS: i64 = 18;

/// Page size bound when fetching a customer's appointments.
pub const APPOINTMENT_PAGE_SIZE: u32 = 50;
