//! Phone number normalization for customer lookup keys.
//!
//! ## Summary
//! Converts raw phone strings into a canonical dialing format so two
//! superficially different representations of the same number resolve to the
//! same customer. Applied everywhere a phone number is used as a lookup key.

/// Normalize a raw phone string to canonical dialing format.
///
/// Strips all non-digit characters, then:
/// - exactly 10 digits: prefixed with country code "1" (`+1XXXXXXXXXX`)
/// - exactly 11 digits starting with "1": prefixed with "+"
/// - anything else: "+" plus the digit string as-is
///
/// Malformed input passes through rather than being rejected; downstream
/// validation is the caller's responsibility. Total and idempotent.
///
/// Examples:
/// - "555-123-4567" -> "+15551234567"
/// - "1 (555) 123-4567" -> "+15551234567"
/// - "+44 20 7946 0958" -> "+442079460958"
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == 10 {
        format!("+1{digits}")
    } else if digits.len() == 11 && digits.starts_with('1') {
        format!("+{digits}")
    } else {
        format!("+{digits}")
    }
}
