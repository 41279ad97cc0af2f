//! Conversions between decimal hours and exact durations.
//!
//! Contract thresholds and reported quantities are decimal hours; the engine
//! compares and subtracts whole-second [`TimeDelta`]s so that boundary checks
//! are exact.

use chrono::TimeDelta;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const SECONDS_PER_HOUR: i64 = 3600;

/// Converts decimal hours to a whole-second duration.
///
/// Fractions of a second are rounded to the nearest second, so anything
/// under half a second becomes zero. [`ContractRules::validate`](crate::models::ContractRules::validate)
/// rejects thresholds that would collapse this way.
///
/// # Example
///
/// ```
/// use timecard_rules::models::duration_from_hours;
/// use chrono::TimeDelta;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_from_hours(Decimal::new(15, 1)), TimeDelta::minutes(90));
/// ```
pub fn duration_from_hours(hours: Decimal) -> TimeDelta {
    let seconds = (hours * Decimal::from(SECONDS_PER_HOUR))
        .round()
        .to_i64()
        .unwrap_or_default();
    TimeDelta::try_seconds(seconds).unwrap_or_else(TimeDelta::zero)
}

/// Converts a duration to decimal hours, rounded to 4 places and normalized.
///
/// # Example
///
/// ```
/// use timecard_rules::models::hours_from_duration;
/// use chrono::TimeDelta;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_from_duration(TimeDelta::minutes(30)), Decimal::new(5, 1));
/// ```
pub fn hours_from_duration(duration: TimeDelta) -> Decimal {
    (Decimal::from(duration.num_seconds()) / Decimal::from(SECONDS_PER_HOUR))
        .round_dp(4)
        .normalize()
}

/// Formats a duration as `HH:MM:SS`. Negative durations render as zero.
pub fn format_hms(duration: TimeDelta) -> String {
    let total = duration.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / SECONDS_PER_HOUR,
        (total % SECONDS_PER_HOUR) / 60,
        total % 60
    )
}
