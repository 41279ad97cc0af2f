//! Time card and clock interval models.
//!
//! A time card records one worker's day under one contract; its clock
//! intervals are the worked lines entered upstream.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::hours::hours_from_duration;

/// A worker's time card for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCard {
    /// Unique identifier for the time card.
    pub id: String,
    /// The contract whose rules apply.
    pub contract_id: String,
    /// The worker the card belongs to.
    pub worker_id: String,
    /// The day the card covers.
    pub date: NaiveDate,
}

/// A worked clock-in/clock-out interval.
///
/// Intervals are immutable inputs to the engine. `time_in` must be before
/// `time_out`, and a day's intervals must not overlap; the engine checks both
/// before running any rule.
///
/// # Example
///
/// ```
/// use timecard_rules::models::ClockInterval;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let interval = ClockInterval {
///     source_line_id: "TCL_1".to_string(),
///     time_in: NaiveDateTime::parse_from_str("2026-05-19 03:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     time_out: NaiveDateTime::parse_from_str("2026-05-19 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(interval.worked_hours(), Decimal::from(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockInterval {
    /// Identity of the originating worked record.
    pub source_line_id: String,
    /// Clock-in time.
    pub time_in: NaiveDateTime,
    /// Clock-out time.
    pub time_out: NaiveDateTime,
}

impl ClockInterval {
    /// Returns the worked duration.
    pub fn worked(&self) -> TimeDelta {
        self.time_out - self.time_in
    }

    /// Returns the worked duration in hours.
    pub fn worked_hours(&self) -> Decimal {
        hours_from_duration(self.worked())
    }
}
