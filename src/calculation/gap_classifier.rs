//! Gap classification between adjacent worked intervals.
//!
//! Every gap in a day is one of three things: continuity (no gap at all),
//! an unpaid meal, or the boundary between two calls. The meal side of the
//! boundary is inclusive: a gap exactly equal to the contract's maximum meal
//! break is still a meal.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::models::ClockInterval;

/// How a gap between two worked intervals is treated.
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::GapKind;
///
/// assert_eq!(GapKind::NewCall.to_string(), "new call");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// The next interval starts exactly where the previous one ended.
    Continuity,
    /// A gap no longer than the maximum meal break.
    Meal,
    /// A gap longer than the maximum meal break; the previous call ends here.
    NewCall,
}

impl std::fmt::Display for GapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapKind::Continuity => write!(f, "continuity"),
            GapKind::Meal => write!(f, "meal"),
            GapKind::NewCall => write!(f, "new call"),
        }
    }
}

/// Classifies a gap length against the maximum meal break.
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::{classify_gap_duration, GapKind};
/// use chrono::TimeDelta;
///
/// let max = TimeDelta::hours(2);
/// assert_eq!(classify_gap_duration(TimeDelta::zero(), max), GapKind::Continuity);
/// assert_eq!(classify_gap_duration(TimeDelta::hours(2), max), GapKind::Meal);
/// assert_eq!(
///     classify_gap_duration(TimeDelta::hours(2) + TimeDelta::seconds(1), max),
///     GapKind::NewCall
/// );
/// ```
pub fn classify_gap_duration(gap: TimeDelta, meal_break_max: TimeDelta) -> GapKind {
    if gap <= TimeDelta::zero() {
        GapKind::Continuity
    } else if gap <= meal_break_max {
        GapKind::Meal
    } else {
        GapKind::NewCall
    }
}

/// Classifies the gap between an ending interval and the next starting one.
///
/// The intervals must be in time order and must not overlap.
pub fn classify_gap(
    ending: &ClockInterval,
    starting: &ClockInterval,
    meal_break_max: TimeDelta,
) -> GapKind {
    classify_gap_duration(starting.time_in - ending.time_out, meal_break_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn interval(id: &str, time_in: &str, time_out: &str) -> ClockInterval {
        let dt = |t: &str| {
            NaiveDateTime::parse_from_str(&format!("2026-05-20 {}", t), "%Y-%m-%d %H:%M:%S")
                .unwrap()
        };
        ClockInterval {
            source_line_id: id.to_string(),
            time_in: dt(time_in),
            time_out: dt(time_out),
        }
    }

    #[test]
    fn test_touching_intervals_are_continuity() {
        let a = interval("a", "08:00:00", "10:00:00");
        let b = interval("b", "10:00:00", "12:00:00");
        assert_eq!(classify_gap(&a, &b, TimeDelta::hours(2)), GapKind::Continuity);
    }

    #[test]
    fn test_one_hour_gap_is_meal() {
        let a = interval("a", "03:00:00", "08:00:00");
        let b = interval("b", "09:00:00", "09:30:00");
        assert_eq!(classify_gap(&a, &b, TimeDelta::hours(2)), GapKind::Meal);
    }

    #[test]
    fn test_gap_equal_to_max_is_meal() {
        let a = interval("a", "06:00:00", "08:00:00");
        let b = interval("b", "10:00:00", "11:00:00");
        assert_eq!(classify_gap(&a, &b, TimeDelta::hours(2)), GapKind::Meal);
    }

    #[test]
    fn test_gap_one_second_over_max_is_new_call() {
        let a = interval("a", "06:00:00", "08:00:00");
        let b = interval("b", "10:00:01", "11:00:00");
        assert_eq!(classify_gap(&a, &b, TimeDelta::hours(2)), GapKind::NewCall);
    }

    #[test]
    fn test_long_gap_is_new_call() {
        let a = interval("a", "09:00:00", "09:30:00");
        let b = interval("b", "20:45:00", "23:45:00");
        assert_eq!(classify_gap(&a, &b, TimeDelta::hours(2)), GapKind::NewCall);
    }

    #[test]
    fn test_zero_max_makes_every_gap_a_new_call() {
        assert_eq!(
            classify_gap_duration(TimeDelta::seconds(1), TimeDelta::zero()),
            GapKind::NewCall
        );
        assert_eq!(
            classify_gap_duration(TimeDelta::zero(), TimeDelta::zero()),
            GapKind::Continuity
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(GapKind::Meal.to_string(), "meal");
        assert_eq!(GapKind::Continuity.to_string(), "continuity");
    }
}
