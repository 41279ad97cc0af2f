//! Clock interval validation.
//!
//! The engine refuses to run on malformed input. This module checks a day's
//! intervals and returns them sorted by `time_in`, ready for segmentation.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::{EngineError, EngineResult};
use crate::models::ClockInterval;

/// Validates a day's clock intervals and returns them in time order.
///
/// # Errors
///
/// - [`EngineError::InvalidInterval`] for an empty or duplicated
///   `source_line_id`, or when `time_in >= time_out`
/// - [`EngineError::IntervalOutsideDay`] when an interval starts on another
///   date or ends after midnight following `date`
/// - [`EngineError::OverlappingIntervals`] when two intervals overlap;
///   touching intervals (one ends exactly where the next begins) are fine
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::validate_intervals;
/// use timecard_rules::models::ClockInterval;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 5, 19).unwrap();
/// let intervals = vec![
///     ClockInterval { source_line_id: "b".into(), time_in: dt("2026-05-19 09:00:00"), time_out: dt("2026-05-19 09:30:00") },
///     ClockInterval { source_line_id: "a".into(), time_in: dt("2026-05-19 03:00:00"), time_out: dt("2026-05-19 08:00:00") },
/// ];
///
/// let sorted = validate_intervals(date, &intervals).unwrap();
/// assert_eq!(sorted[0].source_line_id, "a");
/// ```
pub fn validate_intervals(
    date: NaiveDate,
    intervals: &[ClockInterval],
) -> EngineResult<Vec<ClockInterval>> {
    let day_start = date.and_time(chrono::NaiveTime::MIN);
    let day_end = day_start + TimeDelta::days(1);

    let mut seen: HashSet<&str> = HashSet::with_capacity(intervals.len());
    for interval in intervals {
        check_interval(interval, date, day_start, day_end)?;

        if !seen.insert(interval.source_line_id.as_str()) {
            return Err(EngineError::InvalidInterval {
                line_id: interval.source_line_id.clone(),
                message: "source line id appears more than once".to_string(),
            });
        }
    }

    let mut sorted = intervals.to_vec();
    sorted.sort_by(|a, b| {
        a.time_in
            .cmp(&b.time_in)
            .then_with(|| a.time_out.cmp(&b.time_out))
    });

    if let Some(pair) = sorted.windows(2).find(|w| w[1].time_in < w[0].time_out) {
        return Err(EngineError::OverlappingIntervals {
            first: pair[0].source_line_id.clone(),
            second: pair[1].source_line_id.clone(),
            at: pair[1].time_in,
        });
    }

    Ok(sorted)
}

fn check_interval(
    interval: &ClockInterval,
    date: NaiveDate,
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
) -> EngineResult<()> {
    if interval.source_line_id.trim().is_empty() {
        return Err(EngineError::InvalidInterval {
            line_id: interval.source_line_id.clone(),
            message: "source line id is empty".to_string(),
        });
    }

    if interval.time_in >= interval.time_out {
        return Err(EngineError::InvalidInterval {
            line_id: interval.source_line_id.clone(),
            message: format!(
                "time_out {} is not after time_in {}",
                interval.time_out, interval.time_in
            ),
        });
    }

    if interval.time_in < day_start || interval.time_out > day_end {
        return Err(EngineError::IntervalOutsideDay {
            line_id: interval.source_line_id.clone(),
            date,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn interval(id: &str, time_in: &str, time_out: &str) -> ClockInterval {
        ClockInterval {
            source_line_id: id.to_string(),
            time_in: make_datetime(&format!("2026-05-20 {}", time_in)),
            time_out: make_datetime(&format!("2026-05-20 {}", time_out)),
        }
    }

    #[test]
    fn test_sorts_by_time_in() {
        let intervals = vec![
            interval("TCL_3", "20:45:00", "23:45:00"),
            interval("TCL_1", "03:00:00", "08:00:00"),
            interval("TCL_2", "09:00:00", "09:30:00"),
        ];

        let sorted = validate_intervals(date(), &intervals).unwrap();
        let ids: Vec<&str> = sorted.iter().map(|i| i.source_line_id.as_str()).collect();
        assert_eq!(ids, vec!["TCL_1", "TCL_2", "TCL_3"]);
    }

    #[test]
    fn test_empty_day_is_valid() {
        assert!(validate_intervals(date(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_touching_intervals_are_valid() {
        let intervals = vec![
            interval("TCL_1", "08:00:00", "10:00:00"),
            interval("TCL_2", "10:00:00", "12:00:00"),
        ];
        assert!(validate_intervals(date(), &intervals).is_ok());
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        let intervals = vec![interval("TCL_1", "10:00:00", "09:00:00")];
        match validate_intervals(date(), &intervals) {
            Err(EngineError::InvalidInterval { line_id, .. }) => assert_eq!(line_id, "TCL_1"),
            other => panic!("Expected InvalidInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_length_interval_is_rejected() {
        let intervals = vec![interval("TCL_1", "10:00:00", "10:00:00")];
        assert!(matches!(
            validate_intervals(date(), &intervals),
            Err(EngineError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_overlap_is_rejected() {
        let intervals = vec![
            interval("TCL_2", "07:30:00", "09:00:00"),
            interval("TCL_1", "03:00:00", "08:00:00"),
        ];
        match validate_intervals(date(), &intervals) {
            Err(EngineError::OverlappingIntervals { first, second, at }) => {
                assert_eq!(first, "TCL_1");
                assert_eq!(second, "TCL_2");
                assert_eq!(at, make_datetime("2026-05-20 07:30:00"));
            }
            other => panic!("Expected OverlappingIntervals, got {:?}", other),
        }
    }

    #[test]
    fn test_interval_on_other_day_is_rejected() {
        let intervals = vec![ClockInterval {
            source_line_id: "TCL_1".to_string(),
            time_in: make_datetime("2026-05-19 22:00:00"),
            time_out: make_datetime("2026-05-19 23:00:00"),
        }];
        assert!(matches!(
            validate_intervals(date(), &intervals),
            Err(EngineError::IntervalOutsideDay { .. })
        ));
    }

    #[test]
    fn test_interval_past_midnight_is_rejected() {
        let intervals = vec![ClockInterval {
            source_line_id: "TCL_1".to_string(),
            time_in: make_datetime("2026-05-20 22:00:00"),
            time_out: make_datetime("2026-05-21 01:00:00"),
        }];
        assert!(matches!(
            validate_intervals(date(), &intervals),
            Err(EngineError::IntervalOutsideDay { .. })
        ));
    }

    #[test]
    fn test_interval_ending_at_midnight_is_valid() {
        let intervals = vec![ClockInterval {
            source_line_id: "TCL_1".to_string(),
            time_in: make_datetime("2026-05-20 22:00:00"),
            time_out: make_datetime("2026-05-21 00:00:00"),
        }];
        assert!(validate_intervals(date(), &intervals).is_ok());
    }

    #[test]
    fn test_duplicate_line_id_is_rejected() {
        let intervals = vec![
            interval("TCL_1", "03:00:00", "04:00:00"),
            interval("TCL_1", "05:00:00", "06:00:00"),
        ];
        match validate_intervals(date(), &intervals) {
            Err(EngineError::InvalidInterval { message, .. }) => {
                assert!(message.contains("more than once"))
            }
            other => panic!("Expected InvalidInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_line_id_is_rejected() {
        let intervals = vec![interval(" ", "03:00:00", "04:00:00")];
        assert!(matches!(
            validate_intervals(date(), &intervals),
            Err(EngineError::InvalidInterval { .. })
        ));
    }
}
