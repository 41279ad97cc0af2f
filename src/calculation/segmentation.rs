//! Call segmentation.
//!
//! Slices a sorted day of clock intervals into immutable calls, and each call
//! into worked runs. A run is a maximal stretch of back-to-back intervals;
//! runs inside a call are separated by meals, and calls are separated by
//! gaps longer than the maximum meal break. Nothing is mutated in place: every
//! [`Call`] and [`WorkedRun`] borrows a sub-slice of the input.

use chrono::{NaiveDateTime, TimeDelta};

use crate::models::ClockInterval;

use super::gap_classifier::{GapKind, classify_gap};

/// A maximal run of touching worked intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkedRun<'a> {
    intervals: &'a [ClockInterval],
}

impl<'a> WorkedRun<'a> {
    /// The run's intervals in time order. Never empty.
    pub fn intervals(&self) -> &'a [ClockInterval] {
        self.intervals
    }

    /// First clock-in of the run.
    pub fn start(&self) -> NaiveDateTime {
        self.intervals[0].time_in
    }

    /// Last clock-out of the run.
    pub fn end(&self) -> NaiveDateTime {
        self.last().time_out
    }

    /// The interval the run ends with.
    pub fn last(&self) -> &'a ClockInterval {
        &self.intervals[self.intervals.len() - 1]
    }

    /// Worked time in the run.
    pub fn worked(&self) -> TimeDelta {
        self.intervals
            .iter()
            .fold(TimeDelta::zero(), |total, i| total + i.worked())
    }
}

/// A call: worked runs separated only by meal gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    number: u32,
    intervals: &'a [ClockInterval],
    runs: Vec<WorkedRun<'a>>,
}

impl<'a> Call<'a> {
    /// 1-based position of the call within the day.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// All intervals of the call in time order. Never empty.
    pub fn intervals(&self) -> &'a [ClockInterval] {
        self.intervals
    }

    /// The call's worked runs. There is one more run than there are meals.
    pub fn runs(&self) -> &[WorkedRun<'a>] {
        &self.runs
    }

    /// Number of meal gaps inside the call.
    pub fn meal_count(&self) -> usize {
        self.runs.len() - 1
    }

    /// First clock-in of the call.
    pub fn start(&self) -> NaiveDateTime {
        self.intervals[0].time_in
    }

    /// Last clock-out of the call.
    pub fn end(&self) -> NaiveDateTime {
        self.last().time_out
    }

    /// The interval the call ends with.
    pub fn last(&self) -> &'a ClockInterval {
        &self.intervals[self.intervals.len() - 1]
    }

    /// Worked time in the call, excluding meal gaps.
    pub fn worked(&self) -> TimeDelta {
        self.runs
            .iter()
            .fold(TimeDelta::zero(), |total, run| total + run.worked())
    }
}

/// Splits sorted, non-overlapping intervals into calls.
///
/// Runs in a single pass over the intervals.
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::segment_calls;
/// use timecard_rules::models::ClockInterval;
/// use chrono::{NaiveDateTime, TimeDelta};
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let intervals = vec![
///     ClockInterval { source_line_id: "1".into(), time_in: dt("2026-05-20 03:00:00"), time_out: dt("2026-05-20 08:00:00") },
///     ClockInterval { source_line_id: "2".into(), time_in: dt("2026-05-20 09:00:00"), time_out: dt("2026-05-20 09:30:00") },
///     ClockInterval { source_line_id: "3".into(), time_in: dt("2026-05-20 20:45:00"), time_out: dt("2026-05-20 23:45:00") },
/// ];
///
/// let calls = segment_calls(&intervals, TimeDelta::hours(2));
/// assert_eq!(calls.len(), 2);
/// assert_eq!(calls[0].meal_count(), 1);
/// assert_eq!(calls[1].worked(), TimeDelta::hours(3));
/// ```
pub fn segment_calls(sorted: &[ClockInterval], meal_break_max: TimeDelta) -> Vec<Call<'_>> {
    let mut calls = Vec::new();
    if sorted.is_empty() {
        return calls;
    }

    let mut call_start = 0;
    let mut run_start = 0;
    let mut runs = Vec::new();

    for i in 1..sorted.len() {
        match classify_gap(&sorted[i - 1], &sorted[i], meal_break_max) {
            GapKind::Continuity => {}
            GapKind::Meal => {
                runs.push(WorkedRun {
                    intervals: &sorted[run_start..i],
                });
                run_start = i;
            }
            GapKind::NewCall => {
                runs.push(WorkedRun {
                    intervals: &sorted[run_start..i],
                });
                calls.push(Call {
                    number: calls.len() as u32 + 1,
                    intervals: &sorted[call_start..i],
                    runs: std::mem::take(&mut runs),
                });
                call_start = i;
                run_start = i;
            }
        }
    }

    runs.push(WorkedRun {
        intervals: &sorted[run_start..],
    });
    calls.push(Call {
        number: calls.len() as u32 + 1,
        intervals: &sorted[call_start..],
        runs,
    });

    calls
}
