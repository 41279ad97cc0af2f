//! Day evaluation.
//!
//! Runs every rule over one day of clock intervals: validation, call
//! segmentation, meal shortfalls, minimum call, and placement of the
//! resulting entries. The result is a pure function of the intervals and the
//! contract, so running it twice yields the same entries.

use chrono::{NaiveDate, TimeDelta};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, CallSummary, ClockInterval, ContractRules, RuleTotals,
    SynthesizedEntry, TimeCardLine, hours_from_duration,
};

use super::meal_shortfall::{MealGap, calculate_meal_shortfall};
use super::minimum_call::calculate_minimum_call;
use super::placement::{EntryPlacer, Shortfall};
use super::segmentation::{Call, segment_calls};
use super::validation::validate_intervals;

/// Warning code raised when an entry is cut short by the next worked interval.
pub const ENTRY_CLIPPED: &str = "ENTRY_CLIPPED";

/// Everything the rules produce for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEvaluation {
    /// One summary per call, in time order.
    pub calls: Vec<CallSummary>,
    /// Synthesized entries in placement order.
    pub entries: Vec<SynthesizedEntry>,
    /// Worked intervals and entries merged in time order.
    pub lines: Vec<TimeCardLine>,
    /// Aggregated hours.
    pub totals: RuleTotals,
    /// Rule decisions, numbered from 1.
    pub steps: Vec<AuditStep>,
    /// Non-fatal conditions met along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Applies the contract's rules to one day of clock intervals.
///
/// Intervals may be given in any order. Calls are evaluated in time order and
/// each call only sees its own intervals, so adding a later call never changes
/// what an earlier one is owed.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidContract`] when a threshold is
/// out of range, and the validation errors of
/// [`validate_intervals`](crate::calculation::validate_intervals) for malformed intervals.
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::evaluate_day;
/// use timecard_rules::models::{ClockInterval, ContractRules};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 5, 19).unwrap();
/// let intervals = vec![
///     ClockInterval { source_line_id: "1".into(), time_in: dt("2026-05-19 03:00:00"), time_out: dt("2026-05-19 08:00:00") },
///     ClockInterval { source_line_id: "2".into(), time_in: dt("2026-05-19 09:00:00"), time_out: dt("2026-05-19 09:30:00") },
///     ClockInterval { source_line_id: "3".into(), time_in: dt("2026-05-19 20:45:00"), time_out: dt("2026-05-19 23:45:00") },
/// ];
/// let rules = ContractRules {
///     hours_before_unpaid_meal: Decimal::from(5),
///     hours_after_unpaid_meal: Decimal::from(2),
///     hours_meal_break_max: Decimal::from(2),
///     ..ContractRules::new("CTR")
/// };
///
/// let day = evaluate_day(date, &intervals, &rules).unwrap();
/// assert_eq!(day.calls.len(), 2);
/// assert_eq!(day.entries.len(), 1);
/// assert_eq!(day.entries[0].time_in, dt("2026-05-19 09:30:00"));
/// assert_eq!(day.entries[0].hours_unworked, Decimal::new(15, 1));
/// ```
pub fn evaluate_day(
    date: NaiveDate,
    intervals: &[ClockInterval],
    rules: &ContractRules,
) -> EngineResult<DayEvaluation> {
    rules.validate()?;
    let sorted = validate_intervals(date, intervals)?;

    let calls = segment_calls(&sorted, rules.meal_break_max());
    let mut steps = vec![segmentation_step(&sorted, &calls, rules)];
    let mut step_number: u32 = 2;

    debug!(
        contract_id = %rules.id,
        date = %date,
        intervals = sorted.len(),
        calls = calls.len(),
        "Segmented day into calls"
    );

    let mut placer = EntryPlacer::new();
    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    for (index, call) in calls.iter().enumerate() {
        let next_call_start = calls.get(index + 1).map(Call::start);
        let runs = call.runs();
        let mut worked_so_far = TimeDelta::zero();
        let mut pending_after: Option<Shortfall> = None;

        for (k, run) in runs.iter().enumerate() {
            worked_so_far += run.worked();
            let next_run = runs.get(k + 1);
            let limit = next_run.map(|r| r.start()).or(next_call_start);

            // Every shortfall due here is anchored at the end of this run.
            let mut due: Vec<Shortfall> = pending_after.take().into_iter().collect();

            match next_run {
                Some(next_run) => {
                    let gap = MealGap {
                        call_number: call.number(),
                        meal_number: k as u32 + 1,
                        worked_before: worked_so_far,
                        worked_after: next_run.worked(),
                        last_before: run.last(),
                        last_after: next_run.last(),
                        meal_end: next_run.start(),
                    };
                    let result = calculate_meal_shortfall(&gap, rules, step_number);
                    steps.push(result.audit_step);
                    step_number += 1;

                    due.extend(result.before_meal);
                    pending_after = result.after_meal;
                }
                None => {
                    let result = calculate_minimum_call(call, rules, step_number);
                    steps.push(result.audit_step);
                    step_number += 1;

                    due.extend(result.shortfall);
                }
            }

            for shortfall in due {
                let placement = placer.place(shortfall, limit);
                if placement.clipped {
                    warnings.push(clipped_warning(&placement.entry));
                }
                debug!(
                    rule = %placement.entry.rule,
                    time_in = %placement.entry.time_in,
                    hours = %placement.entry.hours_unworked,
                    clipped = placement.clipped,
                    "Placed unworked entry"
                );
                entries.push(placement.entry);
            }
        }
    }

    let summaries = calls.iter().map(summarize_call).collect();
    let totals = RuleTotals::from_lines(&sorted, &entries);
    let lines = merge_lines(&sorted, &entries);

    Ok(DayEvaluation {
        calls: summaries,
        entries,
        lines,
        totals,
        steps,
        warnings,
    })
}

/// Merges worked intervals and entries into a single time-ordered list.
///
/// An entry starting at the same instant as a worked interval is listed
/// first, since it can only be a zero-length entry belonging before it.
pub fn merge_lines(sorted: &[ClockInterval], entries: &[SynthesizedEntry]) -> Vec<TimeCardLine> {
    let mut lines: Vec<TimeCardLine> = sorted
        .iter()
        .cloned()
        .map(TimeCardLine::Worked)
        .chain(entries.iter().cloned().map(TimeCardLine::Unworked))
        .collect();
    lines.sort_by_key(|line| (line.time_in(), line.is_worked()));
    lines
}

fn summarize_call(call: &Call<'_>) -> CallSummary {
    CallSummary {
        call_number: call.number(),
        time_in: call.start(),
        time_out: call.end(),
        worked_hours: hours_from_duration(call.worked()),
        meal_count: call.meal_count() as u32,
        line_ids: call
            .intervals()
            .iter()
            .map(|i| i.source_line_id.clone())
            .collect(),
    }
}

fn segmentation_step(sorted: &[ClockInterval], calls: &[Call<'_>], rules: &ContractRules) -> AuditStep {
    let meals: usize = calls.iter().map(Call::meal_count).sum();

    AuditStep {
        step_number: 1,
        rule_id: "call_segmentation".to_string(),
        rule_name: "Call Segmentation".to_string(),
        input: serde_json::json!({
            "interval_count": sorted.len(),
            "hours_meal_break_max": rules.hours_meal_break_max.normalize().to_string()
        }),
        output: serde_json::json!({
            "call_count": calls.len(),
            "calls": calls.iter().map(|c| serde_json::json!({
                "call_number": c.number(),
                "time_in": c.start().to_string(),
                "time_out": c.end().to_string(),
                "meal_count": c.meal_count()
            })).collect::<Vec<_>>()
        }),
        reasoning: format!(
            "{} intervals form {} call(s) with {} meal(s); gaps over {} hours start a new call",
            sorted.len(),
            calls.len(),
            meals,
            rules.hours_meal_break_max.normalize()
        ),
    }
}

fn clipped_warning(entry: &SynthesizedEntry) -> AuditWarning {
    AuditWarning {
        code: ENTRY_CLIPPED.to_string(),
        message: format!(
            "{} entry of {} hours starting {} was cut short at {} by the next worked interval",
            entry.note_rule, entry.hours_unworked, entry.time_in, entry.time_out
        ),
        severity: "low".to_string(),
    }
}
