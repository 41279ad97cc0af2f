//! Rule application result models.
//!
//! This module contains the [`RuleApplication`] type and its associated structures
//! that capture everything produced by one run of the engine over a time card:
//! synthesized entries, the merged line list, per-call summaries, totals and an
//! audit trace.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClockInterval, SynthesizedEntry};

/// A single step in the audit trace recording a rule decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during rule application.
///
/// Warnings indicate conditions that don't stop the run but may need a
/// second look, such as an entry clipped by the next call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of rule steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated along the way.
    pub warnings: Vec<AuditWarning>,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

/// A line on the finished time card, worked or synthesized.
///
/// # Example
///
/// ```
/// use timecard_rules::models::{ClockInterval, TimeCardLine};
/// use chrono::NaiveDateTime;
///
/// let line = TimeCardLine::Worked(ClockInterval {
///     source_line_id: "TCL_1".to_string(),
///     time_in: NaiveDateTime::parse_from_str("2026-05-19 03:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     time_out: NaiveDateTime::parse_from_str("2026-05-19 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// });
/// assert!(line.is_worked());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeCardLine {
    /// A clock interval as entered.
    Worked(ClockInterval),
    /// An entry produced by the engine.
    Unworked(SynthesizedEntry),
}

impl TimeCardLine {
    /// Start of the line.
    pub fn time_in(&self) -> NaiveDateTime {
        match self {
            TimeCardLine::Worked(interval) => interval.time_in,
            TimeCardLine::Unworked(entry) => entry.time_in,
        }
    }

    /// End of the line.
    pub fn time_out(&self) -> NaiveDateTime {
        match self {
            TimeCardLine::Worked(interval) => interval.time_out,
            TimeCardLine::Unworked(entry) => entry.time_out,
        }
    }

    /// True for clock intervals.
    pub fn is_worked(&self) -> bool {
        matches!(self, TimeCardLine::Worked(_))
    }
}

/// Summary of one call (a run of intervals separated only by meals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSummary {
    /// 1-based position of the call within the day.
    pub call_number: u32,
    /// First clock-in of the call.
    pub time_in: NaiveDateTime,
    /// Last clock-out of the call.
    pub time_out: NaiveDateTime,
    /// Worked hours, excluding meal gaps.
    pub worked_hours: Decimal,
    /// Number of meal gaps inside the call.
    pub meal_count: u32,
    /// Source line ids of the call's intervals, in time order.
    pub line_ids: Vec<String>,
}

/// Aggregated hours for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTotals {
    /// Total worked hours on the card.
    pub worked_hours: Decimal,
    /// Unworked hours that count toward billing.
    pub unworked_bill_hours: Decimal,
    /// Unworked hours that count toward payroll.
    pub unworked_pay_hours: Decimal,
    /// Unworked hours from before- and after-meal shortfalls.
    pub meal_shortfall_hours: Decimal,
    /// Unworked hours from minimum-call padding.
    pub minimum_call_hours: Decimal,
}

impl RuleTotals {
    /// Sums worked intervals and synthesized entries.
    pub fn from_lines(intervals: &[ClockInterval], entries: &[SynthesizedEntry]) -> Self {
        let hours_where = |predicate: fn(&SynthesizedEntry) -> bool| -> Decimal {
            entries
                .iter()
                .filter(|e| predicate(e))
                .map(|e| e.hours_unworked)
                .sum()
        };

        Self {
            worked_hours: intervals.iter().map(ClockInterval::worked_hours).sum(),
            unworked_bill_hours: hours_where(|e| e.is_bill),
            unworked_pay_hours: hours_where(|e| e.is_pay),
            meal_shortfall_hours: hours_where(|e| !e.is_minimum_call),
            minimum_call_hours: hours_where(|e| e.is_minimum_call),
        }
    }
}

/// The complete result of applying contract rules to a time card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleApplication {
    /// Unique identifier for this run.
    pub application_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The time card the rules were applied to.
    pub time_card_id: String,
    /// The contract whose rules were applied.
    pub contract_id: String,
    /// The calls the day was segmented into.
    pub calls: Vec<CallSummary>,
    /// The synthesized entries that replaced any previous set.
    pub entries: Vec<SynthesizedEntry>,
    /// Worked and synthesized lines in time order.
    pub lines: Vec<TimeCardLine>,
    /// Aggregated hours.
    pub totals: RuleTotals,
    /// Complete audit trace of rule decisions.
    pub audit_trace: AuditTrace,
}
