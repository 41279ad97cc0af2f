//! Synthesized unworked entries.
//!
//! These are the bookkeeping lines the engine produces: payable time that
//! was not worked because a meal-break or minimum-call guarantee was missed.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::hours::{duration_from_hours, format_hms};

/// The rule that produced a synthesized entry.
///
/// # Example
///
/// ```
/// use timecard_rules::models::ShortfallKind;
///
/// assert_eq!(ShortfallKind::AfterUnpaidMeal.note_rule(), "After unpaid meal minimum");
/// assert!(ShortfallKind::MinimumCall.is_minimum_call());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallKind {
    /// Not enough work before an unpaid meal.
    BeforeUnpaidMeal,
    /// Not enough work after an unpaid meal.
    AfterUnpaidMeal,
    /// A call shorter than the contract's minimum call.
    MinimumCall,
}

impl ShortfallKind {
    /// Human-readable tag stored on the entry.
    pub fn note_rule(self) -> &'static str {
        match self {
            ShortfallKind::BeforeUnpaidMeal => "Before unpaid meal minimum",
            ShortfallKind::AfterUnpaidMeal => "After unpaid meal minimum",
            ShortfallKind::MinimumCall => "Minimum call",
        }
    }

    /// True only for entries produced by the call minimum.
    pub fn is_minimum_call(self) -> bool {
        matches!(self, ShortfallKind::MinimumCall)
    }
}

impl std::fmt::Display for ShortfallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.note_rule())
    }
}

/// An unworked, payable entry on a time card.
///
/// Synthesized entries have no worked duration. `hours_unworked` is the
/// amount owed; `time_in`/`time_out` place the entry on the day's timeline
/// and may be shorter than `hours_unworked` when the next worked interval
/// starts before the owed time runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedEntry {
    /// Where the entry starts.
    pub time_in: NaiveDateTime,
    /// Where the entry ends.
    pub time_out: NaiveDateTime,
    /// Unworked hours owed.
    pub hours_unworked: Decimal,
    /// Counts toward billing.
    pub is_bill: bool,
    /// Counts toward payroll.
    pub is_pay: bool,
    /// Produced by the call minimum rather than a meal rule.
    pub is_minimum_call: bool,
    /// Which rule produced the entry.
    pub rule: ShortfallKind,
    /// Human-readable rule tag.
    pub note_rule: String,
    /// The worked line that triggered the entry.
    pub origin_line_id: Option<String>,
}

impl SynthesizedEntry {
    /// Returns `hours_unworked` formatted as `HH:MM:SS`.
    ///
    /// # Example
    ///
    /// ```
    /// use timecard_rules::models::{ShortfallKind, SynthesizedEntry};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = SynthesizedEntry {
    ///     time_in: NaiveDateTime::parse_from_str("2026-05-19 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     time_out: NaiveDateTime::parse_from_str("2026-05-19 11:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     hours_unworked: Decimal::new(15, 1),
    ///     is_bill: true,
    ///     is_pay: true,
    ///     is_minimum_call: false,
    ///     rule: ShortfallKind::AfterUnpaidMeal,
    ///     note_rule: ShortfallKind::AfterUnpaidMeal.note_rule().to_string(),
    ///     origin_line_id: Some("TCL_2".to_string()),
    /// };
    /// assert_eq!(entry.hours_unworked_hms(), "01:30:00");
    /// ```
    pub fn hours_unworked_hms(&self) -> String {
        format_hms(duration_from_hours(self.hours_unworked))
    }
}
