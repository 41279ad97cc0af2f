//! Minimum call calculation.
//!
//! A call whose worked time falls short of the contract's minimum is padded
//! with unworked time at its end. Meal gaps inside the call do not count
//! toward the minimum.

use crate::models::{AuditStep, ContractRules, ShortfallKind, hours_from_duration};

use super::placement::Shortfall;
use super::segmentation::Call;

/// The outcome of evaluating one call against the minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumCallResult {
    /// The padding owed, if any.
    pub shortfall: Option<Shortfall>,
    /// The audit step recording the evaluation.
    pub audit_step: AuditStep,
}

/// Evaluates a call against the contract's minimum call.
///
/// The padding is anchored at the call's last clock-out and is always paid.
/// It is billed only when the contract treats minimums as worked time.
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::{calculate_minimum_call, segment_calls};
/// use timecard_rules::models::{ClockInterval, ContractRules};
/// use chrono::{NaiveDateTime, TimeDelta};
/// use rust_decimal::Decimal;
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let intervals = vec![ClockInterval {
///     source_line_id: "1".into(),
///     time_in: dt("2026-05-19 20:45:00"),
///     time_out: dt("2026-05-19 23:45:00"),
/// }];
/// let rules = ContractRules {
///     hours_minimum_call: Decimal::from(4),
///     ..ContractRules::new("CTR")
/// };
///
/// let calls = segment_calls(&intervals, rules.meal_break_max());
/// let result = calculate_minimum_call(&calls[0], &rules, 1);
///
/// let shortfall = result.shortfall.unwrap();
/// assert_eq!(shortfall.owed, TimeDelta::hours(1));
/// assert!(shortfall.is_pay);
/// assert!(!shortfall.is_bill);
/// ```
pub fn calculate_minimum_call(
    call: &Call<'_>,
    rules: &ContractRules,
    step_number: u32,
) -> MinimumCallResult {
    let worked = call.worked();
    let minimum = rules.minimum_call();
    let owed = minimum
        .filter(|minimum| worked < *minimum)
        .map(|minimum| minimum - worked);

    let shortfall = owed.map(|owed| Shortfall {
        kind: ShortfallKind::MinimumCall,
        anchor: call.end(),
        owed,
        is_bill: rules.minimums_are_worked_time,
        is_pay: true,
        origin_line_id: Some(call.last().source_line_id.clone()),
    });

    let reasoning = match (minimum, owed) {
        (None, _) => format!("Call {}: no minimum call configured", call.number()),
        (Some(minimum), None) => format!(
            "Call {}: {} worked hours meets {} hour minimum",
            call.number(),
            hours_from_duration(worked),
            hours_from_duration(minimum)
        ),
        (Some(minimum), Some(owed)) => format!(
            "Call {}: {} worked hours is {} hours short of {} hour minimum, padded from {}",
            call.number(),
            hours_from_duration(worked),
            hours_from_duration(owed),
            hours_from_duration(minimum),
            call.end().format("%H:%M:%S")
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "minimum_call".to_string(),
        rule_name: "Minimum Call".to_string(),
        input: serde_json::json!({
            "call_number": call.number(),
            "call_start": call.start().to_string(),
            "call_end": call.end().to_string(),
            "worked_hours": hours_from_duration(worked).to_string(),
            "hours_minimum_call": rules.hours_minimum_call.normalize().to_string(),
            "minimums_are_worked_time": rules.minimums_are_worked_time
        }),
        output: serde_json::json!({
            "minimum_call_hours": owed.map(|d| hours_from_duration(d).to_string())
        }),
        reasoning,
    };

    MinimumCallResult {
        shortfall,
        audit_step,
    }
}
