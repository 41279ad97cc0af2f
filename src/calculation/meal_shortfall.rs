//! Meal shortfall calculation.
//!
//! For every meal gap inside a call, the contract can require a minimum amount
//! of work before the meal and a minimum amount after it. When the worker falls
//! short, the missing time is owed as unworked time.
//!
//! The after-meal side is scoped to the single worked run that follows the
//! meal: it ends at the next meal or at the end of the call, so a later call
//! never changes what an earlier meal is owed.

use chrono::{NaiveDateTime, TimeDelta};

use crate::models::{AuditStep, ClockInterval, ContractRules, ShortfallKind, hours_from_duration};

use super::placement::Shortfall;

/// A meal gap and the work around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealGap<'a> {
    /// The call the meal belongs to.
    pub call_number: u32,
    /// 1-based position of the meal within its call.
    pub meal_number: u32,
    /// Work in the call before the meal, across all earlier runs.
    pub worked_before: TimeDelta,
    /// Work in the run directly after the meal.
    pub worked_after: TimeDelta,
    /// The interval ending where the meal starts.
    pub last_before: &'a ClockInterval,
    /// The interval ending the run after the meal.
    pub last_after: &'a ClockInterval,
    /// Where the meal ends (first clock-in after it).
    pub meal_end: NaiveDateTime,
}

impl MealGap<'_> {
    /// Where the meal starts.
    pub fn meal_start(&self) -> NaiveDateTime {
        self.last_before.time_out
    }
}

/// The outcome of evaluating one meal gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealShortfallResult {
    /// Time owed because too little was worked before the meal.
    pub before_meal: Option<Shortfall>,
    /// Time owed because too little was worked after the meal.
    pub after_meal: Option<Shortfall>,
    /// The audit step recording the evaluation.
    pub audit_step: AuditStep,
}

/// Evaluates the before- and after-meal minimums for one meal gap.
///
/// A rule whose threshold is zero or unset never produces a shortfall, and a
/// threshold that is met or exceeded produces nothing (there is no negative
/// shortfall). Both shortfalls are billed; they are paid when the contract's
/// `meal_shortfalls_are_paid` is set.
///
/// The before-meal shortfall is anchored at the start of the meal and the
/// after-meal shortfall at the end of the run that follows it.
///
/// # Example
///
/// ```
/// use timecard_rules::calculation::{calculate_meal_shortfall, MealGap};
/// use timecard_rules::models::{ClockInterval, ContractRules};
/// use chrono::{NaiveDateTime, TimeDelta};
/// use rust_decimal::Decimal;
///
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let morning = ClockInterval { source_line_id: "1".into(), time_in: dt("2026-05-19 03:00:00"), time_out: dt("2026-05-19 08:00:00") };
/// let after = ClockInterval { source_line_id: "2".into(), time_in: dt("2026-05-19 09:00:00"), time_out: dt("2026-05-19 09:30:00") };
/// let rules = ContractRules {
///     hours_before_unpaid_meal: Decimal::from(5),
///     hours_after_unpaid_meal: Decimal::from(2),
///     ..ContractRules::new("CTR")
/// };
///
/// let result = calculate_meal_shortfall(
///     &MealGap {
///         call_number: 1,
///         meal_number: 1,
///         worked_before: morning.worked(),
///         worked_after: after.worked(),
///         last_before: &morning,
///         last_after: &after,
///         meal_end: after.time_in,
///     },
///     &rules,
///     1,
/// );
///
/// assert!(result.before_meal.is_none());
/// let after_meal = result.after_meal.unwrap();
/// assert_eq!(after_meal.anchor, dt("2026-05-19 09:30:00"));
/// assert_eq!(after_meal.owed, TimeDelta::minutes(90));
/// ```
pub fn calculate_meal_shortfall(
    gap: &MealGap<'_>,
    rules: &ContractRules,
    step_number: u32,
) -> MealShortfallResult {
    let before_owed = owed(rules.before_meal_minimum(), gap.worked_before);
    let after_owed = owed(rules.after_meal_minimum(), gap.worked_after);

    let make = |kind: ShortfallKind, anchor: NaiveDateTime, owed: TimeDelta, line: &ClockInterval| {
        Shortfall {
            kind,
            anchor,
            owed,
            is_bill: true,
            is_pay: rules.meal_shortfalls_are_paid,
            origin_line_id: Some(line.source_line_id.clone()),
        }
    };

    let before_meal = before_owed.map(|owed| {
        make(
            ShortfallKind::BeforeUnpaidMeal,
            gap.meal_start(),
            owed,
            gap.last_before,
        )
    });
    let after_meal = after_owed.map(|owed| {
        make(
            ShortfallKind::AfterUnpaidMeal,
            gap.last_after.time_out,
            owed,
            gap.last_after,
        )
    });

    let reasoning = format!(
        "Meal {} of call {} ({} to {}): {}; {}",
        gap.meal_number,
        gap.call_number,
        gap.meal_start().format("%H:%M:%S"),
        gap.meal_end.format("%H:%M:%S"),
        describe_side("before", rules.before_meal_minimum(), gap.worked_before),
        describe_side("after", rules.after_meal_minimum(), gap.worked_after),
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "meal_shortfall".to_string(),
        rule_name: "Meal Shortfall".to_string(),
        input: serde_json::json!({
            "call_number": gap.call_number,
            "meal_number": gap.meal_number,
            "meal_start": gap.meal_start().to_string(),
            "meal_end": gap.meal_end.to_string(),
            "worked_before_hours": hours_from_duration(gap.worked_before).to_string(),
            "worked_after_hours": hours_from_duration(gap.worked_after).to_string(),
            "hours_before_unpaid_meal": rules.hours_before_unpaid_meal.normalize().to_string(),
            "hours_after_unpaid_meal": rules.hours_after_unpaid_meal.normalize().to_string()
        }),
        output: serde_json::json!({
            "before_meal_shortfall_hours": before_owed.map(|d| hours_from_duration(d).to_string()),
            "after_meal_shortfall_hours": after_owed.map(|d| hours_from_duration(d).to_string())
        }),
        reasoning,
    };

    MealShortfallResult {
        before_meal,
        after_meal,
        audit_step,
    }
}

fn owed(required: Option<TimeDelta>, worked: TimeDelta) -> Option<TimeDelta> {
    required
        .filter(|required| worked < *required)
        .map(|required| required - worked)
}

fn describe_side(side: &str, required: Option<TimeDelta>, worked: TimeDelta) -> String {
    match required {
        None => format!("no {}-meal minimum", side),
        Some(required) if worked >= required => format!(
            "{} hours worked {} meal meets {} hour minimum",
            hours_from_duration(worked),
            side,
            hours_from_duration(required)
        ),
        Some(required) => format!(
            "{} hours worked {} meal is {} hours short of {} hour minimum",
            hours_from_duration(worked),
            side,
            hours_from_duration(required - worked),
            hours_from_duration(required)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2026-05-19 {}", s), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn interval(id: &str, time_in: &str, time_out: &str) -> ClockInterval {
        ClockInterval {
            source_line_id: id.to_string(),
            time_in: dt(time_in),
            time_out: dt(time_out),
        }
    }

    fn rules(before: &str, after: &str) -> ContractRules {
        ContractRules {
            hours_before_unpaid_meal: dec(before),
            hours_after_unpaid_meal: dec(after),
            hours_meal_break_max: dec("2"),
            ..ContractRules::new("CTR_TEST")
        }
    }

    fn gap<'a>(before: &'a ClockInterval, after: &'a ClockInterval) -> MealGap<'a> {
        MealGap {
            call_number: 1,
            meal_number: 1,
            worked_before: before.worked(),
            worked_after: after.worked(),
            last_before: before,
            last_after: after,
            meal_end: after.time_in,
        }
    }

    // ==========================================================================
    // MS-001: 5 h before, 0.5 h after, minimums 5/2 -> after-meal only
    // ==========================================================================
    #[test]
    fn test_ms_001_after_meal_shortfall_only() {
        let before = interval("TCL_1", "03:00:00", "08:00:00");
        let after = interval("TCL_2", "09:00:00", "09:30:00");

        let result = calculate_meal_shortfall(&gap(&before, &after), &rules("5", "2"), 1);

        assert!(result.before_meal.is_none());
        let after_meal = result.after_meal.unwrap();
        assert_eq!(after_meal.kind, ShortfallKind::AfterUnpaidMeal);
        assert_eq!(after_meal.anchor, dt("09:30:00"));
        assert_eq!(after_meal.owed, TimeDelta::minutes(90));
        assert!(after_meal.is_bill);
        assert!(after_meal.is_pay);
        assert_eq!(after_meal.origin_line_id.as_deref(), Some("TCL_2"));
    }

    // ==========================================================================
    // MS-002: short on both sides
    // ==========================================================================
    #[test]
    fn test_ms_002_both_sides_short() {
        let before = interval("TCL_1", "06:00:00", "08:00:00");
        let after = interval("TCL_2", "09:00:00", "10:00:00");

        let result = calculate_meal_shortfall(&gap(&before, &after), &rules("3", "2"), 4);

        let before_meal = result.before_meal.unwrap();
        assert_eq!(before_meal.kind, ShortfallKind::BeforeUnpaidMeal);
        assert_eq!(before_meal.anchor, dt("08:00:00"));
        assert_eq!(before_meal.owed, TimeDelta::hours(1));
        assert_eq!(before_meal.origin_line_id.as_deref(), Some("TCL_1"));

        let after_meal = result.after_meal.unwrap();
        assert_eq!(after_meal.anchor, dt("10:00:00"));
        assert_eq!(after_meal.owed, TimeDelta::hours(1));
        assert_eq!(result.audit_step.step_number, 4);
    }

    // ==========================================================================
    // MS-003: thresholds met exactly -> nothing owed
    // ==========================================================================
    #[test]
    fn test_ms_003_thresholds_met_exactly() {
        let before = interval("TCL_1", "03:00:00", "08:00:00");
        let after = interval("TCL_2", "09:00:00", "11:00:00");

        let result = calculate_meal_shortfall(&gap(&before, &after), &rules("5", "2"), 1);

        assert!(result.before_meal.is_none());
        assert!(result.after_meal.is_none());
        assert!(result.audit_step.reasoning.contains("meets"));
    }

    // ==========================================================================
    // MS-004: zero thresholds switch the rule off
    // ==========================================================================
    #[test]
    fn test_ms_004_zero_thresholds_never_produce_entries() {
        let before = interval("TCL_1", "07:00:00", "07:15:00");
        let after = interval("TCL_2", "08:00:00", "08:15:00");

        let result = calculate_meal_shortfall(&gap(&before, &after), &rules("0", "0"), 1);

        assert!(result.before_meal.is_none());
        assert!(result.after_meal.is_none());
        assert!(result.audit_step.reasoning.contains("no before-meal minimum"));
        assert!(result.audit_step.output["before_meal_shortfall_hours"].is_null());
    }

    #[test]
    fn test_unpaid_meal_shortfall_policy() {
        let before = interval("TCL_1", "06:00:00", "07:00:00");
        let after = interval("TCL_2", "08:00:00", "08:30:00");
        let rules = ContractRules {
            meal_shortfalls_are_paid: false,
            ..rules("2", "2")
        };

        let result = calculate_meal_shortfall(&gap(&before, &after), &rules, 1);

        let before_meal = result.before_meal.unwrap();
        assert!(before_meal.is_bill);
        assert!(!before_meal.is_pay);
        assert!(!result.after_meal.unwrap().is_pay);
    }

    #[test]
    fn test_worked_before_spans_earlier_runs() {
        // Second meal of a call: 2 h + 1 h already worked before it.
        let before = interval("TCL_2", "09:00:00", "10:00:00");
        let after = interval("TCL_3", "11:00:00", "13:00:00");
        let meal = MealGap {
            meal_number: 2,
            worked_before: TimeDelta::hours(3),
            ..gap(&before, &after)
        };

        let result = calculate_meal_shortfall(&meal, &rules("4", "2"), 1);

        assert_eq!(result.before_meal.unwrap().owed, TimeDelta::hours(1));
        assert!(result.after_meal.is_none());
        assert_eq!(result.audit_step.input["meal_number"], 2);
    }

    #[test]
    fn test_audit_step_contents() {
        let before = interval("TCL_1", "03:00:00", "08:00:00");
        let after = interval("TCL_2", "09:00:00", "09:30:00");

        let result = calculate_meal_shortfall(&gap(&before, &after), &rules("5", "2"), 3);

        assert_eq!(result.audit_step.rule_id, "meal_shortfall");
        assert_eq!(result.audit_step.rule_name, "Meal Shortfall");
        assert_eq!(
            result.audit_step.input["worked_after_hours"].as_str().unwrap(),
            "0.5"
        );
        assert_eq!(
            result.audit_step.output["after_meal_shortfall_hours"]
                .as_str()
                .unwrap(),
            "1.5"
        );
        assert!(result.audit_step.reasoning.contains("short"));
    }
}
