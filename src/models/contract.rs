//! Contract rule model.
//!
//! A contract carries the meal-break and minimum-call thresholds the engine
//! enforces. Contracts are read-only inputs, usually loaded from YAML.

use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::hours::duration_from_hours;

/// Largest value any hour threshold may take.
pub const MAX_THRESHOLD_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

fn default_meal_break_max() -> Decimal {
    MAX_THRESHOLD_HOURS
}

fn default_true() -> bool {
    true
}

/// Meal-break and minimum-call thresholds for a contract.
///
/// Unset thresholds deserialize to zero, which switches the matching rule
/// off. `hours_meal_break_max` instead defaults to 24 hours so that, unless
/// a contract says otherwise, every gap inside a day is a meal.
///
/// # Example
///
/// ```
/// use timecard_rules::models::ContractRules;
/// use rust_decimal::Decimal;
///
/// let rules: ContractRules = serde_yaml::from_str(r#"
/// id: CTR_001
/// hours_after_unpaid_meal: "2"
/// "#).unwrap();
///
/// assert_eq!(rules.hours_before_unpaid_meal, Decimal::ZERO);
/// assert_eq!(rules.hours_meal_break_max, Decimal::from(24));
/// assert!(rules.before_meal_minimum().is_none());
/// assert!(rules.after_meal_minimum().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRules {
    /// Contract identifier.
    pub id: String,
    /// Human-readable contract name.
    #[serde(default)]
    pub name: String,
    /// Worked hours required before an unpaid meal.
    #[serde(default)]
    pub hours_before_unpaid_meal: Decimal,
    /// Worked hours required after an unpaid meal.
    #[serde(default)]
    pub hours_after_unpaid_meal: Decimal,
    /// Longest gap that still counts as a meal; longer gaps start a new call.
    #[serde(default = "default_meal_break_max")]
    pub hours_meal_break_max: Decimal,
    /// Minimum paid hours per call.
    #[serde(default)]
    pub hours_minimum_call: Decimal,
    /// Whether minimum-call padding counts as worked time (billed as well as paid).
    #[serde(default)]
    pub minimums_are_worked_time: bool,
    /// Whether meal shortfalls are paid as well as billed.
    #[serde(default = "default_true")]
    pub meal_shortfalls_are_paid: bool,
}

impl ContractRules {
    /// Creates a contract with every rule switched off.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            hours_before_unpaid_meal: Decimal::ZERO,
            hours_after_unpaid_meal: Decimal::ZERO,
            hours_meal_break_max: MAX_THRESHOLD_HOURS,
            hours_minimum_call: Decimal::ZERO,
            minimums_are_worked_time: false,
            meal_shortfalls_are_paid: true,
        }
    }

    /// Checks that every threshold lies within `0..=24` hours.
    ///
    /// A nonzero threshold shorter than half a second would round to zero and
    /// silently switch its rule off, so it is rejected too.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("hours_before_unpaid_meal", self.hours_before_unpaid_meal),
            ("hours_after_unpaid_meal", self.hours_after_unpaid_meal),
            ("hours_meal_break_max", self.hours_meal_break_max),
            ("hours_minimum_call", self.hours_minimum_call),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO || value > MAX_THRESHOLD_HOURS {
                return Err(EngineError::InvalidContract {
                    contract_id: self.id.clone(),
                    message: format!(
                        "{} must be between 0 and {} hours, got {}",
                        field, MAX_THRESHOLD_HOURS, value
                    ),
                });
            }
            if value > Decimal::ZERO && duration_from_hours(value) == TimeDelta::zero() {
                return Err(EngineError::InvalidContract {
                    contract_id: self.id.clone(),
                    message: format!(
                        "{} of {} hours rounds to zero seconds",
                        field, value
                    ),
                });
            }
        }

        Ok(())
    }

    /// Longest gap classified as a meal.
    pub fn meal_break_max(&self) -> TimeDelta {
        duration_from_hours(self.hours_meal_break_max.max(Decimal::ZERO))
    }

    /// Required work before a meal, or `None` when the rule is off.
    pub fn before_meal_minimum(&self) -> Option<TimeDelta> {
        enabled_threshold(self.hours_before_unpaid_meal)
    }

    /// Required work after a meal, or `None` when the rule is off.
    pub fn after_meal_minimum(&self) -> Option<TimeDelta> {
        enabled_threshold(self.hours_after_unpaid_meal)
    }

    /// Minimum paid time per call, or `None` when the rule is off.
    pub fn minimum_call(&self) -> Option<TimeDelta> {
        enabled_threshold(self.hours_minimum_call)
    }
}

fn enabled_threshold(hours: Decimal) -> Option<TimeDelta> {
    let duration = duration_from_hours(hours);
    (duration > TimeDelta::zero()).then_some(duration)
}
