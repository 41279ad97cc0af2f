//! Calculation logic for the time card rule engine.
//!
//! This module contains the rule functions applied to one worker's day:
//! interval validation, gap classification, call segmentation, before- and
//! after-meal shortfalls, minimum call padding, entry placement, and the
//! day evaluation that ties them together.

mod engine;
mod gap_classifier;
mod meal_shortfall;
mod minimum_call;
mod placement;
mod segmentation;
mod validation;

pub use engine::{DayEvaluation, ENTRY_CLIPPED, evaluate_day, merge_lines};
pub use gap_classifier::{GapKind, classify_gap, classify_gap_duration};
pub use meal_shortfall::{MealGap, MealShortfallResult, calculate_meal_shortfall};
pub use minimum_call::{MinimumCallResult, calculate_minimum_call};
pub use placement::{EntryPlacer, Placement, Shortfall};
pub use segmentation::{Call, WorkedRun, segment_calls};
pub use validation::validate_intervals;
