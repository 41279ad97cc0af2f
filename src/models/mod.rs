//! Core data models for the rule engine.
//!
//! This module contains all the domain models used throughout the engine.

mod contract;
mod hours;
mod rule_application;
mod synthesized_entry;
mod time_card;

pub use contract::{ContractRules, MAX_THRESHOLD_HOURS};
pub use hours::{duration_from_hours, format_hms, hours_from_duration};
pub use rule_application::{
    AuditStep, AuditTrace, AuditWarning, CallSummary, RuleApplication, RuleTotals, TimeCardLine,
};
pub use synthesized_entry::{ShortfallKind, SynthesizedEntry};
pub use time_card::{ClockInterval, TimeCard};
