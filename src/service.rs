//! The `apply_rules` entry point.
//!
//! Loads a time card, its contract and its clock intervals from a
//! [`TimeCardStore`], evaluates the day, and replaces the card's synthesized
//! entries with the result. Nothing is written unless evaluation succeeds, so
//! a failed run leaves the previous entries in place.

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::evaluate_day;
use crate::error::{EngineResult, ErrorCode};
use crate::models::{AuditTrace, RuleApplication, SynthesizedEntry};
use crate::store::TimeCardStore;

/// Version reported in every [`RuleApplication`].
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What `apply_rules` hands back: an error code and the entries written.
///
/// `entries` is empty whenever `error` is not [`ErrorCode::Success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyRulesOutcome {
    /// `0` on success.
    pub error: ErrorCode,
    /// The synthesized entries that now stand on the time card.
    pub entries: Vec<SynthesizedEntry>,
}

/// Applies the contract rules to a time card and persists the entries.
///
/// Every failure is reported through the returned error code.
///
/// # Example
///
/// ```
/// use timecard_rules::error::ErrorCode;
/// use timecard_rules::service::apply_rules;
/// use timecard_rules::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let outcome = apply_rules(&store, "TCD_404");
/// assert_eq!(outcome.error, ErrorCode::DataAccess);
/// assert!(outcome.entries.is_empty());
/// ```
pub fn apply_rules(store: &dyn TimeCardStore, time_card_id: &str) -> ApplyRulesOutcome {
    match try_apply_rules(store, time_card_id) {
        Ok(application) => ApplyRulesOutcome {
            error: ErrorCode::Success,
            entries: application.entries,
        },
        Err(err) => ApplyRulesOutcome {
            error: err.error_code(),
            entries: Vec::new(),
        },
    }
}

/// Applies the contract rules to a time card and returns the full result.
///
/// Running it again on an unchanged card produces the same entries, lines,
/// calls and totals; only the application id, timestamp and timing differ.
///
/// # Errors
///
/// Returns the store's load or replace errors, and any error from
/// [`evaluate_day`]. The stored entries are only replaced on success.
pub fn try_apply_rules(
    store: &dyn TimeCardStore,
    time_card_id: &str,
) -> EngineResult<RuleApplication> {
    let start_time = Instant::now();

    let result = run(store, time_card_id, start_time);
    match &result {
        Ok(application) => info!(
            time_card_id = %time_card_id,
            application_id = %application.application_id,
            entries_count = application.entries.len(),
            calls_count = application.calls.len(),
            duration_us = application.audit_trace.duration_us,
            "Rules applied"
        ),
        Err(err) => warn!(
            time_card_id = %time_card_id,
            error = %err,
            error_code = err.error_code().as_u16(),
            "Rule application failed"
        ),
    }
    result
}

fn run(
    store: &dyn TimeCardStore,
    time_card_id: &str,
    start_time: Instant,
) -> EngineResult<RuleApplication> {
    let card = store.load_time_card(time_card_id)?;
    let rules = store.load_contract_rules(&card.contract_id)?;
    let intervals = store.load_clock_intervals(time_card_id)?;

    let day = evaluate_day(card.date, &intervals, &rules)?;

    store.replace_synthesized_entries(time_card_id, day.entries.clone())?;

    Ok(RuleApplication {
        application_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        time_card_id: card.id,
        contract_id: rules.id,
        calls: day.calls,
        entries: day.entries,
        lines: day.lines,
        totals: day.totals,
        audit_trace: AuditTrace {
            steps: day.steps,
            warnings: day.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
