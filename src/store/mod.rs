//! Persistence seam for time cards, contracts and synthesized entries.
//!
//! The rule engine never talks to a database directly. It loads what it needs
//! through [`TimeCardStore`] and hands back the full replacement set of
//! synthesized entries in a single call.

mod memory;

pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::{ClockInterval, ContractRules, SynthesizedEntry, TimeCard};

/// Backing store for the engine's inputs and outputs.
pub trait TimeCardStore: Send + Sync {
    /// Loads the time card header.
    fn load_time_card(&self, time_card_id: &str) -> EngineResult<TimeCard>;

    /// Loads the rules for a contract.
    fn load_contract_rules(&self, contract_id: &str) -> EngineResult<ContractRules>;

    /// Loads the worked clock intervals of a time card, in any order.
    fn load_clock_intervals(&self, time_card_id: &str) -> EngineResult<Vec<ClockInterval>>;

    /// Replaces every synthesized entry of a time card with `entries`.
    ///
    /// Implementations must apply the replacement all-or-nothing.
    fn replace_synthesized_entries(
        &self,
        time_card_id: &str,
        entries: Vec<SynthesizedEntry>,
    ) -> EngineResult<()>;
}
