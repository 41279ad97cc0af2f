//! In-memory [`TimeCardStore`] used by the HTTP server and tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{ClockInterval, ContractRules, SynthesizedEntry, TimeCard};

use super::TimeCardStore;

type ContractMap = RwLock<HashMap<String, ContractRules>>;
type CardMap = RwLock<HashMap<String, StoredCard>>;

#[derive(Debug, Clone)]
struct StoredCard {
    card: TimeCard,
    intervals: Vec<ClockInterval>,
    entries: Vec<SynthesizedEntry>,
}

/// A store that keeps everything in process memory.
///
/// # Example
///
/// ```
/// use timecard_rules::models::{ContractRules, TimeCard};
/// use timecard_rules::store::{InMemoryStore, TimeCardStore};
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::new();
/// store.insert_contract(ContractRules::new("CTR_1")).unwrap();
/// store.upsert_time_card(
///     TimeCard {
///         id: "TCD_1".to_string(),
///         contract_id: "CTR_1".to_string(),
///         worker_id: "CON_1".to_string(),
///         date: NaiveDate::from_ymd_opt(2026, 5, 19).unwrap(),
///     },
///     Vec::new(),
/// ).unwrap();
///
/// assert_eq!(store.load_time_card("TCD_1").unwrap().contract_id, "CTR_1");
/// assert!(store.synthesized_entries("TCD_1").unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    contracts: ContractMap,
    cards: CardMap,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with every contract from the configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        let contracts = config
            .contracts()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();
        Self {
            contracts: RwLock::new(contracts),
            cards: RwLock::default(),
        }
    }

    /// Adds or replaces a contract.
    pub fn insert_contract(&self, contract: ContractRules) -> EngineResult<()> {
        let mut contracts = self.contracts.write().map_err(poisoned)?;
        contracts.insert(contract.id.clone(), contract);
        Ok(())
    }

    /// Adds or replaces a time card and its clock intervals.
    ///
    /// Entries synthesized for the previous version of the card are dropped,
    /// since they no longer describe its intervals.
    pub fn upsert_time_card(&self, card: TimeCard, intervals: Vec<ClockInterval>) -> EngineResult<()> {
        let mut cards = self.cards.write().map_err(poisoned)?;
        cards.insert(
            card.id.clone(),
            StoredCard {
                card,
                intervals,
                entries: Vec::new(),
            },
        );
        Ok(())
    }

    /// Returns the synthesized entries currently stored for a time card.
    pub fn synthesized_entries(&self, time_card_id: &str) -> EngineResult<Vec<SynthesizedEntry>> {
        self.with_card(time_card_id, |stored| stored.entries.clone())
    }

    fn with_card<T>(&self, time_card_id: &str, f: impl FnOnce(&StoredCard) -> T) -> EngineResult<T> {
        let cards = self.cards.read().map_err(poisoned)?;
        cards
            .get(time_card_id)
            .map(f)
            .ok_or_else(|| EngineError::TimeCardNotFound {
                time_card_id: time_card_id.to_string(),
            })
    }
}

impl TimeCardStore for InMemoryStore {
    fn load_time_card(&self, time_card_id: &str) -> EngineResult<TimeCard> {
        self.with_card(time_card_id, |stored| stored.card.clone())
    }

    fn load_contract_rules(&self, contract_id: &str) -> EngineResult<ContractRules> {
        let contracts = self.contracts.read().map_err(poisoned)?;
        contracts
            .get(contract_id)
            .cloned()
            .ok_or_else(|| EngineError::ContractNotFound {
                contract_id: contract_id.to_string(),
            })
    }

    fn load_clock_intervals(&self, time_card_id: &str) -> EngineResult<Vec<ClockInterval>> {
        self.with_card(time_card_id, |stored| stored.intervals.clone())
    }

    fn replace_synthesized_entries(
        &self,
        time_card_id: &str,
        entries: Vec<SynthesizedEntry>,
    ) -> EngineResult<()> {
        let mut cards = self.cards.write().map_err(poisoned)?;
        let stored = cards
            .get_mut(time_card_id)
            .ok_or_else(|| EngineError::TimeCardNotFound {
                time_card_id: time_card_id.to_string(),
            })?;
        stored.entries = entries;
        Ok(())
    }
}

fn poisoned<T>(err: PoisonError<T>) -> EngineError {
    EngineError::DataAccess {
        message: format!("store lock poisoned: {}", err),
    }
}
