//! Configuration types for the rule engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::ContractRules;

fn default_listen_address() -> String {
    "0.0.0.0:3000".to_string()
}

/// Metadata about the engine deployment, read from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of this deployment.
    pub name: String,
    /// The version of the rule set.
    pub version: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
}

/// The complete engine configuration loaded from YAML files.
///
/// Contracts are keyed by id and kept in id order.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    contracts: BTreeMap<String, ContractRules>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, contracts: BTreeMap<String, ContractRules>) -> Self {
        Self {
            metadata,
            contracts,
        }
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all contracts keyed by id.
    pub fn contracts(&self) -> &BTreeMap<String, ContractRules> {
        &self.contracts
    }
}
