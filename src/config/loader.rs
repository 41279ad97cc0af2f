//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! metadata and contract rules from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::ContractRules;

use super::types::{EngineConfig, EngineMetadata};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml        # Engine metadata
/// └── contracts/
///     ├── unworked.yaml  # One contract per file
///     └── worked.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use timecard_rules::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let contract = loader.get_contract("CTR_UNWORKED").unwrap();
/// println!("Minimum call: {} hours", contract.hours_minimum_call);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - `engine.yaml` or the `contracts` directory is missing
    /// - Any file contains invalid YAML, or two files declare the same contract id
    /// - A contract threshold is out of range
    ///
    /// # Example
    ///
    /// ```no_run
    /// use timecard_rules::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), timecard_rules::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let metadata = Self::load_yaml::<EngineMetadata>(&engine_path)?;

        let contracts_dir = path.join("contracts");
        let contracts = Self::load_contracts(&contracts_dir)?;

        Ok(Self {
            config: EngineConfig::new(metadata, contracts),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all contract files from the contracts directory.
    fn load_contracts(contracts_dir: &Path) -> EngineResult<BTreeMap<String, ContractRules>> {
        let contracts_dir_str = contracts_dir.display().to_string();

        let entries = fs::read_dir(contracts_dir).map_err(|_| EngineError::ConfigNotFound {
            path: contracts_dir_str.clone(),
        })?;

        let mut contracts = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: contracts_dir_str.clone(),
            })?;

            let path = entry.path();
            if !path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                continue;
            }

            let contract = Self::load_yaml::<ContractRules>(&path)?;
            contract.validate()?;

            if contracts.contains_key(&contract.id) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate contract id {}", contract.id),
                });
            }
            contracts.insert(contract.id.clone(), contract);
        }

        Ok(contracts)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        self.config.engine()
    }

    /// Returns every loaded contract in id order.
    pub fn contracts(&self) -> impl Iterator<Item = &ContractRules> {
        self.config.contracts().values()
    }

    /// Gets a contract by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use timecard_rules::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let contract = loader.get_contract("CTR_UNWORKED")?;
    /// println!("Contract: {}", contract.name);
    /// # Ok::<(), timecard_rules::error::EngineError>(())
    /// ```
    pub fn get_contract(&self, id: &str) -> EngineResult<&ContractRules> {
        self.config
            .contracts()
            .get(id)
            .ok_or_else(|| EngineError::ContractNotFound {
                contract_id: id.to_string(),
            })
    }
}
