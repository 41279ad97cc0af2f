//! Configuration loading for the rule engine.
//!
//! This module loads engine metadata and contract rules from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timecard_rules::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded engine: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineMetadata};
