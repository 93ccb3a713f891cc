//! Configuration
//!
//! Layered configuration: built-in defaults, the global config file, a local
//! `roster.toml`, then `ROSTER__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;
pub mod storage_paths;
pub mod xdg;

use crate::insight::InsightConfig;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub use facade::ConfigLoader;
pub use storage_paths::StorageConfig;

/// Top-level roster configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub insight: InsightConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
