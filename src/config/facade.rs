//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::RosterConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, `<base_dir>/roster.toml` and environment.
    pub fn load(base_dir: &Path) -> Result<RosterConfig, ConfigError> {
        MergeService::load(base_dir)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<RosterConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> RosterConfig {
        RosterConfig::default()
    }
}
