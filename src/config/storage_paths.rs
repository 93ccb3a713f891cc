//! StorageConfig and data file resolution.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the data file; relative paths resolve against the base directory.
    /// Unset means `$XDG_DATA_HOME/roster/students.txt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the data file location. An explicit override wins over config.
    pub fn resolve_data_file(
        &self,
        override_path: Option<&Path>,
        base_dir: &Path,
    ) -> Result<PathBuf, ApiError> {
        let chosen = override_path
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .filter(|p| !p.as_os_str().is_empty());

        match chosen {
            Some(path) if path.is_absolute() => Ok(path),
            Some(path) => Ok(base_dir.join(path)),
            None => xdg::default_data_file(),
        }
    }
}
