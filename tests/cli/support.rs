//! Shared helpers for CLI tests.

use roster::config::RosterConfig;
use roster::tooling::cli::CliContext;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with XDG config and data homes pointed inside `temp_dir`.
pub fn with_xdg_env<F, R>(temp_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let config_home = temp_dir.path().join("config");
    let data_home = temp_dir.path().join("data");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&data_home).unwrap();

    let saved_config = std::env::var("XDG_CONFIG_HOME").ok();
    let saved_data = std::env::var("XDG_DATA_HOME").ok();
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::set_var("XDG_DATA_HOME", &data_home);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    match saved_config {
        Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    match saved_data {
        Some(v) => std::env::set_var("XDG_DATA_HOME", v),
        None => std::env::remove_var("XDG_DATA_HOME"),
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Context over `data_file` with default config.
pub fn context_for(data_file: &Path) -> CliContext {
    let base_dir = data_file.parent().unwrap();
    CliContext::new(&RosterConfig::default(), Some(data_file), base_dir).unwrap()
}
