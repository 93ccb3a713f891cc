//! Local config file source: <base_dir>/roster.toml (optional)

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

pub const LOCAL_CONFIG_FILE: &str = "roster.toml";

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = base_dir.join(LOCAL_CONFIG_FILE);
    Ok(builder.add_source(File::from(path).required(false)))
}
