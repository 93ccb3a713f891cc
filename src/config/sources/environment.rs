//! Environment variable source: ROSTER__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses ROSTER__ prefix and __ as separator for nested keys, e.g.
/// `ROSTER__INSIGHT__TIMEOUT_SECS=10`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("ROSTER")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
