// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a runnable set from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** check bounds,
/// dependency references or cycles. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), runnables = config.runnable.len(), "loaded runnable set");

    Ok(config)
}

/// Load a runnable set from path and validate it.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - attribute bounds (criticality, affinity, execution time, period),
///   - unknown or self `after` references,
///   - dependency cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default location of the runnable set: `Runnables.toml` in the current
/// working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Runnables.toml")
}
