//! Relay config loader (strict parsing).

pub mod schema;

use std::fs;

use drainprism_core::error::{DrainError, Result};

pub use schema::{DrainConfig, IngestSection, StatsdSection};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "DRAINPRISM_CONFIG";
/// Config file used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "drainprism.yaml";

pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<DrainConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DrainError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DrainConfig> {
    let cfg: DrainConfig = serde_yaml::from_str(s)
        .map_err(|e| DrainError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
