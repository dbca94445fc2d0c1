//! Plugin config loader (strict parsing).

pub mod schema;

use std::fs;

use regionguard_core::error::{RegionGuardError, Result};

pub use schema::{CommandsSection, EnforcementSection, PluginConfig, StoreSection};

pub fn load_from_file(path: &str) -> Result<PluginConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RegionGuardError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PluginConfig> {
    let cfg: PluginConfig = serde_yaml::from_str(s)
        .map_err(|e| RegionGuardError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
