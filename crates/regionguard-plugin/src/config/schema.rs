use serde::Deserialize;

use regionguard_core::error::{RegionGuardError, Result};
use regionguard_core::protocol::{DEFAULT_TILE_SIZE, PLAYER_UPDATE};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    pub version: u32,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub commands: CommandsSection,

    #[serde(default)]
    pub enforcement: EnforcementSection,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            version: 1,
            store: StoreSection::default(),
            commands: CommandsSection::default(),
            enforcement: EnforcementSection::default(),
        }
    }
}

impl PluginConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RegionGuardError::UnsupportedVersion);
        }

        self.store.validate()?;
        self.commands.validate()?;
        self.enforcement.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self { path: default_store_path() }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(RegionGuardError::Config("store.path must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsSection {
    #[serde(default = "default_manage_permission")]
    pub manage_permission: String,
}

impl Default for CommandsSection {
    fn default() -> Self {
        Self { manage_permission: default_manage_permission() }
    }
}

impl CommandsSection {
    pub fn validate(&self) -> Result<()> {
        if self.manage_permission.trim().is_empty() {
            return Err(RegionGuardError::Config(
                "commands.manage_permission must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnforcementSection {
    #[serde(default = "default_tile_size")]
    pub tile_size: i32,

    #[serde(default = "default_player_update_packet")]
    pub player_update_packet: u8,
}

impl Default for EnforcementSection {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            player_update_packet: default_player_update_packet(),
        }
    }
}

impl EnforcementSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=256).contains(&self.tile_size) {
            return Err(RegionGuardError::Config(
                "enforcement.tile_size must be between 1 and 256".into(),
            ));
        }
        Ok(())
    }
}

fn default_store_path() -> String {
    "regions.json".into()
}
fn default_manage_permission() -> String {
    "regionrestriction.manage".into()
}
fn default_tile_size() -> i32 {
    DEFAULT_TILE_SIZE
}
fn default_player_update_packet() -> u8 {
    PLAYER_UPDATE
}
