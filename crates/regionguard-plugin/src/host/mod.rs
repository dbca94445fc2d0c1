//! Host capabilities consumed by the plugin.
//!
//! The game server owns players, region geometry, group hierarchy, and the
//! outbound connection. The plugin only reaches them through `Host`. Every
//! lookup is an `Option`: absence is a normal outcome, never an error.

pub mod memory;

use std::sync::Arc;

use regionguard_core::protocol::{PlayerId, TilePos, WorldPos};

/// Message category, rendered by the host (colour, prefix, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTier {
    Success,
    Info,
    Error,
}

impl MessageTier {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageTier::Success => "success",
            MessageTier::Info => "info",
            MessageTier::Error => "error",
        }
    }
}

/// Snapshot of a connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlayer {
    pub id: PlayerId,
    pub name: String,
    pub tile: TilePos,
    pub group: String,
}

/// Host-side region geometry.
pub trait HostRegion: Send + Sync {
    /// Inclusive containment test in tile units.
    fn in_area(&self, tile: TilePos) -> bool;
}

/// Everything the plugin needs from the game server.
pub trait Host: Send + Sync {
    /// Look up a connected player by slot.
    fn player(&self, who: PlayerId) -> Option<HostPlayer>;

    /// Look up a region by name.
    fn region(&self, name: &str) -> Option<Arc<dyn HostRegion>>;

    /// Capability test; hosts typically resolve group inheritance here.
    fn has_permission(&self, group: &str, permission: &str) -> bool;

    fn teleport(&self, who: PlayerId, to: WorldPos);

    fn send_message(&self, who: PlayerId, tier: MessageTier, text: &str);

    /// Configured world spawn, in tiles.
    fn spawn_tile(&self) -> TilePos;
}
