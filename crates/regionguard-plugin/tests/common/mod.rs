//! Shared fixture: in-memory host + started plugin over a temp region file.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::Arc;

use regionguard_core::protocol::{HostEvent, PlayerId, RawPacket, TilePos, PLAYER_UPDATE};
use regionguard_plugin::config::PluginConfig;
use regionguard_plugin::dispatch::{CommandRouter, EventBus};
use regionguard_plugin::host::memory::{MemoryHost, RectRegion, SUPERUSER};
use regionguard_plugin::RegionGuard;

pub const ADMIN: PlayerId = PlayerId(200);
pub const SPAWN: TilePos = TilePos { x: 100, y: 50 };

pub struct Harness {
    pub dir: tempfile::TempDir,
    pub host: Arc<MemoryHost>,
    pub bus: EventBus,
    pub router: Arc<CommandRouter>,
    pub guard: RegionGuard,
}

impl Harness {
    /// Plugin started but the host has not signalled game-initialize yet.
    pub fn unstarted_world() -> Self {
        Self::unstarted_world_with(PluginConfig::default())
    }

    pub fn unstarted_world_with(mut cfg: PluginConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(MemoryHost::new(SPAWN, cfg.enforcement.tile_size));
        host.add_group("guest", None, &[]);
        host.add_group("vip", Some("guest"), &["vip"]);
        host.add_group("admin", Some("vip"), &["regionrestriction.manage", "admins"]);
        host.add_group("owner", None, &[SUPERUSER]);
        host.add_region(RectRegion::new("Arena", 0, 0, 10, 10));
        host.add_region(RectRegion::new("Vault", 5, 5, 10, 10));
        host.add_region(RectRegion::new("Market", 50, 50, 5, 5));
        host.connect(ADMIN, "op", "admin", TilePos::new(500, 500));

        cfg.store.path = dir.path().join("regions.json").display().to_string();

        let bus = EventBus::new();
        let router = Arc::new(CommandRouter::new(host.clone()));
        let guard = RegionGuard::new(cfg, host.clone(), Arc::clone(&router)).unwrap();
        guard.start(&bus).unwrap();

        Self { dir, host, bus, router, guard }
    }

    /// Started and initialized (store loaded, commands registered).
    pub fn new() -> Self {
        Self::with_config(PluginConfig::default())
    }

    pub fn with_config(cfg: PluginConfig) -> Self {
        let h = Self::unstarted_world_with(cfg);
        h.bus.publish(&HostEvent::GameInitialize);
        h
    }

    pub fn region_file(&self) -> std::path::PathBuf {
        self.dir.path().join("regions.json")
    }

    pub fn admin(&self, line: &str) {
        let _ = self.router.dispatch(ADMIN, line);
    }

    pub fn join(&self, who: PlayerId, group: &str, x: i32, y: i32) {
        self.host.connect(who, "player", group, TilePos::new(x, y));
        self.bus.publish(&HostEvent::GreetPlayer { who });
    }

    pub fn move_to(&self, who: PlayerId, x: i32, y: i32) {
        self.host.move_player(who, TilePos::new(x, y));
        self.bus.publish(&HostEvent::GetData(RawPacket::new(who, PLAYER_UPDATE, vec![0u8; 8])));
    }
}
