//! In-process reference host.
//!
//! Backs the demo console and the integration tests: players, rectangular
//! regions, a group hierarchy, and a journal of every effect the plugin
//! produced (teleports and messages), in order.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use regionguard_core::protocol::{PlayerId, TilePos, WorldPos, DEFAULT_TILE_SIZE};

use super::{Host, HostPlayer, HostRegion, MessageTier};

/// Permission granting everything.
pub const SUPERUSER: &str = "*";

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Debug, Clone)]
pub struct RectRegion {
    name: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl RectRegion {
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { name: name.into(), x, y, width, height }
    }
}

impl HostRegion for RectRegion {
    fn in_area(&self, tile: TilePos) -> bool {
        // widened so regions near the i32 edge cannot overflow
        let (x, y) = (i64::from(tile.x), i64::from(tile.y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        x >= left
            && x <= left + i64::from(self.width)
            && y >= top
            && y <= top + i64::from(self.height)
    }
}

#[derive(Debug, Clone, Default)]
struct GroupDef {
    parent: Option<String>,
    permissions: HashSet<String>,
}

/// Observable side effect recorded by `MemoryHost`.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEffect {
    Teleport { who: PlayerId, to: WorldPos },
    Message { who: PlayerId, tier: MessageTier, text: String },
}

pub struct MemoryHost {
    players: DashMap<PlayerId, HostPlayer>,
    regions: DashMap<String, Arc<RectRegion>>,
    groups: DashMap<String, GroupDef>,
    spawn: Mutex<TilePos>,
    tile_size: i32,
    journal: Mutex<Vec<HostEffect>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(TilePos::default(), DEFAULT_TILE_SIZE)
    }
}

impl MemoryHost {
    /// `tile_size` is the fine units per tile used when teleporting.
    pub fn new(spawn: TilePos, tile_size: i32) -> Self {
        Self {
            players: DashMap::new(),
            regions: DashMap::new(),
            groups: DashMap::new(),
            spawn: Mutex::new(spawn),
            tile_size: tile_size.max(1),
            journal: Mutex::new(Vec::new()),
        }
    }

    pub fn set_spawn(&self, tile: TilePos) {
        if let Ok(mut g) = self.spawn.lock() {
            *g = tile;
        }
    }

    /// Define (or redefine) a group. `parent` permissions are inherited.
    pub fn add_group(&self, name: &str, parent: Option<&str>, permissions: &[&str]) {
        self.groups.insert(
            name.to_string(),
            GroupDef {
                parent: parent.map(str::to_string),
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
            },
        );
    }

    pub fn add_region(&self, region: RectRegion) {
        self.regions.insert(region.name.clone(), Arc::new(region));
    }

    pub fn remove_region(&self, name: &str) -> bool {
        self.regions.remove(name).is_some()
    }

    pub fn connect(&self, id: PlayerId, name: &str, group: &str, tile: TilePos) {
        self.players.insert(
            id,
            HostPlayer { id, name: name.to_string(), tile, group: group.to_string() },
        );
    }

    pub fn disconnect(&self, id: PlayerId) -> Option<HostPlayer> {
        self.players.remove(&id).map(|(_, p)| p)
    }

    /// Move a connected player; false if the slot is empty.
    pub fn move_player(&self, id: PlayerId, tile: TilePos) -> bool {
        match self.players.get_mut(&id) {
            Some(mut p) => {
                p.tile = tile;
                true
            }
            None => false,
        }
    }

    /// Drain the journal.
    pub fn take_effects(&self) -> Vec<HostEffect> {
        match self.journal.lock() {
            Ok(mut g) => std::mem::take(&mut *g),
            Err(_) => Vec::new(),
        }
    }

    pub fn effects(&self) -> Vec<HostEffect> {
        self.journal.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn messages_for(&self, who: PlayerId) -> Vec<(MessageTier, String)> {
        self.effects()
            .into_iter()
            .filter_map(|e| match e {
                HostEffect::Message { who: w, tier, text } if w == who => Some((tier, text)),
                _ => None,
            })
            .collect()
    }

    pub fn teleports_for(&self, who: PlayerId) -> Vec<WorldPos> {
        self.effects()
            .into_iter()
            .filter_map(|e| match e {
                HostEffect::Teleport { who: w, to } if w == who => Some(to),
                _ => None,
            })
            .collect()
    }

    fn record(&self, effect: HostEffect) {
        if let Ok(mut g) = self.journal.lock() {
            g.push(effect);
        }
    }
}

impl Host for MemoryHost {
    fn player(&self, who: PlayerId) -> Option<HostPlayer> {
        self.players.get(&who).map(|p| p.value().clone())
    }

    fn region(&self, name: &str) -> Option<Arc<dyn HostRegion>> {
        self.regions
            .get(name)
            .map(|r| Arc::clone(r.value()) as Arc<dyn HostRegion>)
    }

    fn has_permission(&self, group: &str, permission: &str) -> bool {
        // walk up the parent chain; `seen` guards against cycles
        let mut seen = HashSet::new();
        let mut current = Some(group.to_string());
        while let Some(name) = current {
            if !seen.insert(name.clone()) {
                return false;
            }
            let Some(def) = self.groups.get(&name) else { return false; };
            if def.permissions.iter().any(|p| grants(p, permission)) {
                return true;
            }
            current = def.parent.clone();
        }
        false
    }

    fn teleport(&self, who: PlayerId, to: WorldPos) {
        let tile_size = self.tile_size as f32;
        if let Some(mut p) = self.players.get_mut(&who) {
            p.tile = TilePos::new((to.x / tile_size) as i32, (to.y / tile_size) as i32);
        }
        self.record(HostEffect::Teleport { who, to });
    }

    fn send_message(&self, who: PlayerId, tier: MessageTier, text: &str) {
        self.record(HostEffect::Message { who, tier, text: text.to_string() });
    }

    fn spawn_tile(&self) -> TilePos {
        self.spawn.lock().map(|g| *g).unwrap_or_default()
    }
}

/// `*` grants all, `a.*` grants `a.b`, otherwise exact match.
fn grants(held: &str, wanted: &str) -> bool {
    if held == SUPERUSER || held == wanted {
        return true;
    }
    match held.strip_suffix(".*") {
        Some(prefix) => wanted.len() > prefix.len() + 1
            && wanted.starts_with(prefix)
            && wanted.as_bytes().get(prefix.len()) == Some(&b'.'),
        None => false,
    }
}
