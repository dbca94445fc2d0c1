use std::sync::Arc;

use regionguard_core::protocol::{PlayerId, PositionUpdate};

use crate::host::{Host, HostPlayer, MessageTier};
use crate::obs::Metrics;
use crate::store::{RegionPolicyStore, RegionRule};

/// What caused an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Join,
    PositionUpdate,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Join => "join",
            Trigger::PositionUpdate => "position_update",
        }
    }
}

/// Result of checking one rule against one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Region no longer exists on the host.
    Skipped,
    Outside,
    Allowed,
    Denied,
}

/// Denial notice shown to the affected player.
pub fn denial_notice(region: &str) -> String {
    format!("You are not allowed to enter {region}.")
}

pub struct AccessEnforcer {
    host: Arc<dyn Host>,
    store: Arc<RegionPolicyStore>,
    metrics: Arc<Metrics>,
    tile_size: i32,
}

impl AccessEnforcer {
    pub fn new(
        host: Arc<dyn Host>,
        store: Arc<RegionPolicyStore>,
        metrics: Arc<Metrics>,
        tile_size: i32,
    ) -> Self {
        Self { host, store, metrics, tile_size }
    }

    /// Player connection was greeted by the host.
    pub fn on_player_join(&self, who: PlayerId) {
        self.evaluate(who, Trigger::Join);
    }

    /// Player state changed (already narrowed from the raw packet stream).
    pub fn on_player_position_update(&self, update: PositionUpdate) {
        self.evaluate(update.who(), Trigger::PositionUpdate);
    }

    /// Run every rule for `who`; returns the number of denials issued.
    fn evaluate(&self, who: PlayerId, trigger: Trigger) -> usize {
        let Some(player) = self.host.player(who) else {
            tracing::trace!(player = %who, trigger = trigger.as_str(), "stale event, player not connected");
            return 0;
        };

        let rules = match self.store.list() {
            Ok(rules) => rules,
            Err(e) => {
                tracing::debug!(error = %e, "no region rules available");
                return 0;
            }
        };

        self.metrics.evaluations.inc(&[("trigger", trigger.as_str())]);

        let mut denials = 0;
        for rule in &rules {
            if self.check_rule(&player, rule) == RuleOutcome::Denied {
                self.deny(&player, &rule.region_name);
                denials += 1;
            }
        }
        denials
    }

    /// Steps a-c of the evaluation: geometry lookup, containment, permission.
    pub fn check_rule(&self, player: &HostPlayer, rule: &RegionRule) -> RuleOutcome {
        let Some(region) = self.host.region(&rule.region_name) else {
            tracing::debug!(region = %rule.region_name, "restricted region missing on host; skipping");
            return RuleOutcome::Skipped;
        };

        if !region.in_area(player.tile) {
            return RuleOutcome::Outside;
        }

        if self.host.has_permission(&player.group, &rule.required_group) {
            RuleOutcome::Allowed
        } else {
            RuleOutcome::Denied
        }
    }

    fn deny(&self, player: &HostPlayer, region: &str) {
        let spawn = self.host.spawn_tile();
        self.host.teleport(player.id, spawn.to_world(self.tile_size));
        self.host.send_message(player.id, MessageTier::Info, &denial_notice(region));

        self.metrics.denials.inc(&[("region", region)]);
        tracing::info!(
            player = %player.name,
            id = %player.id,
            group = %player.group,
            region,
            tile = %player.tile,
            "restricted region entry denied; sent to spawn"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{HostEffect, MemoryHost, RectRegion};
    use regionguard_core::protocol::{RawPacket, TilePos, WorldPos, PLAYER_UPDATE};

    fn fixture() -> (tempfile::TempDir, Arc<MemoryHost>, Arc<RegionPolicyStore>, AccessEnforcer) {
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(MemoryHost::new(TilePos::new(100, 50), 16));
        host.add_group("guest", None, &[]);
        host.add_group("vip", Some("guest"), &["vip"]);
        host.add_region(RectRegion::new("Arena", 0, 0, 10, 10));

        let store = Arc::new(RegionPolicyStore::new(dir.path().join("regions.json")));
        store.load().unwrap();
        store.add("Arena", "vip").unwrap();

        let enforcer = AccessEnforcer::new(host.clone(), store.clone(), Arc::new(Metrics::new()), 16);
        (dir, host, store, enforcer)
    }

    #[test]
    fn evaluate_counts_denials() {
        let (_dir, host, _store, enforcer) = fixture();
        host.connect(PlayerId(1), "bob", "guest", TilePos::new(5, 5));
        assert_eq!(enforcer.evaluate(PlayerId(1), Trigger::Join), 1);
        assert_eq!(
            host.effects()[0],
            HostEffect::Teleport { who: PlayerId(1), to: WorldPos { x: 1600.0, y: 800.0 } }
        );
    }

    #[test]
    fn check_rule_outcomes() {
        let (_dir, host, _store, enforcer) = fixture();
        let rule = RegionRule::new("Arena", "vip");
        let mut p = HostPlayer { id: PlayerId(2), name: "amy".into(), tile: TilePos::new(10, 10), group: "guest".into() };

        assert_eq!(enforcer.check_rule(&p, &rule), RuleOutcome::Denied);
        p.group = "vip".into();
        assert_eq!(enforcer.check_rule(&p, &rule), RuleOutcome::Allowed);
        p.tile = TilePos::new(11, 10);
        assert_eq!(enforcer.check_rule(&p, &rule), RuleOutcome::Outside);

        host.remove_region("Arena");
        assert_eq!(enforcer.check_rule(&p, &rule), RuleOutcome::Skipped);
    }

    #[test]
    fn unrelated_packets_never_reach_the_enforcer() {
        let (_dir, host, _store, enforcer) = fixture();
        host.connect(PlayerId(1), "bob", "guest", TilePos::new(5, 5));

        let chat = RawPacket::new(PlayerId(1), 82, Vec::new());
        if let Some(update) = PositionUpdate::from_packet(&chat, PLAYER_UPDATE) {
            enforcer.on_player_position_update(update);
        }
        assert!(host.effects().is_empty());
    }

    #[test]
    fn unloaded_store_enforces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(MemoryHost::default());
        host.add_region(RectRegion::new("Arena", 0, 0, 10, 10));
        host.connect(PlayerId(1), "bob", "guest", TilePos::new(5, 5));
        let store = Arc::new(RegionPolicyStore::new(dir.path().join("regions.json")));
        let enforcer = AccessEnforcer::new(host.clone(), store, Arc::new(Metrics::new()), 16);

        enforcer.on_player_join(PlayerId(1));
        assert!(host.effects().is_empty());
    }
}
