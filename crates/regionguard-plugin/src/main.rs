//! regionguard demo console.
//!
//! Runs the plugin against the in-memory host and drives it from stdin:
//! - `region <name> <x> <y> <w> <h>` / `unregion <name>`
//! - `group <name> <parent|-> [perm...]`
//! - `player <id> <name> <group> <x> <y>` (connects and greets)
//! - `move <id> <x> <y>` (emits a player-update packet)
//! - `reload`, `metrics`, `quit`
//! - anything starting with `/` runs as a chat command from the console

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use regionguard_core::protocol::{HostEvent, PlayerId, RawPacket, TilePos};
use regionguard_plugin::config::{self, PluginConfig};
use regionguard_plugin::dispatch::{tokenize, CommandRouter, EventBus};
use regionguard_plugin::host::memory::{HostEffect, MemoryHost, RectRegion, SUPERUSER};
use regionguard_plugin::{obs, RegionGuard};

const CONSOLE: PlayerId = PlayerId(255);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    obs::init_tracing();

    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path)?,
        None => PluginConfig::default(),
    };
    let player_update = cfg.enforcement.player_update_packet;

    let host = Arc::new(MemoryHost::new(TilePos::new(0, 0), cfg.enforcement.tile_size));
    host.add_group("superadmin", None, &[SUPERUSER]);
    host.connect(CONSOLE, "Server", "superadmin", TilePos::default());

    let bus = EventBus::new();
    let router = Arc::new(CommandRouter::new(host.clone()));
    let guard = RegionGuard::new(cfg, host.clone(), Arc::clone(&router))?;
    guard.start(&bus)?;
    bus.publish(&HostEvent::GameInitialize);

    tracing::info!(commands = ?router.registered(), "regionguard console ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('/') {
            if let Err(e) = router.dispatch(CONSOLE, line) {
                tracing::debug!(error = %e, "command not run");
            }
            flush(&host);
            continue;
        }

        let args = tokenize(line);
        let words: Vec<&str> = args.iter().map(String::as_str).collect();
        match words.as_slice() {
            ["quit"] | ["exit"] => break,
            ["reload"] => {
                bus.publish(&HostEvent::Reload { invoker: CONSOLE });
            }
            ["metrics"] => print!("{}", guard.metrics().render()),
            ["region", name, x, y, w, h] => match (x.parse(), y.parse(), w.parse(), h.parse()) {
                (Ok(x), Ok(y), Ok(w), Ok(h)) => host.add_region(RectRegion::new(*name, x, y, w, h)),
                _ => println!("region: coordinates must be integers"),
            },
            ["unregion", name] => {
                if !host.remove_region(name) {
                    println!("unregion: no region {name}");
                }
            }
            ["group", name, parent, perms @ ..] => {
                let parent = (*parent != "-").then_some(*parent);
                host.add_group(name, parent, perms);
            }
            ["player", id, name, group, x, y] => match (id.parse(), x.parse(), y.parse()) {
                (Ok(id), Ok(x), Ok(y)) => {
                    let who = PlayerId(id);
                    host.connect(who, name, group, TilePos::new(x, y));
                    bus.publish(&HostEvent::GreetPlayer { who });
                }
                _ => println!("player: id and coordinates must be integers"),
            },
            ["move", id, x, y] => match (id.parse(), x.parse(), y.parse()) {
                (Ok(id), Ok(x), Ok(y)) => {
                    let who = PlayerId(id);
                    if host.move_player(who, TilePos::new(x, y)) {
                        bus.publish(&HostEvent::GetData(RawPacket::new(who, player_update, Vec::new())));
                    } else {
                        println!("move: player {who} not connected");
                    }
                }
                _ => println!("move: id and coordinates must be integers"),
            },
            _ => println!("unrecognised input: {line}"),
        }
        flush(&host);
    }

    guard.stop(&bus);
    Ok(())
}

fn flush(host: &MemoryHost) {
    for effect in host.take_effects() {
        match effect {
            HostEffect::Teleport { who, to } => println!("[teleport] player {who} -> ({}, {})", to.x, to.y),
            HostEffect::Message { who, tier, text } => println!("[{}] to {who}: {text}", tier.as_str()),
        }
    }
}
