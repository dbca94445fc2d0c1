//! Tagged host events.
//!
//! Hosts publish a generic event stream; the plugin subscribes per
//! `EventKind` and narrows raw packets into `PositionUpdate` before anything
//! reaches enforcement.

use crate::protocol::packet::{PacketKind, RawPacket};
use crate::protocol::types::PlayerId;

/// Discriminant used for hook registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    GameInitialize,
    GreetPlayer,
    GetData,
    Reload,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::GameInitialize => "game_initialize",
            EventKind::GreetPlayer => "greet_player",
            EventKind::GetData => "get_data",
            EventKind::Reload => "reload",
        }
    }
}

/// Events a host emits towards plugins.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// World is ready; plugins load state and register commands.
    GameInitialize,
    /// A player's connection has been greeted (post-join).
    GreetPlayer { who: PlayerId },
    /// Any inbound network packet.
    GetData(RawPacket),
    /// Operator requested a configuration reload.
    Reload { invoker: PlayerId },
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::GameInitialize => EventKind::GameInitialize,
            HostEvent::GreetPlayer { .. } => EventKind::GreetPlayer,
            HostEvent::GetData(_) => EventKind::GetData,
            HostEvent::Reload { .. } => EventKind::Reload,
        }
    }
}

/// A player's state changed. Only constructible from a player-update packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    who: PlayerId,
}

impl PositionUpdate {
    /// Narrow a raw packet; any kind other than player-update yields `None`.
    pub fn from_packet(packet: &RawPacket, player_update_id: u8) -> Option<Self> {
        match PacketKind::classify(packet.msg_id, player_update_id) {
            PacketKind::PlayerUpdate => Some(Self { who: packet.who }),
            PacketKind::Other(_) => None,
        }
    }

    pub fn who(&self) -> PlayerId {
        self.who
    }
}
