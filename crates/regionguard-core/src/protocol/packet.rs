//! Raw host packets, as delivered by the host's data hook.

use bytes::Bytes;

use crate::protocol::types::PlayerId;

/// Message id of the player-state update packet.
pub const PLAYER_UPDATE: u8 = 13;

/// Packet kinds the plugin cares about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    PlayerUpdate,
    Other(u8),
}

impl PacketKind {
    /// Classify a message id against the configured player-update id.
    pub fn classify(msg_id: u8, player_update_id: u8) -> Self {
        if msg_id == player_update_id {
            PacketKind::PlayerUpdate
        } else {
            PacketKind::Other(msg_id)
        }
    }
}

/// One inbound packet as delivered by the host's data hook.
#[derive(Debug, Clone)]
pub struct RawPacket {
    /// Sender connection slot.
    pub who: PlayerId,
    /// Message id (tag).
    pub msg_id: u8,
    /// Opaque payload (zero-copy).
    pub payload: Bytes,
}

impl RawPacket {
    pub fn new(who: PlayerId, msg_id: u8, payload: impl Into<Bytes>) -> Self {
        Self { who, msg_id, payload: payload.into() }
    }
}
