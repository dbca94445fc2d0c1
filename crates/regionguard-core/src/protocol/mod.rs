//! Boundary protocol between a game-server host and the plugin.
//!
//! - `types`: player ids and the two coordinate systems (tiles, fine units).
//! - `packet`: raw network packets as the host delivers them.
//! - `event`: tagged host events and the filtered `PositionUpdate`.

pub mod event;
pub mod packet;
pub mod types;

pub use event::{EventKind, HostEvent, PositionUpdate};
pub use packet::{PacketKind, RawPacket, PLAYER_UPDATE};
pub use types::{PlayerId, TilePos, WorldPos, DEFAULT_TILE_SIZE};
