//! regionguard plugin library entry.
//!
//! Wires the region store, access enforcer, admin commands, and host-facing
//! registries into a plugin a game server can start and stop. Consumed by the
//! demo console (`main.rs`) and by integration tests.

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod enforce;
pub mod host;
pub mod obs;
pub mod plugin;
pub mod store;

pub use plugin::RegionGuard;
