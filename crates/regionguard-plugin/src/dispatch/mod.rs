//! Host-facing registries.
//!
//! - `EventBus`: revocable hook subscriptions keyed by `EventKind`.
//! - `CommandRouter`: chat commands with permission gating.

pub mod commands;
pub mod event_bus;

pub use commands::{tokenize, ChatCommand, CommandCtx, CommandRouter};
pub use event_bus::{EventBus, HookFn, HookId};
