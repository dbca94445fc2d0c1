//! Region access enforcement.
//!
//! Evaluates a player's tile position against every stored rule and sends
//! violators back to spawn.

pub mod enforcer;

pub use enforcer::{AccessEnforcer, RuleOutcome, Trigger};
