//! regionguard core: host-agnostic event primitives, error types, and codes.
//!
//! This crate defines the boundary contracts and error surface shared by the
//! plugin runtime, host adapters, and tests. It carries no runtime or storage
//! dependencies so any game-server adapter can reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `RegionGuardError`/`Result` so the host process
//! never goes down because of this plugin.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorCode, RegionGuardError, Result};
