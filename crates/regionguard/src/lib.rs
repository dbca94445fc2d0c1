//! Top-level facade crate for regionguard.
//!
//! Re-exports core types and the plugin library so hosts can depend on a single crate.

pub mod core {
    pub use regionguard_core::*;
}

pub mod plugin {
    pub use regionguard_plugin::*;
}
