//! Persisted region → required-group mapping.
//!
//! One flat JSON document, rewritten in full after every mutation. Readers
//! get immutable snapshots; writers build a new map, persist it, and only then
//! publish it.

pub mod policy_store;

pub use policy_store::{RegionPolicyStore, RegionRule};
