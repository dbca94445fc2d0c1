//! Administrative chat commands.

mod region_add;
mod region_list;

pub use region_add::{RegionAddCommand, REGION_NOT_FOUND, REGION_ADD_USAGE};
pub use region_list::{RegionListCommand, NO_REGIONS};
