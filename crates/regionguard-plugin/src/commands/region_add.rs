use std::sync::Arc;

use regionguard_core::error::RegionGuardError;

use crate::dispatch::{ChatCommand, CommandCtx};
use crate::obs::Metrics;
use crate::store::RegionPolicyStore;

pub const REGION_ADD_USAGE: &str = "Usage: /regionadd <region name> <required group>";
pub const REGION_NOT_FOUND: &str = "Region not found.";

/// `/regionadd <region_name> <required_group>`
pub struct RegionAddCommand {
    store: Arc<RegionPolicyStore>,
    metrics: Arc<Metrics>,
    permission: String,
}

impl RegionAddCommand {
    pub fn new(store: Arc<RegionPolicyStore>, metrics: Arc<Metrics>, permission: impl Into<String>) -> Self {
        Self { store, metrics, permission: permission.into() }
    }
}

impl ChatCommand for RegionAddCommand {
    fn name(&self) -> &'static str {
        "regionadd"
    }

    fn permission(&self) -> &str {
        &self.permission
    }

    fn help_text(&self) -> &'static str {
        "Adds a region with a required group. Usage: /regionadd <region_name> <required_group>"
    }

    fn handle(&self, ctx: &CommandCtx<'_>) {
        let [region, group] = ctx.args else {
            ctx.error(REGION_ADD_USAGE);
            return;
        };

        if ctx.host().region(region).is_none() {
            ctx.error(REGION_NOT_FOUND);
            return;
        }

        match self.store.add(region, group) {
            Ok(()) => {
                self.metrics.store_writes.inc(&[("result", "ok")]);
                ctx.success(&format!("Region {region} added with required group {group}."));
            }
            Err(e) => {
                if matches!(e, RegionGuardError::Persist { .. }) {
                    self.metrics.store_writes.inc(&[("result", "error")]);
                }
                tracing::warn!(error = %e, region = %region, group = %group, "regionadd failed");
                ctx.error(&format!("Could not add region {region}: {e}"));
            }
        }
    }
}
