use std::sync::Arc;

use crate::dispatch::{ChatCommand, CommandCtx};
use crate::store::RegionPolicyStore;

pub const NO_REGIONS: &str = "No regions have been added.";

/// `/regionlist`
pub struct RegionListCommand {
    store: Arc<RegionPolicyStore>,
    permission: String,
}

impl RegionListCommand {
    pub fn new(store: Arc<RegionPolicyStore>, permission: impl Into<String>) -> Self {
        Self { store, permission: permission.into() }
    }
}

impl ChatCommand for RegionListCommand {
    fn name(&self) -> &'static str {
        "regionlist"
    }

    fn permission(&self) -> &str {
        &self.permission
    }

    fn help_text(&self) -> &'static str {
        "Lists all regions with required groups."
    }

    fn handle(&self, ctx: &CommandCtx<'_>) {
        let rules = match self.store.list() {
            Ok(rules) => rules,
            Err(e) => {
                ctx.error(&format!("Region rules unavailable ({e}); fix {} and reload.", self.store.path().display()));
                return;
            }
        };

        if rules.is_empty() {
            ctx.info(NO_REGIONS);
            return;
        }

        for rule in &rules {
            ctx.info(&format!("Region: {}, Required Group: {}", rule.region_name, rule.required_group));
        }
    }
}
