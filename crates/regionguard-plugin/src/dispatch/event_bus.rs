use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use regionguard_core::protocol::{EventKind, HostEvent};

/// Event callback. Runs to completion on the publishing thread.
pub type HookFn = Arc<dyn Fn(&HostEvent) + Send + Sync>;

/// Handle returned by `register`; revokes exactly one hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u64);

struct HookEntry {
    kind: EventKind,
    handler: HookFn,
}

/// Hook registry and publisher.
pub struct EventBus {
    hooks: DashMap<HookId, HookEntry>,
    seq: AtomicU64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            hooks: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    pub fn register(&self, kind: EventKind, handler: HookFn) -> HookId {
        let id = HookId(self.seq.fetch_add(1, Ordering::Relaxed));
        self.hooks.insert(id, HookEntry { kind, handler });
        tracing::debug!(kind = kind.as_str(), id = id.0, "hook registered");
        id
    }

    /// Returns false if the hook was already gone.
    pub fn deregister(&self, id: HookId) -> bool {
        let removed = self.hooks.remove(&id).is_some();
        if removed {
            tracing::debug!(id = id.0, "hook deregistered");
        }
        removed
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn hook_count_for(&self, kind: EventKind) -> usize {
        self.hooks.iter().filter(|e| e.value().kind == kind).count()
    }

    /// Deliver `event` to every hook of its kind, in registration order.
    /// Returns the number of handlers invoked.
    pub fn publish(&self, event: &HostEvent) -> usize {
        let kind = event.kind();
        // snapshot first: handlers may (de)register while running
        let mut targets: Vec<(HookId, HookFn)> = self
            .hooks
            .iter()
            .filter(|e| e.value().kind == kind)
            .map(|e| (*e.key(), Arc::clone(&e.value().handler)))
            .collect();
        targets.sort_by_key(|(id, _)| *id);

        for (_, handler) in &targets {
            handler(event);
        }
        targets.len()
    }
}
