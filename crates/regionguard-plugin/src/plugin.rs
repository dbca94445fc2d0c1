//! Plugin lifecycle for regionguard.
//!
//! `RegionGuard` owns the store, enforcer, and metrics. `start` subscribes to
//! the host's event bus; `stop` revokes every hook and command it added.
//! Commands are registered when the host signals game-initialize, matching the
//! point at which the region document is first loaded.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use regionguard_core::error::{RegionGuardError, Result};
use regionguard_core::protocol::{EventKind, HostEvent, PlayerId, PositionUpdate};

use crate::commands::{RegionAddCommand, RegionListCommand};
use crate::config::PluginConfig;
use crate::dispatch::{ChatCommand, CommandRouter, EventBus, HookFn, HookId};
use crate::enforce::AccessEnforcer;
use crate::host::{Host, MessageTier};
use crate::obs::Metrics;
use crate::store::RegionPolicyStore;

pub const RELOAD_OK: &str = "Regions reloaded from file.";

#[derive(Clone)]
pub struct RegionGuard {
    inner: Arc<Inner>,
}

struct Inner {
    cfg: PluginConfig,
    host: Arc<dyn Host>,
    router: Arc<CommandRouter>,
    store: Arc<RegionPolicyStore>,
    enforcer: Arc<AccessEnforcer>,
    metrics: Arc<Metrics>,
    hooks: Mutex<Vec<HookId>>,
    commands: Mutex<Vec<&'static str>>,
}

impl RegionGuard {
    pub fn new(cfg: PluginConfig, host: Arc<dyn Host>, router: Arc<CommandRouter>) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(Metrics::new());
        let store = Arc::new(RegionPolicyStore::new(cfg.store.path.clone()));
        let enforcer = Arc::new(AccessEnforcer::new(
            Arc::clone(&host),
            Arc::clone(&store),
            Arc::clone(&metrics),
            cfg.enforcement.tile_size,
        ));

        Ok(Self {
            inner: Arc::new(Inner {
                cfg,
                host,
                router,
                store,
                enforcer,
                metrics,
                hooks: Mutex::new(Vec::new()),
                commands: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn cfg(&self) -> &PluginConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<RegionPolicyStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn enforcer(&self) -> Arc<AccessEnforcer> {
        Arc::clone(&self.inner.enforcer)
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn is_started(&self) -> bool {
        !self.inner.hooks.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }

    /// Subscribe to host events. Fails if already started.
    pub fn start(&self, bus: &EventBus) -> Result<()> {
        let mut hooks = self.inner.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        if !hooks.is_empty() {
            return Err(RegionGuardError::Validation("region guard already started".into()));
        }

        let player_update = self.inner.cfg.enforcement.player_update_packet;

        hooks.push(bus.register(
            EventKind::GameInitialize,
            self.hook(|inner, _| inner.on_game_initialize()),
        ));
        hooks.push(bus.register(
            EventKind::GreetPlayer,
            self.hook(|inner, ev| {
                if let HostEvent::GreetPlayer { who } = ev {
                    inner.enforcer.on_player_join(*who);
                }
            }),
        ));
        hooks.push(bus.register(
            EventKind::GetData,
            self.hook(move |inner, ev| {
                let HostEvent::GetData(packet) = ev else { return };
                if let Some(update) = PositionUpdate::from_packet(packet, player_update) {
                    inner.enforcer.on_player_position_update(update);
                }
            }),
        ));
        hooks.push(bus.register(
            EventKind::Reload,
            self.hook(|inner, ev| {
                if let HostEvent::Reload { invoker } = ev {
                    inner.on_reload(*invoker);
                }
            }),
        ));

        tracing::info!(hooks = hooks.len(), store = %self.inner.store.path().display(), "region guard started");
        Ok(())
    }

    /// Revoke every hook and command registered by this instance.
    pub fn stop(&self, bus: &EventBus) {
        let hooks: Vec<HookId> =
            std::mem::take(&mut *self.inner.hooks.lock().unwrap_or_else(PoisonError::into_inner));
        for id in &hooks {
            if !bus.deregister(*id) {
                tracing::warn!(?id, "hook already removed");
            }
        }

        let commands: Vec<&'static str> =
            std::mem::take(&mut *self.inner.commands.lock().unwrap_or_else(PoisonError::into_inner));
        for name in &commands {
            self.inner.router.deregister(name);
        }

        tracing::info!(hooks = hooks.len(), commands = commands.len(), "region guard stopped");
    }

    /// Wrap a handler so the bus only holds a weak reference to the plugin.
    fn hook<F>(&self, f: F) -> HookFn
    where
        F: Fn(&Inner, &HostEvent) + Send + Sync + 'static,
    {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        Arc::new(move |ev: &HostEvent| {
            if let Some(inner) = weak.upgrade() {
                f(&inner, ev);
            }
        })
    }
}

impl Inner {
    fn on_game_initialize(&self) {
        if let Err(e) = self.store.load() {
            // keep running without rules; an operator reload can recover
            tracing::error!(error = %e, code = e.code().as_str(), "initial region load failed");
        }
        self.register_commands();
    }

    fn register_commands(&self) {
        let mut registered = self.commands.lock().unwrap_or_else(PoisonError::into_inner);
        if !registered.is_empty() {
            return;
        }

        let permission = self.cfg.commands.manage_permission.as_str();
        let add = Arc::new(RegionAddCommand::new(
            Arc::clone(&self.store),
            Arc::clone(&self.metrics),
            permission,
        ));
        let list = Arc::new(RegionListCommand::new(Arc::clone(&self.store), permission));

        registered.push(add.name());
        registered.push(list.name());
        self.router.register(add);
        self.router.register(list);
    }

    fn on_reload(&self, invoker: PlayerId) {
        match self.store.reload() {
            Ok(()) => self.host.send_message(invoker, MessageTier::Success, RELOAD_OK),
            Err(e) => {
                tracing::error!(error = %e, "region reload failed");
                self.host.send_message(
                    invoker,
                    MessageTier::Error,
                    &format!("Region reload failed: {e}"),
                );
            }
        }
    }
}
