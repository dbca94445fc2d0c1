use std::sync::Arc;

use dashmap::DashMap;

use regionguard_core::error::{RegionGuardError, Result};
use regionguard_core::protocol::PlayerId;

use crate::host::{Host, HostPlayer, MessageTier};

/// Reply shown to invokers lacking the command permission.
pub const NO_ACCESS: &str = "You do not have access to this command.";

/// Per-invocation context handed to a command.
pub struct CommandCtx<'a> {
    pub invoker: &'a HostPlayer,
    pub args: &'a [String],
    host: &'a dyn Host,
}

impl<'a> CommandCtx<'a> {
    pub fn new(invoker: &'a HostPlayer, args: &'a [String], host: &'a dyn Host) -> Self {
        Self { invoker, args, host }
    }

    pub fn host(&self) -> &dyn Host {
        self.host
    }

    pub fn reply(&self, tier: MessageTier, text: &str) {
        self.host.send_message(self.invoker.id, tier, text);
    }

    pub fn success(&self, text: &str) {
        self.reply(MessageTier::Success, text);
    }

    pub fn info(&self, text: &str) {
        self.reply(MessageTier::Info, text);
    }

    pub fn error(&self, text: &str) {
        self.reply(MessageTier::Error, text);
    }
}

/// A chat command. Outcomes are reported to the invoker, never returned.
pub trait ChatCommand: Send + Sync {
    fn name(&self) -> &'static str;
    /// Capability required to run the command.
    fn permission(&self) -> &str;
    fn help_text(&self) -> &'static str;
    fn handle(&self, ctx: &CommandCtx<'_>);
}

/// Registry and dispatcher for chat commands.
pub struct CommandRouter {
    host: Arc<dyn Host>,
    commands: DashMap<&'static str, Arc<dyn ChatCommand>>,
}

impl CommandRouter {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            commands: DashMap::new(),
        }
    }

    pub fn register(&self, cmd: Arc<dyn ChatCommand>) {
        tracing::debug!(command = cmd.name(), "command registered");
        self.commands.insert(cmd.name(), cmd);
    }

    pub fn deregister(&self, name: &str) -> bool {
        self.commands.remove(name).is_some()
    }

    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }

    pub fn help(&self, name: &str) -> Option<&'static str> {
        self.commands.get(name).map(|c| c.help_text())
    }

    /// Parse `line` (leading `/` optional) and run the command as `invoker`.
    ///
    /// Errors describe why nothing ran; the invoker has already been told.
    pub fn dispatch(&self, invoker: PlayerId, line: &str) -> Result<()> {
        let invoker = self
            .host
            .player(invoker)
            .ok_or_else(|| RegionGuardError::Validation(format!("unknown invoker: {invoker}")))?;

        let mut tokens = tokenize(line.trim_start().trim_start_matches('/'));
        if tokens.is_empty() {
            return Err(RegionGuardError::Validation("empty command".into()));
        }
        let name = tokens.remove(0).to_lowercase();

        let Some(cmd) = self.commands.get(name.as_str()).map(|c| Arc::clone(c.value())) else {
            self.host.send_message(
                invoker.id,
                MessageTier::Error,
                "Invalid command entered. Type /help for a list of valid commands.",
            );
            return Err(RegionGuardError::Validation(format!("unknown command: {name}")));
        };

        if !self.host.has_permission(&invoker.group, cmd.permission()) {
            tracing::info!(player = %invoker.name, command = cmd.name(), "command denied");
            self.host.send_message(invoker.id, MessageTier::Error, NO_ACCESS);
            return Err(RegionGuardError::Validation(format!("permission denied: {name}")));
        }

        tracing::debug!(player = %invoker.name, command = cmd.name(), args = tokens.len(), "command");
        cmd.handle(&CommandCtx::new(&invoker, &tokens, self.host.as_ref()));
        Ok(())
    }
}

/// Split on whitespace; double quotes group words, `\"` is a literal quote.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut quoted = false;
    let mut in_token = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
                in_token = true;
            }
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    out.push(std::mem::take(&mut cur));
                    in_token = false;
                }
            }
            c => {
                cur.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        out.push(cur);
    }
    out
}
