//! The static command registry.
//!
//! Built once at startup and immutable thereafter; the only
//! polymorphic surface in the interpreter.

use std::collections::BTreeMap;

use super::builtin;
use super::traits::{Command, CommandSpec};

/// Name → handler mapping.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in command registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_builtins(&mut registry);
        registry
    }

    /// Register a command. Later registrations with the same name win,
    /// but in practice registration happens once at startup.
    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands
            .insert(command.name().to_string(), Box::new(command));
    }

    /// Look up a command by name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// True if `name` names a registered command. This is the rule that
    /// decides whether a parenthesized span is a command invocation or
    /// plain math.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Specs of every registered command, in name order.
    pub fn specs(&self) -> Vec<CommandSpec> {
        self.commands.values().map(|c| c.spec()).collect()
    }
}
