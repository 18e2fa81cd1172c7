//! Execution context passed to commands.

use relsh_types::{DataType, TypedValue};

use crate::error::{ShellError, ShellResult};
use crate::presenter::Presenter;
use crate::resolve;
use crate::state::ShellState;

use super::registry::CommandRegistry;

/// Everything a command handler may touch: the shared interpreter
/// state, the registry (for commands that dispatch sub-commands, like
/// `calc`), and the presentation collaborator.
pub struct ExecContext<'a> {
    /// Shared interpreter state.
    pub state: &'a mut ShellState,
    /// The immutable command registry.
    pub registry: &'a CommandRegistry,
    /// Presentation collaborator.
    pub presenter: &'a dyn Presenter,
}

impl ExecContext<'_> {
    /// Resolve one raw argument token against an expected type.
    pub fn resolve(&self, token: &str, expected: DataType) -> ShellResult<TypedValue> {
        resolve::resolve_arg(token, expected, self.state)
    }

    /// Dispatch a registered command by name, updating Last Result on
    /// success. Used by `calc` for nested command spans.
    pub fn run_command(&mut self, name: &str, args: &[String]) -> ShellResult<TypedValue> {
        let registry = self.registry;
        let command = registry
            .get(name)
            .ok_or_else(|| ShellError::Resolution(format!("unknown command: {name}")))?;
        let value = command.execute(args, self)?;
        self.state.set_last_result(value.clone());
        Ok(value)
    }
}
