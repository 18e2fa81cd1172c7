//! Built-in commands for relsh.
//!
//! These are always available and registered once at startup.

mod calc;
mod date;
mod dir;
mod help;
mod math;
mod vars;

use super::registry::CommandRegistry;

/// Register all built-in commands with the registry.
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(math::Add);
    registry.register(math::Subtract);
    registry.register(math::Multiply);
    registry.register(math::Divide);
    registry.register(math::Exponent);
    registry.register(math::Sqrt);
    registry.register(math::Average);
    registry.register(math::Factorial);
    registry.register(calc::Calc);
    registry.register(date::Date);
    registry.register(date::Time);
    registry.register(dir::Dir);
    registry.register(help::Help);
    registry.register(vars::Vars);
    registry.register(vars::Forget);
}
