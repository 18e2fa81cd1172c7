//! Command system for relsh.
//!
//! Every operation the shell can perform is a [`Command`] registered in
//! the [`CommandRegistry`] at startup. Handlers resolve their own
//! arguments through the [`ExecContext`] and return one typed value,
//! which becomes the new Last Result.

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use registry::CommandRegistry;
pub use traits::{Category, Command, CommandSpec};
