//! relsh-kernel: the command language interpreter behind relsh.
//!
//! The kernel is synchronous and single-threaded by design: one line is
//! interpreted at a time, and all state mutation happens on the calling
//! thread. Front-ends drive it through [`Interpreter::execute`] and
//! observe it through a [`Presenter`] implementation.
//!
//! Module map:
//!
//! - [`parse`] — quote-aware tokens and parenthesized groups
//! - [`resolve`] — raw token to typed value, no coercion
//! - [`arith`] — the restricted arithmetic evaluator behind `calc`
//! - [`store`] — session and persistent variable namespaces
//! - [`commands`] — the registry and the built-in command set
//! - [`interpreter`] — line evaluation, splicing, assignment
//! - [`help`] — embedded topic pages and generated command help

pub mod arith;
pub mod commands;
pub mod error;
pub mod help;
pub mod interpreter;
pub mod parse;
pub mod paths;
pub mod presenter;
pub mod resolve;
pub mod state;
pub mod store;

pub use commands::{Category, Command, CommandRegistry, CommandSpec, ExecContext};
pub use error::{ArithmeticError, ShellError, ShellResult};
pub use interpreter::Interpreter;
pub use presenter::{ConsolePresenter, Presenter, RecordingPresenter};
pub use state::ShellState;
pub use store::{Variable, VariableStore};
