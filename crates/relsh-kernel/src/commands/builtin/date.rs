//! Clock commands.
//!
//! Both are quiet: they set Last Result without printing so they can be
//! spliced into a larger line, and the interpreter announces the value
//! only at the top level.

use chrono::Local;
use relsh_types::TypedValue;

use crate::commands::{Category, Command, CommandSpec, ExecContext};
use crate::error::{ShellError, ShellResult};

pub struct Date;

impl Command for Date {
    fn name(&self) -> &str {
        "date"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("date", Category::System, "Current date, YYYY-MM-DD")
            .example("date")
            .quiet()
    }

    fn execute(&self, args: &[String], _ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        if !args.is_empty() {
            return Err(ShellError::Syntax("date takes no arguments".into()));
        }
        Ok(TypedValue::Str(
            Local::now().format("%Y-%m-%d").to_string(),
        ))
    }
}

pub struct Time;

impl Command for Time {
    fn name(&self) -> &str {
        "time"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("time", Category::System, "Current time, HH:MM:SS")
            .example("time")
            .quiet()
    }

    fn execute(&self, args: &[String], _ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        if !args.is_empty() {
            return Err(ShellError::Syntax("time takes no arguments".into()));
        }
        Ok(TypedValue::Str(
            Local::now().format("%H:%M:%S").to_string(),
        ))
    }
}
