//! help — topic and per-command documentation.

use relsh_types::TypedValue;

use crate::commands::{Category, Command, CommandSpec, ExecContext};
use crate::error::{ShellError, ShellResult};
use crate::help::{get_help, HelpTopic};

pub struct Help;

impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("help", Category::System, "Show help for a topic or command")
            .usage("help [<topic>|<command>]")
            .example("help")
            .example("help commands")
            .example("help sqrt")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let topic = match args {
            [] => HelpTopic::Overview,
            [topic] => HelpTopic::parse_topic(topic),
            _ => return Err(ShellError::Syntax("help takes at most one topic".into())),
        };
        let content = get_help(&topic, &ctx.registry.specs());
        ctx.presenter.announce(content.trim_end());
        Ok(TypedValue::Null)
    }
}
