//! Help system for relsh.
//!
//! Topic pages are embedded at compile time; the command listing and
//! per-command pages are generated from the registry specs.

use crate::commands::{Category, CommandSpec};

/// Help topics available in relsh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpTopic {
    /// Overview with topic list.
    Overview,
    /// Line syntax, quoting, assignment.
    Syntax,
    /// Session and persistent variables.
    Variables,
    /// List of all available commands.
    Commands,
    /// Help for a specific command.
    Command(String),
}

impl HelpTopic {
    /// Parse a topic string.
    ///
    /// Returns `Overview` for the empty string, specific topics for
    /// known names, or `Command(name)` for anything else.
    pub fn parse_topic(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "" | "overview" | "help" => Self::Overview,
            "syntax" | "language" => Self::Syntax,
            "variables" | "vars" => Self::Variables,
            "commands" | "builtins" => Self::Commands,
            other => Self::Command(other.to_string()),
        }
    }
}

const OVERVIEW: &str = include_str!("../docs/help/overview.md");
const SYNTAX: &str = include_str!("../docs/help/syntax.md");
const VARIABLES: &str = include_str!("../docs/help/variables.md");

/// Get help content for a topic.
///
/// Static topics return embedded markdown; `Commands` and
/// `Command(name)` are generated from the registry specs.
pub fn get_help(topic: &HelpTopic, specs: &[CommandSpec]) -> String {
    match topic {
        HelpTopic::Overview => OVERVIEW.to_string(),
        HelpTopic::Syntax => SYNTAX.to_string(),
        HelpTopic::Variables => VARIABLES.to_string(),
        HelpTopic::Commands => format_command_list(specs),
        HelpTopic::Command(name) => format_command_help(name, specs),
    }
}

fn format_command_help(name: &str, specs: &[CommandSpec]) -> String {
    match specs.iter().find(|s| s.name == name) {
        Some(spec) => {
            let mut output = format!("{} — {}\n\nUsage: {}\n", spec.name, spec.description, spec.usage);
            if !spec.examples.is_empty() {
                output.push_str("\nExamples:\n");
                for example in &spec.examples {
                    output.push_str(&format!("  {example}\n"));
                }
            }
            output
        }
        None => format!(
            "Unknown topic or command: {name}\n\nUse 'help' for topics, or 'help commands' for the command list."
        ),
    }
}

/// Format the full command list grouped by category.
fn format_command_list(specs: &[CommandSpec]) -> String {
    let mut output = String::from("# Available Commands\n\n");
    let max_len = specs.iter().map(|s| s.name.len()).max().unwrap_or(0);

    for category in [Category::Math, Category::System, Category::Io, Category::Web] {
        let group: Vec<&CommandSpec> = specs.iter().filter(|s| s.category == category).collect();
        if group.is_empty() {
            continue;
        }
        output.push_str(&format!("## {}\n\n", category.label()));
        for spec in group {
            output.push_str(&format!(
                "  {:max_len$}  {}\n",
                spec.name, spec.description
            ));
        }
        output.push('\n');
    }

    output.push_str("---\n");
    output.push_str("Use 'help <command>' for detailed help on a specific command.\n");
    output
}
