//! Core command trait and metadata types.

use relsh_types::TypedValue;

use crate::error::ShellResult;

use super::context::ExecContext;

/// Command category.
///
/// Category is behavior, not just grouping: it decides whether a
/// command's output is suppressed when it runs as a nested
/// sub-expression inside a larger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    System,
    Math,
    Io,
    Web,
}

impl Category {
    /// Math commands do not auto-print when nested; only their numeric
    /// value is spliced into the enclosing line.
    pub fn suppress_nested_output(self) -> bool {
        matches!(self, Category::Math)
    }

    /// Heading used by the help listing.
    pub fn label(self) -> &'static str {
        match self {
            Category::System => "System",
            Category::Math => "Math",
            Category::Io => "I/O",
            Category::Web => "Web",
        }
    }
}

/// Metadata describing a registered command, consumed by `help`.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Command name (lookup key).
    pub name: String,
    /// Dispatch category.
    pub category: Category,
    /// One-line description.
    pub description: String,
    /// Usage template.
    pub usage: String,
    /// Example invocations.
    pub examples: Vec<String>,
    /// Quiet commands update Last Result without printing, so they can
    /// be composed inline (`date`, `time`).
    pub quiet: bool,
}

impl CommandSpec {
    /// Create a new spec.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            category,
            description: description.into(),
            examples: Vec::new(),
            quiet: false,
        }
    }

    /// Set the usage template.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Add an example invocation.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Mark the command quiet.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

/// A command that can be dispatched by the processor.
///
/// Arguments arrive as raw tokens (quoted arguments keep their quotes)
/// and are resolved to typed values by each handler through the
/// argument resolver. On success the returned value becomes the new
/// Last Result; null is legitimate only for commands whose effect is
/// their announcement (`help`, `vars`, `forget`).
pub trait Command: Send + Sync {
    /// The command's name (used for lookup).
    fn name(&self) -> &str;

    /// Registration metadata.
    fn spec(&self) -> CommandSpec;

    /// Execute with raw argument tokens.
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue>;
}
