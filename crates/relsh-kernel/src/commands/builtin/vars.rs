//! Variable housekeeping commands.

use relsh_types::TypedValue;

use crate::commands::{Category, Command, CommandSpec, ExecContext};
use crate::error::{ShellError, ShellResult};

pub struct Vars;

impl Command for Vars {
    fn name(&self) -> &str {
        "vars"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("vars", Category::System, "List all defined variables").example("vars")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        if !args.is_empty() {
            return Err(ShellError::Syntax("vars takes no arguments".into()));
        }
        let all = ctx.state.vars.all();
        if all.is_empty() {
            ctx.presenter.announce("no variables defined");
        } else {
            for var in all {
                ctx.presenter.announce(&format!(
                    "{} = {} ({})",
                    var.name,
                    var.value.display(),
                    var.value.data_type()
                ));
            }
        }
        Ok(TypedValue::Null)
    }
}

pub struct Forget;

impl Command for Forget {
    fn name(&self) -> &str {
        "forget"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("forget", Category::System, "Delete a variable")
            .usage("forget <$name|#name>")
            .example("forget $budget")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let name = match args {
            [name] => name,
            _ => return Err(ShellError::Syntax("forget takes exactly one name".into())),
        };
        // Absence is reported, not fatal.
        if ctx.state.vars.forget(name)? {
            ctx.presenter.announce(&format!("forgot {name}"));
        } else {
            ctx.presenter.announce(&format!("no such variable: {name}"));
        }
        Ok(TypedValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin::testutil::{args, with_ctx};

    #[test]
    fn vars_lists_both_namespaces_sorted() {
        with_ctx(|ctx, presenter| {
            ctx.state.vars.set("#b", TypedValue::Number(2.0)).unwrap();
            ctx.state
                .vars
                .set("$a", TypedValue::Str("hi".into()))
                .unwrap();

            ctx.run_command("vars", &[]).unwrap();
            assert_eq!(
                presenter.messages(),
                vec!["$a = hi (string)", "#b = 2.0 (number)"]
            );
        });
    }

    #[test]
    fn vars_reports_when_empty() {
        with_ctx(|ctx, presenter| {
            ctx.run_command("vars", &[]).unwrap();
            assert_eq!(presenter.messages(), vec!["no variables defined"]);
        });
    }

    #[test]
    fn forget_removes_and_announces() {
        with_ctx(|ctx, presenter| {
            ctx.state.vars.set("#x", TypedValue::Number(1.0)).unwrap();
            ctx.run_command("forget", &args("#x")).unwrap();
            assert!(ctx.state.vars.get("#x").is_none());
            assert_eq!(presenter.messages(), vec!["forgot #x"]);
        });
    }

    #[test]
    fn forget_absent_is_not_an_error() {
        with_ctx(|ctx, presenter| {
            ctx.run_command("forget", &args("$ghost")).unwrap();
            assert_eq!(presenter.messages(), vec!["no such variable: $ghost"]);
        });
    }

    #[test]
    fn forget_rejects_unprefixed_names() {
        with_ctx(|ctx, _| {
            let err = ctx.run_command("forget", &args("plain")).unwrap_err();
            assert!(matches!(err, ShellError::InvalidName(_)));
        });
    }
}
