//! dir — list a directory.
//!
//! With no argument, lists the working directory. I/O commands announce
//! their output even when nested, so a `dir` inside a larger line still
//! shows its listing.

use relsh_types::{DataType, TypedValue};

use crate::commands::{Category, Command, CommandSpec, ExecContext};
use crate::error::{ShellError, ShellResult};

pub struct Dir;

impl Command for Dir {
    fn name(&self) -> &str {
        "dir"
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("dir", Category::Io, "List the contents of a directory")
            .usage("dir [<directory>]")
            .example("dir")
            .example("dir /music")
            .quiet()
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ShellResult<TypedValue> {
        let target = match args {
            [] => TypedValue::Directory(ctx.state.cwd.clone()),
            [token] => ctx.resolve(token, DataType::Directory)?,
            _ => return Err(ShellError::Syntax("dir takes at most one directory".into())),
        };
        let path = match &target {
            TypedValue::Directory(p) => p.clone(),
            other => {
                return Err(ShellError::TypeMismatch {
                    expected: DataType::Directory,
                    actual: other.data_type(),
                })
            }
        };

        let mut names = Vec::new();
        let entries = std::fs::read_dir(&path)
            .map_err(|e| ShellError::Resolution(format!("cannot read {}: {e}", path.display())))?;
        for entry in entries {
            let entry =
                entry.map_err(|e| ShellError::Resolution(format!("cannot read entry: {e}")))?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                name.push('/');
            }
            names.push(name);
        }
        names.sort();

        if names.is_empty() {
            ctx.presenter.announce("(empty)");
        } else {
            for name in &names {
                ctx.presenter.announce(name);
            }
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin::testutil::{args, with_ctx};

    #[test]
    fn lists_working_directory_sorted() {
        with_ctx(|ctx, presenter| {
            std::fs::create_dir(ctx.state.cwd.join("Music")).unwrap();
            std::fs::write(ctx.state.cwd.join("a.txt"), "x").unwrap();

            let value = ctx.run_command("dir", &[]).unwrap();
            assert!(matches!(value, TypedValue::Directory(_)));
            assert_eq!(presenter.messages(), vec!["Music/", "a.txt"]);
        });
    }

    #[test]
    fn lists_named_directory_case_insensitively() {
        with_ctx(|ctx, presenter| {
            let music = ctx.state.cwd.join("Music");
            std::fs::create_dir(&music).unwrap();
            std::fs::write(music.join("song.mp3"), "x").unwrap();

            ctx.run_command("dir", &args("/music")).unwrap();
            assert_eq!(presenter.messages(), vec!["song.mp3"]);
        });
    }

    #[test]
    fn empty_directory_announces_placeholder() {
        with_ctx(|ctx, presenter| {
            ctx.run_command("dir", &[]).unwrap();
            assert_eq!(presenter.messages(), vec!["(empty)"]);
        });
    }

    #[test]
    fn missing_directory_fails() {
        with_ctx(|ctx, _| {
            let err = ctx.run_command("dir", &args("/nowhere")).unwrap_err();
            assert!(matches!(err, ShellError::Resolution(_)));
        });
    }
}
