//! relsh REPL — interactive front-end for the relsh kernel.
//!
//! The REPL owns line editing and history (rustyline) and a handful of
//! session meta-commands (`exit`, `reset`); everything else is handed to
//! the interpreter, which reports through the injected presenter.

pub mod format;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use relsh_kernel::{paths, Interpreter, Presenter};

use format::TerminalPresenter;

/// Sentinel error used to unwind out of the read loop on `exit`.
const REPL_EXIT: &str = "__REPL_EXIT__";

/// One interactive session.
pub struct Repl {
    interpreter: Interpreter,
    last_line_failed: bool,
}

impl Repl {
    /// Create a session for `user` under the default data directory,
    /// presenting to the terminal.
    pub fn new(user: &str) -> Result<Self> {
        Self::with_presenter(user, &paths::default_data_dir(), Arc::new(TerminalPresenter))
    }

    /// Create a session with an explicit data directory and presenter.
    /// Tests use this with a recording presenter and a temp directory.
    pub fn with_presenter(
        user: &str,
        data_dir: &Path,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self> {
        let interpreter = Interpreter::new(user, data_dir, presenter)
            .context("failed to create interpreter")?;
        Ok(Self {
            interpreter,
            last_line_failed: false,
        })
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Process one line of input.
    ///
    /// Returns `Ok(Some(text))` for meta-command output, `Ok(None)` when
    /// the line was handled (the interpreter announces and reports
    /// through its presenter), or the exit sentinel as an error.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Ok(None),
            "exit" | "quit" => Err(anyhow::anyhow!(REPL_EXIT)),
            "reset" => {
                self.interpreter.state_mut().reset_session();
                Ok(Some("session reset".to_string()))
            }
            _ => {
                // Errors are already reported through the presenter and
                // never end the session.
                self.last_line_failed = self.interpreter.execute(trimmed).is_err();
                Ok(None)
            }
        }
    }

    /// True if the most recent interpreted line failed. Script mode uses
    /// this for its exit code.
    pub fn last_line_failed(&self) -> bool {
        self.last_line_failed
    }

    /// True if `err` is the exit sentinel from [`process_line`].
    ///
    /// [`process_line`]: Repl::process_line
    pub fn is_exit(err: &anyhow::Error) -> bool {
        err.to_string() == REPL_EXIT
    }
}

/// Run the interactive read loop until `exit` or end of input.
pub fn run(user: &str) -> Result<()> {
    if format::interactive() {
        println!("{}", format::banner(env!("CARGO_PKG_VERSION")));
        println!();
    }

    let mut rl: Editor<(), DefaultHistory> =
        Editor::new().context("failed to create line editor")?;

    let history_path = paths::default_data_dir().join("history.txt");
    if let Err(e) = rl.load_history(&history_path) {
        let missing = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
        if !missing {
            tracing::warn!("could not load history: {e}");
        }
    }

    let mut repl = Repl::new(user)?;
    let prompt = format::prompt(user);

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::warn!("could not record history entry: {e}");
                }
                match repl.process_line(&line) {
                    Ok(Some(output)) => println!("{output}"),
                    Ok(None) => {}
                    Err(e) if Repl::is_exit(&e) => break,
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);
    Ok(())
}

fn save_history(rl: &mut Editor<(), DefaultHistory>, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!("could not create history directory: {e}");
            return;
        }
    }
    if let Err(e) = rl.save_history(path) {
        tracing::warn!("could not save history: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relsh_kernel::RecordingPresenter;
    use relsh_types::TypedValue;

    fn test_repl() -> (tempfile::TempDir, Arc<RecordingPresenter>, Repl) {
        let dir = tempfile::tempdir().unwrap();
        let presenter = Arc::new(RecordingPresenter::new());
        let repl = Repl::with_presenter("tester", dir.path(), presenter.clone()).unwrap();
        (dir, presenter, repl)
    }

    #[test]
    fn exit_raises_the_sentinel() {
        let (_dir, _p, mut repl) = test_repl();
        let err = repl.process_line("exit").unwrap_err();
        assert!(Repl::is_exit(&err));
        let err = repl.process_line("  QUIT  ").unwrap_err();
        assert!(Repl::is_exit(&err));
    }

    #[test]
    fn reset_clears_session_state() {
        let (_dir, _p, mut repl) = test_repl();
        repl.process_line("3 -> #n").unwrap();
        let output = repl.process_line("reset").unwrap();
        assert_eq!(output.as_deref(), Some("session reset"));
        assert!(repl.interpreter().state().vars.get("#n").is_none());
    }

    #[test]
    fn lines_flow_through_the_interpreter() {
        let (_dir, presenter, mut repl) = test_repl();
        repl.process_line("add 2 3").unwrap();
        assert_eq!(presenter.messages(), vec!["5.0"]);
        assert_eq!(
            repl.interpreter().state().last_result(),
            &TypedValue::Number(5.0)
        );
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let (_dir, presenter, mut repl) = test_repl();
        repl.process_line("divide 1 0").unwrap();
        assert_eq!(presenter.errors(), vec!["division by zero"]);
        repl.process_line("add 1 1").unwrap();
        assert_eq!(presenter.messages(), vec!["2.0"]);
    }
}
