//! Terminal presentation.
//!
//! The kernel talks to the user only through its presenter; this module
//! supplies the terminal-backed implementation and a couple of small
//! formatting helpers the front-end uses around it.

use std::io::IsTerminal;

use relsh_kernel::Presenter;

/// Presenter that writes announcements to stdout and errors to stderr.
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn announce(&self, message: &str) {
        println!("{message}");
    }

    fn report_error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// True when stdout is an interactive terminal; piped output skips the
/// banner and prompt decorations.
pub fn interactive() -> bool {
    std::io::stdout().is_terminal()
}

/// The startup banner.
pub fn banner(version: &str) -> String {
    format!("relsh v{version}\nType 'help' for topics, 'exit' to leave.")
}

/// The input prompt for a user.
pub fn prompt(user: &str) -> String {
    format!("{user}> ")
}
