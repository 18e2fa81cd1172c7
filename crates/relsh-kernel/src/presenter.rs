//! The presentation collaborator.
//!
//! The interpreter never prints directly; it calls an opaque
//! [`Presenter`] for announcements and error reports. The real shell
//! front-end backs this with sound cues and slow-print rendering; tests
//! use [`RecordingPresenter`] to assert on what was said.

use std::sync::Mutex;

/// Blocking presentation operations consumed by the interpreter.
pub trait Presenter: Send + Sync {
    /// Announce a value or message to the user.
    fn announce(&self, message: &str);

    /// Report a user-visible, non-fatal error.
    fn report_error(&self, message: &str);
}

/// Plain stdout/stderr presenter.
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn announce(&self, message: &str) {
        println!("{message}");
    }

    fn report_error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Presenter that records everything it is told, for tests and
/// embedders that capture output.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    messages: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All announced messages so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("presenter lock").clone()
    }

    /// All reported errors so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("presenter lock").clone()
    }
}

impl Presenter for RecordingPresenter {
    fn announce(&self, message: &str) {
        self.messages
            .lock()
            .expect("presenter lock")
            .push(message.to_string());
    }

    fn report_error(&self, message: &str) {
        self.errors
            .lock()
            .expect("presenter lock")
            .push(message.to_string());
    }
}
