//! Shared interpreter state.
//!
//! All mutable interpreter state lives here: the two variable
//! namespaces and the single-slot Last Result. The state object is
//! threaded explicitly through every resolution call; there are no
//! ambient globals, and all mutation happens on the one logical
//! command-execution thread.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use relsh_types::TypedValue;

use crate::paths;
use crate::store::VariableStore;

/// Per-session interpreter state for one user.
#[derive(Debug)]
pub struct ShellState {
    /// The logged-in user.
    pub user: String,
    /// Root directory the user's absolute paths resolve against.
    pub user_root: PathBuf,
    /// Current working directory (always under `user_root`).
    pub cwd: PathBuf,
    /// Variable namespaces.
    pub vars: VariableStore,
    /// The most recent value produced by any command, sub-command, or
    /// literal evaluation. Overwritten, never queued.
    last_result: TypedValue,
}

impl ShellState {
    /// Create state for `user`, creating the user root directory and
    /// loading the persistent variable store.
    pub fn new(user: &str, data_dir: &Path) -> Result<Self> {
        let user_root = paths::user_root(data_dir, user);
        std::fs::create_dir_all(&user_root)
            .with_context(|| format!("creating user root {}", user_root.display()))?;
        let vars = VariableStore::load(paths::variables_file(data_dir, user));
        Ok(Self {
            user: user.to_string(),
            cwd: user_root.clone(),
            user_root,
            vars,
            last_result: TypedValue::Null,
        })
    }

    /// The Last Result slot.
    pub fn last_result(&self) -> &TypedValue {
        &self.last_result
    }

    /// Overwrite the Last Result slot.
    pub fn set_last_result(&mut self, value: TypedValue) {
        self.last_result = value;
    }

    /// Record a failed operation: the slot always holds null afterwards.
    pub fn fail(&mut self) {
        self.last_result = TypedValue::Null;
    }

    /// Reset session state (logout/reboot): session variables and the
    /// Last Result are discarded; persistent variables remain.
    pub fn reset_session(&mut self) {
        self.vars.clear_session();
        self.last_result = TypedValue::Null;
        self.cwd = self.user_root.clone();
    }
}
