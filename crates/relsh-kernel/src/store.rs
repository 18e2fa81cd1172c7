//! The two-tier variable store.
//!
//! Variables live in one of two independent namespaces, selected by the
//! name prefix alone:
//!
//! - `$name` — persistent, rewritten to the per-user store file on every
//!   mutation and reloaded at login.
//! - `#name` — session-only, discarded on reset.
//!
//! A corrupt or missing store file is treated as "no persistent
//! variables" (logged as a warning, never fatal).

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use relsh_types::{StoredValue, TypedValue};

use crate::error::{ShellError, ShellResult};

/// A named, typed variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: TypedValue,
    pub persistent: bool,
}

/// Session and persistent variable namespaces for one user.
#[derive(Debug)]
pub struct VariableStore {
    session: HashMap<String, Variable>,
    persistent: HashMap<String, Variable>,
    store_path: PathBuf,
}

impl VariableStore {
    /// Load the store, reading persistent variables from `store_path`.
    pub fn load(store_path: PathBuf) -> Self {
        let mut store = Self {
            session: HashMap::new(),
            persistent: HashMap::new(),
            store_path,
        };
        store.load_persistent();
        store
    }

    /// Set a variable, overwriting any previous value.
    ///
    /// The `$`/`#` prefix selects the namespace; a `$` mutation rewrites
    /// the persistent file. Names without a recognized prefix fail with
    /// [`ShellError::InvalidName`].
    pub fn set(&mut self, name: &str, value: TypedValue) -> ShellResult<()> {
        let persistent = Self::is_persistent_name(name)?;
        let variable = Variable {
            name: name.to_string(),
            value,
            persistent,
        };
        if persistent {
            self.persistent.insert(name.to_string(), variable);
            self.save_persistent();
        } else {
            self.session.insert(name.to_string(), variable);
        }
        Ok(())
    }

    /// Look up a variable in the namespace its prefix selects.
    ///
    /// No coercion happens here; callers type-check the result.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        if name.starts_with('$') {
            self.persistent.get(name)
        } else if name.starts_with('#') {
            self.session.get(name)
        } else {
            None
        }
    }

    /// Remove a variable. Returns `Ok(true)` if it existed, `Ok(false)`
    /// if absent (absence is reported, not fatal).
    pub fn forget(&mut self, name: &str) -> ShellResult<bool> {
        let persistent = Self::is_persistent_name(name)?;
        let removed = if persistent {
            let removed = self.persistent.remove(name).is_some();
            if removed {
                self.save_persistent();
            }
            removed
        } else {
            self.session.remove(name).is_some()
        };
        Ok(removed)
    }

    /// All variables across both namespaces, sorted by name.
    pub fn all(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = self
            .persistent
            .values()
            .chain(self.session.values())
            .collect();
        vars.sort_by(|a, b| a.name.cmp(&b.name));
        vars
    }

    /// Discard all session variables (logout/reboot).
    pub fn clear_session(&mut self) {
        self.session.clear();
    }

    /// Path of the persistent store file.
    pub fn store_path(&self) -> &PathBuf {
        &self.store_path
    }

    fn is_persistent_name(name: &str) -> ShellResult<bool> {
        if name.starts_with('$') {
            Ok(true)
        } else if name.starts_with('#') {
            Ok(false)
        } else {
            Err(ShellError::InvalidName(name.to_string()))
        }
    }

    fn load_persistent(&mut self) {
        let data = match std::fs::read_to_string(&self.store_path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!("could not read variable store: {e}");
                return;
            }
        };
        let entries: BTreeMap<String, StoredValue> = match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("variable store is corrupt, starting empty: {e}");
                return;
            }
        };
        for (name, stored) in entries {
            match TypedValue::from_stored(&stored) {
                Some(value) => {
                    self.persistent.insert(
                        name.clone(),
                        Variable {
                            name,
                            value,
                            persistent: true,
                        },
                    );
                }
                None => tracing::warn!("skipping corrupt store entry '{name}'"),
            }
        }
    }

    /// Rewrite the persistent file in full. Failures are warnings: the
    /// in-memory state stays authoritative for the session.
    fn save_persistent(&self) {
        let entries: BTreeMap<&str, StoredValue> = self
            .persistent
            .values()
            .map(|v| (v.name.as_str(), v.value.to_stored()))
            .collect();
        let json = match serde_json::to_string_pretty(&entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("could not serialize variables: {e}");
                return;
            }
        };
        if let Some(parent) = self.store_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("could not create variable store directory: {e}");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.store_path, json) {
            tracing::warn!("could not save variables: {e}");
        }
    }
}
