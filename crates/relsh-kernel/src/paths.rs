//! Per-user data paths and case-insensitive path resolution.
//!
//! relsh keeps all user data under one XDG-style data directory:
//!
//! | Purpose | Path |
//! |---------|------|
//! | User roots | `<data>/users/<user>/` |
//! | Persistent variables | `<data>/variables/<user>.json` |
//!
//! Path arguments typed at the shell are matched against the filesystem
//! case-insensitively and normalized to the actual on-disk casing.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// The default relsh data directory.
///
/// Returns `$XDG_DATA_HOME/relsh` (or the platform equivalent), falling
/// back to `~/.local/share/relsh`.
pub fn default_data_dir() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.data_dir().join("relsh"))
        .unwrap_or_else(|| home_dir().join(".local").join("share").join("relsh"))
}

/// The user's home directory, falling back to `/tmp`.
pub fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

/// The root directory a user's paths resolve against.
pub fn user_root(data_dir: &Path, user: &str) -> PathBuf {
    data_dir.join("users").join(user)
}

/// The persistent variable file for a user.
pub fn variables_file(data_dir: &Path, user: &str) -> PathBuf {
    data_dir.join("variables").join(format!("{user}.json"))
}

/// Resolve a relative path against `base`, matching each component
/// case-insensitively and normalizing to on-disk casing.
///
/// Returns `None` if any component does not exist under `base`.
pub fn resolve_case_insensitive(base: &Path, relative: &str) -> Option<PathBuf> {
    let mut current = base.to_path_buf();
    for component in relative.split('/').filter(|c| !c.is_empty() && *c != ".") {
        if component == ".." {
            current.pop();
            continue;
        }
        let exact = current.join(component);
        if exact.exists() {
            current = exact;
            continue;
        }
        let entries = std::fs::read_dir(&current).ok()?;
        let matched = entries.filter_map(|e| e.ok()).find(|e| {
            e.file_name()
                .to_string_lossy()
                .eq_ignore_ascii_case(component)
        })?;
        current = matched.path();
    }
    Some(current)
}
