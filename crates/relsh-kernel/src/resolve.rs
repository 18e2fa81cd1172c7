//! The argument resolver: one raw token in, one typed value out.
//!
//! Resolution never coerces across types. The order is fixed:
//!
//! 1. the `result` keyword (case-insensitive) dereferences Last Result;
//! 2. `$`/`#` tokens are variable lookups;
//! 3. a number when a number is expected;
//! 4. a double-quoted string when a string is expected;
//! 5. a path when a directory or file is expected.
//!
//! Each step fails loudly instead of falling through with a guess.

use relsh_types::{DataType, TypedValue};

use crate::error::{ShellError, ShellResult};
use crate::paths;
use crate::state::ShellState;

/// Resolve a single raw token against an expected type.
pub fn resolve_arg(token: &str, expected: DataType, state: &ShellState) -> ShellResult<TypedValue> {
    // 1. Last Result dereference.
    if token.eq_ignore_ascii_case("result") {
        let value = state.last_result();
        if value.is_null() {
            return Err(ShellError::Resolution(
                "no result available to reference".into(),
            ));
        }
        return check_type(value.clone(), expected);
    }

    // 2. Variable lookup.
    if token.starts_with('$') || token.starts_with('#') {
        let var = state.vars.get(token).ok_or_else(|| {
            ShellError::Resolution(format!("unknown variable: {token}"))
        })?;
        return check_type(var.value.clone(), expected);
    }

    match expected {
        DataType::Number => token
            .parse::<f64>()
            .map(TypedValue::Number)
            .map_err(|_| ShellError::TypeMismatch {
                expected: DataType::Number,
                actual: DataType::String,
            }),
        DataType::String => match unquote(token) {
            Some(inner) => Ok(TypedValue::Str(inner.to_string())),
            // Barewords are rejected so a typo never silently becomes a string.
            None => Err(ShellError::Syntax(format!(
                "string arguments must be double-quoted: {token}"
            ))),
        },
        DataType::Directory | DataType::File => resolve_path(token, expected, state),
        DataType::Null => Ok(TypedValue::Null),
    }
}

/// Resolve a bare literal or variable token, the forms a line may
/// consist of without naming a command: a quoted string, a plain
/// number, the `result` keyword, or a `$`/`#` reference.
///
/// Returns `None` if the token is not one of those forms.
pub fn resolve_literal(token: &str, state: &ShellState) -> Option<ShellResult<TypedValue>> {
    if token.eq_ignore_ascii_case("result") {
        let value = state.last_result();
        if value.is_null() {
            return Some(Err(ShellError::Resolution(
                "no result available to reference".into(),
            )));
        }
        return Some(Ok(value.clone()));
    }
    if token.starts_with('$') || token.starts_with('#') {
        return Some(match state.vars.get(token) {
            Some(var) => Ok(var.value.clone()),
            None => Err(ShellError::Resolution(format!("unknown variable: {token}"))),
        });
    }
    if let Ok(n) = token.parse::<f64>() {
        return Some(Ok(TypedValue::Number(n)));
    }
    unquote(token).map(|inner| Ok(TypedValue::Str(inner.to_string())))
}

/// Resolve the left-hand side of an assignment: the literal forms plus
/// the `null` keyword and existing paths (absolute against the user
/// root, else relative to the working directory; first match wins).
pub fn resolve_assignable(token: &str, state: &ShellState) -> ShellResult<TypedValue> {
    if let Some(resolved) = resolve_literal(token, state) {
        return resolved;
    }
    if token.eq_ignore_ascii_case("null") {
        return Ok(TypedValue::Null);
    }
    if let Some(value) = lookup_path(token, state) {
        return Ok(value);
    }
    Err(ShellError::Resolution(format!(
        "cannot resolve value: {token}"
    )))
}

/// Strip a matched pair of double quotes, if present.
pub fn unquote(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

fn check_type(value: TypedValue, expected: DataType) -> ShellResult<TypedValue> {
    if value.data_type() == expected {
        Ok(value)
    } else {
        Err(ShellError::TypeMismatch {
            expected,
            actual: value.data_type(),
        })
    }
}

/// Resolve a path token when a directory or file is expected: the path
/// must exist and match the expected kind.
fn resolve_path(token: &str, expected: DataType, state: &ShellState) -> ShellResult<TypedValue> {
    let raw = unquote(token).unwrap_or(token);
    let resolved = if let Some(stripped) = raw.strip_prefix('/') {
        paths::resolve_case_insensitive(&state.user_root, stripped)
    } else {
        paths::resolve_case_insensitive(&state.cwd, raw)
    };
    let path = resolved.filter(|p| p.exists()).ok_or_else(|| {
        ShellError::Resolution(format!("no such {expected}: {raw}"))
    })?;
    let value = if path.is_dir() {
        TypedValue::Directory(path)
    } else {
        TypedValue::File(path)
    };
    check_type(value, expected)
}

/// Look up a token as an existing path without a kind expectation,
/// inferring directory vs. file from the filesystem.
fn lookup_path(token: &str, state: &ShellState) -> Option<TypedValue> {
    let raw = unquote(token).unwrap_or(token);
    let resolved = if let Some(stripped) = raw.strip_prefix('/') {
        paths::resolve_case_insensitive(&state.user_root, stripped)
    } else {
        paths::resolve_case_insensitive(&state.cwd, raw)
    };
    let path = resolved.filter(|p| p.exists())?;
    Some(if path.is_dir() {
        TypedValue::Directory(path)
    } else {
        TypedValue::File(path)
    })
}
