//! Error taxonomy for the interpreter.
//!
//! Every failure the interpreter can report falls into one of these
//! categories. Errors are user-visible and non-fatal: the current line is
//! discarded, the Last Result slot is set to null, and the session
//! continues.

use relsh_types::DataType;
use thiserror::Error;

/// Result alias used throughout the kernel.
pub type ShellResult<T> = Result<T, ShellError>;

/// Errors reported by the command language interpreter.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed line: unbalanced parentheses, missing arguments,
    /// unterminated strings, multi-token assignment values.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// An argument or variable resolved to the wrong data type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: DataType,
        actual: DataType,
    },

    /// Unknown command, unknown variable, or a missing `result`.
    #[error("{0}")]
    Resolution(String),

    /// A failure inside the arithmetic evaluator or a math command.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// A variable name without the `$`/`#` prefix.
    #[error("invalid variable name '{0}': names must start with $ or #")]
    InvalidName(String),

    /// The persistent variable store could not be read or written.
    #[error("variable store error: {0}")]
    Store(String),
}

/// Distinct arithmetic failure kinds.
#[derive(Debug, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivideByZero,

    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    #[error("factorial requires a non-negative integer, got {0}")]
    FactorialDomain(String),

    #[error("square root of a negative number")]
    NegativeSqrt,

    #[error("arithmetic overflow")]
    Overflow,
}
