//! relsh-types: The shared value model for relsh.
//!
//! Every value flowing through the interpreter carries exactly one
//! [`DataType`] tag; there is no untyped value. This crate defines the
//! closed type system and the serde representation used by the
//! persistent variable file.

mod value;

pub use value::{DataType, StoredValue, TypedValue};
