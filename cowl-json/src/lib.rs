#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

extern crate alloc;

use cowl_core::FieldError;

mod tokenizer;
pub use tokenizer::{Span, Spanned, Token, TokenError, TokenErrorKind};

mod serialize;
pub use serialize::*;

mod deserialize;
pub use deserialize::*;

/// Error encountered while bridging between JSON text and a record.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonError {
    /// The specific kind of failure.
    pub kind: JsonErrorKind,
    /// Where in the input (or output) the failure was detected.
    pub span: Span,
}

/// The kinds of failure a JSON bridge operation can hit.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum JsonErrorKind {
    /// The input could not be tokenized.
    Token(TokenErrorKind),

    /// A syntactically valid token appeared where it makes no sense.
    UnexpectedToken {
        /// What was found.
        got: &'static str,
        /// What the grammar wanted here.
        wanted: &'static str,
    },

    /// The JSON parsed, but its pairs do not fit the record's shape.
    Field(FieldError),

    /// A member's value has no JSON representation (an opaque member).
    UnsupportedValue {
        /// Type name of the value that cannot be represented.
        type_name: &'static str,
    },
}

impl core::fmt::Display for JsonError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            JsonErrorKind::Token(kind) => write!(f, "{kind}"),
            JsonErrorKind::UnexpectedToken { got, wanted } => {
                write!(f, "unexpected {got}, wanted {wanted}")
            }
            JsonErrorKind::Field(err) => write!(f, "{err}"),
            JsonErrorKind::UnsupportedValue { type_name } => {
                write!(f, "value of type {type_name} has no JSON representation")
            }
        }?;
        write!(f, " at byte {}", self.span.start)
    }
}

impl core::error::Error for JsonError {}

impl From<TokenError> for JsonError {
    fn from(err: TokenError) -> Self {
        JsonError {
            kind: JsonErrorKind::Token(err.kind),
            span: err.span,
        }
    }
}
