use alloc::boxed::Box;
use alloc::string::String;
use owo_colors::OwoColorize;

use crate::{FieldKind, ValueKind};

/// Why a dynamic [`crate::FieldValue`] could not be coerced into a member's
/// declared type.
///
/// These are programmer-error-class failures: they are surfaced at the call
/// site that supplied the value and are never retried.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CoerceError {
    /// The value's kind has no conversion into the declared kind at all,
    /// e.g. text into an integer member.
    WrongKind {
        /// The declared kind of the member.
        expected: FieldKind,
        /// The kind of the value that was supplied.
        actual: ValueKind,
    },

    /// The value's kind converts in principle, but this particular value does
    /// not fit the declared type (out of range, or a non-finite float headed
    /// into an integer).
    OutOfRange {
        /// The declared kind of the member.
        expected: FieldKind,
        /// The kind of the value that was supplied.
        actual: ValueKind,
    },

    /// An opaque value held a different concrete type than the member.
    OpaqueType {
        /// Type name of the member's declared type.
        expected: &'static str,
        /// Type name of the value actually supplied.
        actual: &'static str,
    },

    /// Converting a value into a nested record failed.
    Nested(Box<FieldError>),
}

impl CoerceError {
    /// A value whose kind has no conversion into `expected`.
    pub fn wrong_kind(expected: FieldKind, actual: ValueKind) -> Self {
        CoerceError::WrongKind { expected, actual }
    }

    /// A numeric value that does not fit the declared type.
    pub fn out_of_range(expected: FieldKind, actual: ValueKind) -> Self {
        CoerceError::OutOfRange { expected, actual }
    }
}

impl core::fmt::Display for CoerceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoerceError::WrongKind { expected, actual } => {
                write!(
                    f,
                    "cannot convert {} into {}",
                    actual.red(),
                    expected.green()
                )
            }
            CoerceError::OutOfRange { expected, actual } => {
                write!(
                    f,
                    "{} value out of range for {}",
                    actual.red(),
                    expected.green()
                )
            }
            CoerceError::OpaqueType { expected, actual } => {
                write!(
                    f,
                    "opaque value holds {}, member wants {}",
                    actual.red(),
                    expected.green()
                )
            }
            CoerceError::Nested(inner) => write!(f, "nested record: {inner}"),
        }
    }
}

impl core::error::Error for CoerceError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CoerceError::Nested(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Errors raised by by-name member access on a record shape.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FieldError {
    /// The name did not resolve to an assignable member of the record.
    NoSuchField {
        /// The record type that was being accessed.
        type_name: &'static str,
        /// The name that failed to resolve.
        field: String,
    },

    /// The member resolved, but the supplied value could not be coerced into
    /// its declared type.
    Coerce {
        /// The record type that was being accessed.
        type_name: &'static str,
        /// The member that rejected the value.
        field: &'static str,
        /// The underlying conversion failure.
        source: CoerceError,
    },
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldError::NoSuchField { type_name, field } => {
                write!(
                    f,
                    "no such field: {}::{}",
                    type_name.blue(),
                    field.red()
                )
            }
            FieldError::Coerce {
                type_name,
                field,
                source,
            } => {
                write!(
                    f,
                    "cannot assign {}::{}: {}",
                    type_name.blue(),
                    field.yellow(),
                    source
                )
            }
        }
    }
}

impl core::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            FieldError::Coerce { source, .. } => Some(source),
            _ => None,
        }
    }
}
