use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use crate::{CoerceError, FieldKind, OpaqueValue};

/// The dynamic form a member value takes while crossing the shape layer:
/// by-name assignment, pair enumeration for serialization bridges, and the
/// coercion rules all speak `FieldValue`.
///
/// This vocabulary is deliberately closed: serialization bridges match it
/// exhaustively, so growing it is a breaking change for them.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// A typed-absent value; converts into any `Option` member.
    Absent,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Text(String),
    /// A sequence of values.
    List(Vec<FieldValue>),
    /// A nested record, as name/value pairs in declaration order.
    Record(Vec<(String, FieldValue)>),
    /// A type-erased value for members outside the built-in kinds.
    Opaque(OpaqueValue),
}

impl FieldValue {
    /// The kind of this value, for diagnostics.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Absent => ValueKind::Absent,
            FieldValue::Bool(_) => ValueKind::Bool,
            FieldValue::Int(_) => ValueKind::Int,
            FieldValue::UInt(_) => ValueKind::UInt,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::List(_) => ValueKind::List,
            FieldValue::Record(_) => ValueKind::Record,
            FieldValue::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// Erases `value` into an opaque field value.
    pub fn opaque<T: Any + Clone>(value: T) -> Self {
        FieldValue::Opaque(OpaqueValue::new(value))
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Absent, FieldValue::Absent) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::UInt(a), FieldValue::UInt(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            (FieldValue::Record(a), FieldValue::Record(b)) => a == b,
            // Opaque values have no equality; two of them never compare equal.
            _ => false,
        }
    }
}

/// Kind of a [`FieldValue`], mirroring its variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueKind {
    /// A typed-absent value.
    Absent,
    /// A boolean.
    Bool,
    /// A signed integer.
    Int,
    /// An unsigned integer.
    UInt,
    /// A floating-point number.
    Float,
    /// A string.
    Text,
    /// A sequence of values.
    List,
    /// A nested record.
    Record,
    /// A type-erased value.
    Opaque,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ValueKind::Absent => "absent",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::List => "list",
            ValueKind::Record => "record",
            ValueKind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// Conversion between a member's declared type and its dynamic
/// [`FieldValue`] form, plus the member-level shallow copy.
///
/// Every type usable as a record member implements this. The built-in menu
/// covers booleans, the fixed-width integers, floats, `String`, `Option<V>`,
/// and `Vec<V>`; `#[derive(Record)]` adds an impl for the derived type itself
/// so records nest. Anything else can be supported manually through
/// [`FieldValue::Opaque`].
///
/// # Coercion rules
///
/// `from_value` permits numeric narrowing and widening. Floats heading into
/// an integer member truncate toward zero; values that do not fit the target
/// range (and non-finite floats) fail with [`CoerceError::OutOfRange`].
/// [`FieldValue::Absent`] converts into any `Option` member, and a present
/// value converts into `Some` of the underlying type. Everything else fails
/// with [`CoerceError::WrongKind`].
pub trait FieldType: Sized + 'static {
    /// The declared-kind tag for this type.
    const KIND: FieldKind;

    /// Duplicates a value of this type the way whole-record cloning does:
    /// immediate state is copied, shared handles (`Arc`, `Rc`, `Sealed`)
    /// copy the handle rather than the target.
    fn shallow_clone(&self) -> Self;

    /// Converts an owned value into its dynamic form.
    fn into_value(self) -> FieldValue;

    /// Converts a dynamic value into this type, applying the coercion rules.
    fn from_value(value: FieldValue) -> Result<Self, CoerceError>;
}
