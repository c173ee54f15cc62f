use alloc::string::String;
use alloc::vec::Vec;

use crate::index::{NameIndex, NameIndexSlot};
use crate::{CoerceError, FieldDef, FieldError, FieldFlags, FieldKind, FieldType, FieldValue};

/// A record type with a compile-time shape.
///
/// Implemented by `#[derive(Record)]`, which also requires the type to be
/// default-constructible (`Default`); the construction capability is a
/// compile-time bound, not a runtime failure. Manual impls are possible and
/// supported; the typed function pointers in [`FieldDef`] make the compiler
/// check that every operation matches the implementing type.
pub trait Record: Sized + 'static {
    /// The shape describing this type's assignable members.
    fn shape() -> &'static RecordShape<Self>;
}

/// The shape of a record type: its assignable members in declaration order,
/// plus the type-level compiled operations (construct, shallow clone, by-name
/// assignment, pair enumeration).
///
/// Shapes are immutable metadata living in a `static` per type. The only
/// runtime-mutable piece is the lazily built name-lookup table, which is
/// published once with an atomic compare-exchange and tolerates redundant
/// concurrent builds.
pub struct RecordShape<T: 'static> {
    type_name: &'static str,
    doc: &'static [&'static str],
    fields: &'static [FieldDef<T>],
    construct: fn() -> T,
    index: NameIndexSlot,
}

impl<T> RecordShape<T> {
    /// Returns a builder for RecordShape
    pub const fn builder() -> RecordShapeBuilder<T> {
        RecordShapeBuilder::new()
    }

    /// Name of the record type, as declared.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Doc comments of the record type, one entry per line.
    pub fn doc(&self) -> &'static [&'static str] {
        self.doc
    }

    /// The record's assignable members, in declaration order.
    pub fn fields(&self) -> &'static [FieldDef<T>] {
        self.fields
    }

    /// Looks up a member by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef<T>> {
        self.field_position(name).map(|pos| &self.fields[pos])
    }

    /// Position of a member in declaration order, via the lazily published
    /// lookup table.
    pub fn field_position(&self, name: &str) -> Option<usize> {
        self.index
            .get_or_build(|| NameIndex::new(self.fields.iter().map(|field| field.name)))
            .position(name)
    }

    /// Produces a new default-initialized instance.
    pub fn construct(&self) -> T {
        (self.construct)()
    }

    /// Produces a new instance with every member copied from `source`.
    ///
    /// Copies are shallow: members that are handles copy the handle, not the
    /// target. Custom setters never run here, so clone cost is O(member
    /// count) and free of member-level side effects.
    pub fn clone_shallow(&self, source: &T) -> T {
        let mut target = (self.construct)();
        for field in self.fields {
            (field.copy)(&mut target, source);
        }
        target
    }

    /// Coerces `value` into the named member's declared type and assigns it
    /// through the member's own write logic.
    pub fn set<V: FieldType>(
        &self,
        target: &mut T,
        name: &str,
        value: V,
    ) -> Result<(), FieldError> {
        self.set_value(target, name, value.into_value())
    }

    /// Dynamic-value form of [`RecordShape::set`].
    pub fn set_value(
        &self,
        target: &mut T,
        name: &str,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        let field = self.field(name).ok_or_else(|| FieldError::NoSuchField {
            type_name: self.type_name,
            field: name.into(),
        })?;
        (field.write)(target, value).map_err(|source| FieldError::Coerce {
            type_name: self.type_name,
            field: field.name,
            source,
        })
    }

    /// Enumerates the record's members as name/value pairs, in declaration
    /// order. Members flagged [`FieldFlags::SKIP_SERIALIZING`] are omitted.
    ///
    /// Declaration order is part of the wire contract for order-sensitive
    /// formats.
    pub fn to_pairs(&self, source: &T) -> Vec<(&'static str, FieldValue)> {
        self.fields
            .iter()
            .filter(|field| !field.flags.contains(FieldFlags::SKIP_SERIALIZING))
            .map(|field| (field.name, (field.read)(source)))
            .collect()
    }

    /// Builds a new instance from name/value pairs.
    ///
    /// Members start default-initialized; each pair is coerced and assigned
    /// to raw storage, bypassing custom setters, so a value that a setter
    /// transformed on the way in is restored verbatim. Unknown names fail
    /// with [`FieldError::NoSuchField`].
    pub fn from_pairs<I, S>(&self, pairs: I) -> Result<T, FieldError>
    where
        I: IntoIterator<Item = (S, FieldValue)>,
        S: AsRef<str>,
    {
        let mut target = (self.construct)();
        for (name, value) in pairs {
            let name = name.as_ref();
            let field = self.field(name).ok_or_else(|| FieldError::NoSuchField {
                type_name: self.type_name,
                field: name.into(),
            })?;
            (field.load)(&mut target, value).map_err(|source| FieldError::Coerce {
                type_name: self.type_name,
                field: field.name,
                source,
            })?;
        }
        Ok(target)
    }

    /// `to_pairs` packaged as a [`FieldValue::Record`], for nested-member
    /// conversion.
    pub fn to_record_value(&self, source: &T) -> FieldValue {
        FieldValue::Record(
            self.to_pairs(source)
                .into_iter()
                .map(|(name, value)| (String::from(name), value))
                .collect(),
        )
    }

    /// `from_pairs` over a [`FieldValue::Record`], for nested-member
    /// conversion.
    pub fn from_record_value(&self, value: FieldValue) -> Result<T, CoerceError> {
        match value {
            FieldValue::Record(pairs) => self
                .from_pairs(pairs)
                .map_err(|inner| CoerceError::Nested(inner.into())),
            v => Err(CoerceError::wrong_kind(FieldKind::Record, v.kind())),
        }
    }
}

impl<T> core::fmt::Debug for RecordShape<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RecordShape({} ", self.type_name)?;
        let mut names = f.debug_list();
        for field in self.fields {
            names.entry(&field.name);
        }
        names.finish()?;
        write!(f, ")")
    }
}

/// Builder for [`RecordShape`]
pub struct RecordShapeBuilder<T: 'static> {
    type_name: Option<&'static str>,
    doc: &'static [&'static str],
    fields: Option<&'static [FieldDef<T>]>,
    construct: Option<fn() -> T>,
}

impl<T> RecordShapeBuilder<T> {
    /// Creates a new RecordShapeBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            type_name: None,
            doc: &[],
            fields: None,
            construct: None,
        }
    }

    /// Sets the type name for the shape
    pub const fn type_name(mut self, type_name: &'static str) -> Self {
        self.type_name = Some(type_name);
        self
    }

    /// Sets the doc comments for the shape
    pub const fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Sets the field list for the shape
    pub const fn fields(mut self, fields: &'static [FieldDef<T>]) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Sets the construct operation for the shape
    pub const fn construct(mut self, construct: fn() -> T) -> Self {
        self.construct = Some(construct);
        self
    }

    /// Builds the RecordShape
    pub const fn build(self) -> RecordShape<T> {
        RecordShape {
            type_name: self.type_name.unwrap(),
            doc: self.doc,
            fields: self.fields.unwrap(),
            construct: self.construct.unwrap(),
            index: NameIndexSlot::new(),
        }
    }
}
