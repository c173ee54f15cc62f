use crate::{CoerceError, FieldValue};
use bitflags::bitflags;

/// Describes one assignable member of a record, along with the specialized
/// operations compiled for it by `#[derive(Record)]` (or a manual impl).
///
/// The four function pointers are the per-member half of the copy/access
/// subsystem:
///
/// - `read` snapshots the member into its dynamic [`FieldValue`] form,
/// - `write` assigns a coerced value through the member's own write logic
///   (a custom setter runs here),
/// - `load` assigns a coerced value directly to storage (setters bypassed;
///   this is the deserialization path),
/// - `copy` duplicates the member from another instance, also bypassing any
///   setter, so whole-record cloning stays free of member-level side effects.
#[non_exhaustive]
pub struct FieldDef<T> {
    /// Name of the member, as declared.
    pub name: &'static str,

    /// Coarse classification of the member's declared type.
    pub kind: FieldKind,

    /// Flags for the member (sensitive, skipped during serialization, ...)
    pub flags: FieldFlags,

    /// Doc comments, one entry per line.
    pub doc: &'static [&'static str],

    /// True if writes to this member route through custom logic rather than
    /// plain storage assignment.
    pub has_setter: bool,

    /// Snapshot the member as a dynamic value.
    pub read: fn(&T) -> FieldValue,

    /// Coerce and assign, honoring the member's write logic.
    pub write: fn(&mut T, FieldValue) -> Result<(), CoerceError>,

    /// Coerce and assign raw storage, bypassing the member's write logic.
    pub load: fn(&mut T, FieldValue) -> Result<(), CoerceError>,

    /// Copy the member from `source` into `target`, bypassing write logic.
    pub copy: fn(&mut T, source: &T),
}

impl<T> FieldDef<T> {
    /// Returns a builder for FieldDef
    pub const fn builder() -> FieldDefBuilder<T> {
        FieldDefBuilder::new()
    }
}

impl<T> core::fmt::Debug for FieldDef<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .field("has_setter", &self.has_setter)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FieldDef`]
pub struct FieldDefBuilder<T> {
    name: Option<&'static str>,
    kind: Option<FieldKind>,
    flags: FieldFlags,
    doc: &'static [&'static str],
    has_setter: bool,
    read: Option<fn(&T) -> FieldValue>,
    write: Option<fn(&mut T, FieldValue) -> Result<(), CoerceError>>,
    load: Option<fn(&mut T, FieldValue) -> Result<(), CoerceError>>,
    copy: Option<fn(&mut T, &T)>,
}

impl<T> FieldDefBuilder<T> {
    /// Creates a new FieldDefBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            name: None,
            kind: None,
            flags: FieldFlags::EMPTY,
            doc: &[],
            has_setter: false,
            read: None,
            write: None,
            load: None,
            copy: None,
        }
    }

    /// Sets the name for the field
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the declared kind for the field
    pub const fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the flags for the field
    pub const fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the doc comments for the field
    pub const fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Marks the field as having custom write logic
    pub const fn custom_setter(mut self) -> Self {
        self.has_setter = true;
        self
    }

    /// Sets the read operation for the field
    pub const fn read(mut self, read: fn(&T) -> FieldValue) -> Self {
        self.read = Some(read);
        self
    }

    /// Sets the setter-honoring write operation for the field
    pub const fn write(mut self, write: fn(&mut T, FieldValue) -> Result<(), CoerceError>) -> Self {
        self.write = Some(write);
        self
    }

    /// Sets the raw-storage load operation for the field
    pub const fn load(mut self, load: fn(&mut T, FieldValue) -> Result<(), CoerceError>) -> Self {
        self.load = Some(load);
        self
    }

    /// Sets the member-copy operation for the field
    pub const fn copy(mut self, copy: fn(&mut T, &T)) -> Self {
        self.copy = Some(copy);
        self
    }

    /// Builds the FieldDef
    pub const fn build(self) -> FieldDef<T> {
        FieldDef {
            name: self.name.unwrap(),
            kind: self.kind.unwrap(),
            flags: self.flags,
            doc: self.doc,
            has_setter: self.has_setter,
            read: self.read.unwrap(),
            write: self.write.unwrap(),
            load: self.load.unwrap(),
            copy: self.copy.unwrap(),
        }
    }
}

bitflags! {
    /// Flags that can be applied to fields to modify their behavior
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u64 {
        /// An empty set of flags
        const EMPTY = 0;

        /// Flag indicating this field contains sensitive data that should not
        /// be displayed; `Sealed`'s `Debug` output redacts it.
        const SENSITIVE = 1 << 0;

        /// Flag indicating this field should be skipped when enumerating
        /// name/value pairs for serialization.
        const SKIP_SERIALIZING = 1 << 1;
    }
}

impl Default for FieldFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Coarse classification of a member's declared type, used for diagnostics
/// and by serialization bridges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FieldKind {
    /// A boolean member.
    Bool,
    /// A signed integer member.
    Int,
    /// An unsigned integer member.
    UInt,
    /// A floating-point member.
    Float,
    /// A string member.
    Text,
    /// An `Option` member; absent values are representable.
    Optional,
    /// A sequence member.
    List,
    /// A member that is itself a record (or a wrapped record).
    Record,
    /// A member handled through type-erased [`crate::OpaqueValue`]s.
    Opaque,
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::UInt => "uint",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Optional => "optional",
            FieldKind::List => "list",
            FieldKind::Record => "record",
            FieldKind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}
