use alloc::sync::Arc;
use core::ops::Deref;

use cowl_core::{CoerceError, FieldError, FieldFlags, FieldKind, FieldType, FieldValue, Record};

use crate::Draft;
use crate::trace;

/// A read-only handle enforcing copy-on-write over an enclosed [`Record`].
///
/// The enclosed value is never mutated through a `Sealed`: reads borrow it
/// directly, and every logical mutation ([`set`](Sealed::set),
/// [`update`](Sealed::update)) clones it first and returns a new handle over
/// the clone. Cloning the *handle* itself is a reference-count bump, which
/// is unobservable precisely because the enclosed value is immutable.
///
/// ```
/// use cowl::{Record, Sealed};
///
/// #[derive(Record, Default)]
/// struct Order {
///     order_id: u64,
/// }
///
/// let w = Sealed::new(&Order::default());
/// let w2 = w.set("order_id", 1u64).unwrap();
/// assert_eq!(w.get(|o| o.order_id), 0);
/// assert_eq!(w2.get(|o| o.order_id), 1);
/// ```
pub struct Sealed<T: Record> {
    inner: Arc<T>,
}

impl<T: Record> Sealed<T> {
    /// Wraps a shallow clone of `initial`. The caller's value remains usable
    /// and independent afterwards.
    pub fn new(initial: &T) -> Self {
        let shape = T::shape();
        trace!("sealing a fresh clone of {}", shape.type_name());
        Self::from_owned(shape.clone_shallow(initial))
    }

    /// Wraps `value` without cloning.
    ///
    /// This is the construction path for serialization bridges: the value
    /// must be exclusively owned by the caller (it just came out of a
    /// deserializer, say), so the defensive clone of [`Sealed::new`] would
    /// only waste a copy cycle.
    pub fn from_owned(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Applies `project` to the live enclosed value. No copy is made for
    /// reads; a projection borrowing from the value borrows real internal
    /// data (see also [`Sealed::value`]).
    pub fn get<R>(&self, project: impl FnOnce(&T) -> R) -> R {
        project(&self.inner)
    }

    /// Borrows the enclosed value. This is the read half of the bridge
    /// contract; `Deref` offers the same access implicitly.
    pub fn value(&self) -> &T {
        &self.inner
    }

    /// Returns a new handle whose enclosed value has the named member set to
    /// `value`, coerced to the member's declared type and assigned through
    /// the member's own write logic. The original handle is untouched.
    ///
    /// Fails if the name resolves to no member or the value cannot be
    /// coerced; on failure the freshly cloned candidate is discarded, so no
    /// partially mutated value is ever published.
    pub fn set<V: FieldType>(&self, field: &str, value: V) -> Result<Self, FieldError> {
        self.set_value(field, value.into_value())
    }

    /// Dynamic-value form of [`Sealed::set`].
    pub fn set_value(&self, field: &str, value: FieldValue) -> Result<Self, FieldError> {
        let shape = T::shape();
        trace!("set {}.{} on a fresh clone", shape.type_name(), field);
        let mut next = shape.clone_shallow(&self.inner);
        shape.set_value(&mut next, field, value)?;
        Ok(Self::from_owned(next))
    }

    /// Runs an arbitrary mutation against a fresh clone of the enclosed
    /// value and returns a new handle over the result. The original handle
    /// is untouched.
    ///
    /// Note that `mutate` receives `&mut T`: direct field assignments in the
    /// closure are raw Rust writes and do not route through custom setters;
    /// the setter-honoring path is [`Sealed::set`].
    pub fn update(&self, mutate: impl FnOnce(&mut T)) -> Self {
        let mut next = T::shape().clone_shallow(&self.inner);
        mutate(&mut next);
        Self::from_owned(next)
    }

    /// Clones the enclosed value into a new mutable staging handle.
    pub fn to_draft(&self) -> Draft<T> {
        Draft::new(&self.inner)
    }
}

impl<T: Record> Clone for Sealed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Record> Deref for Sealed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Record> Default for Sealed<T> {
    fn default() -> Self {
        Self::from_owned(T::shape().construct())
    }
}

impl<T: Record> core::fmt::Debug for Sealed<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let shape = T::shape();
        let mut out = f.debug_struct(shape.type_name());
        for field in shape.fields() {
            if field.flags.contains(FieldFlags::SENSITIVE) {
                out.field(field.name, &"[redacted]");
            } else {
                out.field(field.name, &(field.read)(&self.inner));
            }
        }
        out.finish()
    }
}

/// A `Sealed<T>` can itself be a member of another record; it converts
/// through nested name/value pairs, so wrapped members serialize and assign
/// by name like any other record member.
impl<T: Record> FieldType for Sealed<T> {
    const KIND: FieldKind = FieldKind::Record;

    fn shallow_clone(&self) -> Self {
        // Handle copy: the enclosed value is shared, never duplicated.
        self.clone()
    }

    fn into_value(self) -> FieldValue {
        T::shape().to_record_value(&self.inner)
    }

    fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
        T::shape().from_record_value(value).map(Self::from_owned)
    }
}
