use core::ops::Deref;

use cowl_core::{FieldError, FieldType, FieldValue, Record};

use crate::Sealed;
use crate::trace;

/// A mutable staging handle for batching changes before freezing them into a
/// [`Sealed<T>`].
///
/// Unlike `Sealed`, a `Draft` owns its value outright and mutates it in
/// place: no cloning per change, and side effects of one
/// [`update`](Draft::update) are visible to the next. Freezing with
/// [`seal`](Draft::seal) clones one final time, so later draft mutation can
/// never retroactively affect a wrapper already produced.
///
/// A single `Draft` is not synchronized; mutating it from several threads
/// requires external coordination (the `&mut` receivers enforce this at
/// compile time).
pub struct Draft<T: Record> {
    value: T,
}

impl<T: Record> Draft<T> {
    /// Stages a shallow clone of `initial`.
    pub fn new(initial: &T) -> Self {
        let shape = T::shape();
        trace!("drafting a fresh clone of {}", shape.type_name());
        Self {
            value: shape.clone_shallow(initial),
        }
    }

    /// Stages `value` without cloning; the caller must own it exclusively.
    pub fn from_owned(value: T) -> Self {
        Self { value }
    }

    /// Runs a mutation directly against the live staged value and returns
    /// the same draft, for fluent chaining.
    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) -> &mut Self {
        mutate(&mut self.value);
        self
    }

    /// Coerces `value` into the named member's declared type and assigns it
    /// in place, through the member's own write logic.
    pub fn set<V: FieldType>(&mut self, field: &str, value: V) -> Result<&mut Self, FieldError> {
        self.set_value(field, value.into_value())
    }

    /// Dynamic-value form of [`Draft::set`].
    pub fn set_value(&mut self, field: &str, value: FieldValue) -> Result<&mut Self, FieldError> {
        T::shape().set_value(&mut self.value, field, value)?;
        Ok(self)
    }

    /// Applies `project` to the live staged value.
    pub fn get<R>(&self, project: impl FnOnce(&T) -> R) -> R {
        project(&self.value)
    }

    /// Borrows the live staged value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Freezes a clone of the staged value into a new read-only handle.
    /// Further mutation of this draft does not affect the returned wrapper.
    pub fn seal(&self) -> Sealed<T> {
        Sealed::new(&self.value)
    }

    /// Unwraps the staged value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Record> Deref for Draft<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Record> Default for Draft<T> {
    fn default() -> Self {
        Self::from_owned(T::shape().construct())
    }
}

impl<T: Record> core::fmt::Debug for Draft<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let shape = T::shape();
        write!(f, "Draft<")?;
        f.write_str(shape.type_name())?;
        write!(f, ">")
    }
}
