use alloc::boxed::Box;
use core::any::Any;

/// A type-erased, clonable member value.
///
/// This is the extension point for member types outside the built-in kinds:
/// a manual [`crate::FieldType`] impl can round-trip its values through an
/// `OpaqueValue`, and by-name assignment recovers the concrete type with
/// [`OpaqueValue::downcast`].
pub struct OpaqueValue {
    type_name: &'static str,
    value: Box<dyn AnyClone>,
}

trait AnyClone: Any {
    fn clone_box(&self) -> Box<dyn AnyClone>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Clone> AnyClone for T {
    fn clone_box(&self) -> Box<dyn AnyClone> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl OpaqueValue {
    /// Erases `value`.
    pub fn new<T: Any + Clone>(value: T) -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Type name of the erased value, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if the erased value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.as_any().is::<T>()
    }

    /// Recovers the erased value, or returns `self` unchanged if it holds a
    /// different type.
    pub fn downcast<T: Any>(self) -> Result<T, OpaqueValue> {
        if self.value.as_any().is::<T>() {
            match self.value.into_any().downcast::<T>() {
                Ok(value) => Ok(*value),
                // `is` was checked right above
                Err(_) => unreachable!(),
            }
        } else {
            Err(self)
        }
    }

    /// Borrows the erased value, if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }
}

impl Clone for OpaqueValue {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            value: self.value.clone_box(),
        }
    }
}

impl core::fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "OpaqueValue({})", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_recovers_the_erased_value() {
        let opaque = OpaqueValue::new(1234u32);
        assert!(opaque.is::<u32>());
        assert_eq!(opaque.downcast_ref::<u32>(), Some(&1234));
        assert_eq!(opaque.downcast::<u32>().ok(), Some(1234));
    }

    #[test]
    fn downcast_to_the_wrong_type_hands_the_value_back() {
        let opaque = OpaqueValue::new(1234u32);
        let opaque = opaque.downcast::<u64>().unwrap_err();
        assert_eq!(opaque.downcast::<u32>().ok(), Some(1234));
    }

    #[test]
    fn clones_are_independent() {
        let original = OpaqueValue::new(alloc::vec![1, 2, 3]);
        let copy = original.clone();
        let mut recovered = copy.downcast::<alloc::vec::Vec<i32>>().ok().unwrap();
        recovered.push(4);
        assert_eq!(
            original.downcast_ref::<alloc::vec::Vec<i32>>(),
            Some(&alloc::vec![1, 2, 3])
        );
    }
}
