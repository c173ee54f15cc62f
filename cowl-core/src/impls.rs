use alloc::string::String;
use alloc::vec::Vec;

use crate::{CoerceError, FieldKind, FieldType, FieldValue};

/// Truncates toward zero. Rejects non-finite values and anything outside
/// `u64`'s range.
fn float_to_u64(value: f64) -> Option<u64> {
    if !value.is_finite() || value <= -1.0 || value >= 18_446_744_073_709_551_616.0 {
        return None;
    }
    Some(value as u64)
}

/// Truncates toward zero. Rejects non-finite values and anything outside
/// `i64`'s range.
fn float_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite()
        || value < -9_223_372_036_854_775_808.0
        || value >= 9_223_372_036_854_775_808.0
    {
        return None;
    }
    Some(value as i64)
}

macro_rules! impl_field_type_uint {
    ($($ty:ty),*) => {$(
        impl FieldType for $ty {
            const KIND: FieldKind = FieldKind::UInt;

            fn shallow_clone(&self) -> Self {
                *self
            }

            fn into_value(self) -> FieldValue {
                FieldValue::UInt(self as u64)
            }

            fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
                let actual = value.kind();
                let wide = match value {
                    FieldValue::UInt(v) => Some(v),
                    FieldValue::Int(v) => u64::try_from(v).ok(),
                    FieldValue::Float(v) => float_to_u64(v),
                    _ => return Err(CoerceError::wrong_kind(Self::KIND, actual)),
                };
                wide.and_then(|v| <$ty>::try_from(v).ok())
                    .ok_or(CoerceError::out_of_range(Self::KIND, actual))
            }
        }
    )*};
}

impl_field_type_uint!(u8, u16, u32, u64, usize);

macro_rules! impl_field_type_int {
    ($($ty:ty),*) => {$(
        impl FieldType for $ty {
            const KIND: FieldKind = FieldKind::Int;

            fn shallow_clone(&self) -> Self {
                *self
            }

            fn into_value(self) -> FieldValue {
                FieldValue::Int(self as i64)
            }

            fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
                let actual = value.kind();
                let wide = match value {
                    FieldValue::Int(v) => Some(v),
                    FieldValue::UInt(v) => i64::try_from(v).ok(),
                    FieldValue::Float(v) => float_to_i64(v),
                    _ => return Err(CoerceError::wrong_kind(Self::KIND, actual)),
                };
                wide.and_then(|v| <$ty>::try_from(v).ok())
                    .ok_or(CoerceError::out_of_range(Self::KIND, actual))
            }
        }
    )*};
}

impl_field_type_int!(i8, i16, i32, i64, isize);

impl FieldType for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn shallow_clone(&self) -> Self {
        *self
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Float(self)
    }

    fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
        match value {
            FieldValue::Float(v) => Ok(v),
            FieldValue::Int(v) => Ok(v as f64),
            FieldValue::UInt(v) => Ok(v as f64),
            v => Err(CoerceError::wrong_kind(Self::KIND, v.kind())),
        }
    }
}

impl FieldType for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn shallow_clone(&self) -> Self {
        *self
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Float(self as f64)
    }

    fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn shallow_clone(&self) -> Self {
        *self
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }

    fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
        match value {
            FieldValue::Bool(v) => Ok(v),
            v => Err(CoerceError::wrong_kind(Self::KIND, v.kind())),
        }
    }
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn shallow_clone(&self) -> Self {
        self.clone()
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Text(self)
    }

    fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
        match value {
            FieldValue::Text(v) => Ok(v),
            v => Err(CoerceError::wrong_kind(Self::KIND, v.kind())),
        }
    }
}

impl<V: FieldType> FieldType for Option<V> {
    const KIND: FieldKind = FieldKind::Optional;

    fn shallow_clone(&self) -> Self {
        self.as_ref().map(FieldType::shallow_clone)
    }

    fn into_value(self) -> FieldValue {
        match self {
            None => FieldValue::Absent,
            Some(v) => v.into_value(),
        }
    }

    fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
        match value {
            FieldValue::Absent => Ok(None),
            v => V::from_value(v).map(Some),
        }
    }
}

impl<V: FieldType> FieldType for Vec<V> {
    const KIND: FieldKind = FieldKind::List;

    fn shallow_clone(&self) -> Self {
        self.iter().map(FieldType::shallow_clone).collect()
    }

    fn into_value(self) -> FieldValue {
        FieldValue::List(self.into_iter().map(FieldType::into_value).collect())
    }

    fn from_value(value: FieldValue) -> Result<Self, CoerceError> {
        match value {
            FieldValue::List(items) => items.into_iter().map(V::from_value).collect(),
            v => Err(CoerceError::wrong_kind(Self::KIND, v.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueKind;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn uint_widening_and_narrowing() {
        assert_eq!(u64::from_value(FieldValue::UInt(7)), Ok(7));
        assert_eq!(u8::from_value(FieldValue::Int(200)), Ok(200));
        assert_eq!(
            u8::from_value(FieldValue::Int(300)),
            Err(CoerceError::out_of_range(FieldKind::UInt, ValueKind::Int))
        );
        assert_eq!(
            u32::from_value(FieldValue::Int(-1)),
            Err(CoerceError::out_of_range(FieldKind::UInt, ValueKind::Int))
        );
    }

    #[test]
    fn float_into_integer_truncates_toward_zero() {
        assert_eq!(u64::from_value(FieldValue::Float(1.9)), Ok(1));
        assert_eq!(i64::from_value(FieldValue::Float(-1.9)), Ok(-1));
        assert_eq!(u64::from_value(FieldValue::Float(-0.5)), Ok(0));
        assert_eq!(
            u64::from_value(FieldValue::Float(f64::NAN)),
            Err(CoerceError::out_of_range(FieldKind::UInt, ValueKind::Float))
        );
        assert_eq!(
            i32::from_value(FieldValue::Float(1e300)),
            Err(CoerceError::out_of_range(FieldKind::Int, ValueKind::Float))
        );
    }

    #[test]
    fn incompatible_kinds_are_rejected() {
        assert_eq!(
            u64::from_value(FieldValue::Text("1".to_string())),
            Err(CoerceError::wrong_kind(FieldKind::UInt, ValueKind::Text))
        );
        assert_eq!(
            bool::from_value(FieldValue::Int(1)),
            Err(CoerceError::wrong_kind(FieldKind::Bool, ValueKind::Int))
        );
    }

    #[test]
    fn optional_members_accept_absent_and_present() {
        assert_eq!(Option::<u32>::from_value(FieldValue::Absent), Ok(None));
        assert_eq!(
            Option::<u32>::from_value(FieldValue::Float(2.5)),
            Ok(Some(2))
        );
        assert_eq!(Option::<String>::None.into_value(), FieldValue::Absent);
    }

    #[test]
    fn lists_convert_elementwise() {
        let value = vec![1u32, 2, 3].into_value();
        assert_eq!(
            value,
            FieldValue::List(vec![
                FieldValue::UInt(1),
                FieldValue::UInt(2),
                FieldValue::UInt(3)
            ])
        );
        assert_eq!(
            Vec::<u32>::from_value(FieldValue::List(vec![FieldValue::Float(1.5)])),
            Ok(vec![1])
        );
    }
}
