//! How validators look at field values.

/// A value that can be checked by the built-in validators.
///
/// Implementations answer three questions: is the value missing, what text
/// does it hold, and what number does it hold. The built-in rules derive
/// emptiness, truthiness and length from those answers.
pub trait FieldValue {
    /// True when there is no value at all.
    fn is_missing(&self) -> bool {
        false
    }

    /// The value as text, for values that are text.
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// The value as a number, for values that are numeric.
    fn as_number(&self) -> Option<f64> {
        None
    }

    /// Missing or the empty string. Numbers, zero included, are never empty.
    fn is_empty_value(&self) -> bool {
        self.is_missing() || self.as_text() == Some("")
    }

    /// False for missing values, the empty string, zero and NaN.
    fn is_truthy(&self) -> bool {
        if self.is_missing() {
            return false;
        }
        if let Some(text) = self.as_text() {
            return !text.is_empty();
        }
        match self.as_number() {
            Some(n) => n != 0.0 && !n.is_nan(),
            None => true,
        }
    }

    /// Length in characters of a text value.
    fn char_len(&self) -> Option<usize> {
        self.as_text().map(|text| text.chars().count())
    }
}

impl FieldValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FieldValue for &'static str {
    fn as_text(&self) -> Option<&str> {
        Some(*self)
    }
}

macro_rules! impl_numeric_field_value {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn as_number(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<V: FieldValue> FieldValue for Option<V> {
    fn is_missing(&self) -> bool {
        self.as_ref().is_none_or(FieldValue::is_missing)
    }

    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(FieldValue::as_text)
    }

    fn as_number(&self) -> Option<f64> {
        self.as_ref().and_then(FieldValue::as_number)
    }
}
