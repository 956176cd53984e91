//! Tagged SQL values.
//!
//! Field values cross the generator boundary as [`SqlValue`], a sum type
//! over the supported column value kinds. The executor binds them to named
//! parameters; nothing in this crate ever renders a value into SQL text.

use chrono::{DateTime, Utc};

/// A SQL column value to be bound to a named parameter.
///
/// Structural equality on `SqlValue` is the deep-equality relation used by
/// the field differ: two fields are unchanged exactly when their values
/// compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Timestamp value (UTC).
    Timestamp(DateTime<Utc>),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns `true` if this value is NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Trait for types that can be converted to a [`SqlValue`].
///
/// Implemented for the usual scalar column types; `#[derive(Record)]`
/// requires it (together with `Clone`) on every scalar field.
pub trait ToSqlValue {
    /// Converts the value to a [`SqlValue`].
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_to_sql_value_int {
    ($($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )+
    };
}

impl_to_sql_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Timestamp(self)
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(7_u8.to_sql_value(), SqlValue::Int(7));
        assert_eq!(2.5_f64.to_sql_value(), SqlValue::Float(2.5));
        assert_eq!(
            "hello".to_sql_value(),
            SqlValue::Text(String::from("hello"))
        );
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(42_i32).to_sql_value(), SqlValue::Int(42));
        assert!(None::<String>.to_sql_value().is_null());
    }

    #[test]
    fn test_timestamp_conversion() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0).unwrap();
        assert_eq!(ts.to_sql_value(), SqlValue::Timestamp(ts));
    }

    #[test]
    fn test_blob_conversion() {
        let bytes: &[u8] = &[0x48, 0x49];
        assert_eq!(bytes.to_sql_value(), SqlValue::Blob(vec![0x48, 0x49]));
    }

    #[test]
    fn test_identity_conversion() {
        let value = SqlValue::Text(String::from("as-is"));
        assert_eq!(value.clone().to_sql_value(), value);
    }

    #[test]
    fn test_structural_equality_is_deep() {
        assert_eq!(
            SqlValue::Blob(vec![1, 2, 3]),
            SqlValue::Blob(vec![1, 2, 3])
        );
        assert_ne!(SqlValue::Int(1), SqlValue::Float(1.0));
        assert_ne!(SqlValue::Null, SqlValue::Text(String::new()));
    }
}
