use smol_str::SmolStr;

/// A literal with its static type erased, ready for the formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    StaticString(&'static str),
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    Bool(bool),
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    /// Anything else, written out with its display text.
    Other(SmolStr),
}

/// A typed value with a SQL literal form.
pub trait SqlValue {
    fn to_value(&self) -> Value;
}

/// An enum-like value stored through an underlying representation.
///
/// Predicates against such values compare the raw storage value:
///
/// ```
/// use predicate::{RawValue, SqlValue, format_value};
///
/// enum Role {
///     Admin,
///     Member,
/// }
///
/// impl RawValue for Role {
///     type Raw = &'static str;
///
///     fn raw_value(&self) -> &'static str {
///         match self {
///             Role::Admin => "admin",
///             Role::Member => "member",
///         }
///     }
/// }
/// assert_eq!("'admin'", format_value(Some(&Role::Admin.to_value())));
/// ```
pub trait RawValue {
    type Raw: SqlValue;

    fn raw_value(&self) -> Self::Raw;
}

/// Numbers an aggregate expression can be compared against.
pub trait Numeric: SqlValue {}

impl<T: RawValue> SqlValue for T {
    #[inline]
    fn to_value(&self) -> Value {
        self.raw_value().to_value()
    }
}

impl<T: SqlValue> SqlValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl SqlValue for Value {
    #[inline]
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl SqlValue for String {
    #[inline]
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl SqlValue for &'static str {
    #[inline]
    fn to_value(&self) -> Value {
        Value::StaticString(*self)
    }
}

impl SqlValue for SmolStr {
    #[inline]
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl SqlValue for bool {
    #[inline]
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_numeric {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl SqlValue for $ty {
                #[inline]
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }

            impl Numeric for $ty {}
        )+
    };
}

impl_numeric! {
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
}

#[cfg(feature = "uuid")]
impl SqlValue for uuid::Uuid {
    #[inline]
    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

#[cfg(any(feature = "chrono", feature = "time", feature = "json"))]
macro_rules! impl_display_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SqlValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Other(smol_str::format_smolstr!("{}", self))
                }
            }
        )+
    };
}

#[cfg(feature = "chrono")]
impl_display_value!(
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::NaiveTime,
    chrono::DateTime<chrono::Utc>,
);

#[cfg(feature = "time")]
impl_display_value!(
    time::Date,
    time::PrimitiveDateTime,
    time::OffsetDateTime,
    time::Time,
);

#[cfg(feature = "json")]
impl_display_value!(serde_json::Value);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Status {
        Active,
        Banned,
    }

    impl RawValue for Status {
        type Raw = i16;

        fn raw_value(&self) -> i16 {
            match self {
                Status::Active => 1,
                Status::Banned => 2,
            }
        }
    }

    #[test]
    fn test_raw_value_unwraps_storage() {
        assert_eq!(Value::I16(1), Status::Active.to_value());
        assert_eq!(Value::I16(2), Status::Banned.to_value());
    }

    #[test]
    fn test_option_to_value() {
        assert_eq!(Value::Null, None::<i32>.to_value());
        assert_eq!(Value::I64(7), Some(7i64).to_value());
        assert_eq!(Value::I16(2), Some(Status::Banned).to_value());
    }

    #[test]
    fn test_strings() {
        assert_eq!(Value::StaticString("bob"), "bob".to_value());
        assert_eq!(Value::String("bob".into()), String::from("bob").to_value());
        assert_eq!(Value::String("bob".into()), SmolStr::new("bob").to_value());
    }
}
