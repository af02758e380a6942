//! Operand-shape resolution.
//!
//! Each builder method on [`Column`] and [`Aggregate`](crate::Aggregate) takes its right-hand
//! side through one of the traits below. The implementing type decides which
//! predicate is built, so an unsupported combination does not type-check:
//!
//! ```compile_fail
//! use predicate::{Column, TableSchema};
//!
//! struct User;
//! impl TableSchema for User {
//!     fn entity() -> &'static str { "users" }
//! }
//!
//! let age = Column::<User, i32>::new("age");
//! // a string is not a value of an integer column
//! let _ = age.equal("thirty");
//! ```
//!
//! ```compile_fail
//! use predicate::{Column, TableSchema, sub};
//!
//! struct User;
//! impl TableSchema for User {
//!     fn entity() -> &'static str { "users" }
//! }
//!
//! let total = Column::<User, f64>::new("total").sum();
//! // aggregates compare against numbers only
//! let _ = total.greater(String::from("10"));
//! ```

use std::fmt;

use smol_str::SmolStr;
use tracing::trace;

use crate::{
    col::Column,
    format::format_value,
    operator::Operator,
    predicate::{JoinPredicate, Predicate, PredicateValue, Render},
    query::Subquery,
    value::{Numeric, RawValue, SqlValue, Value},
};

/// Right-hand sides a column of `T` can be compared with.
pub trait ColumnOperand<T> {
    type Output: Render;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Self::Output;
}

/// Right-hand sides a column of `T` can be tested for membership in.
pub trait ColumnMembership<T> {
    type Output: Render;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Self::Output;
}

/// Right-hand sides an aggregate over a column of `T` can be compared with.
pub trait AggregateOperand<T> {
    type Output: Render;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Self::Output;
}

/// Right-hand sides an aggregate can be tested for membership in.
pub trait AggregateMembership<T> {
    type Output: Render;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Self::Output;
}

fn predicate<T>(lhs: SmolStr, operator: Operator, value: PredicateValue<T>) -> Predicate<T> {
    trace!(lhs = %lhs, %operator, kind = %value.kind(), "resolved predicate");
    Predicate::new(lhs, operator, value)
}

fn join(lhs: SmolStr, operator: Operator, rhs: SmolStr) -> JoinPredicate {
    trace!(lhs = %lhs, %operator, rhs = %rhs, "resolved join predicate");
    JoinPredicate::new(lhs, operator, rhs)
}

fn raw_values<'a, T, I>(values: I) -> Vec<Value>
where
    T: RawValue + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values
        .into_iter()
        .map(|value| value.raw_value().to_value())
        .collect()
}

// column, compare

impl<T: SqlValue> ColumnOperand<T> for Option<T> {
    type Output = Predicate<T>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<T> {
        predicate(lhs, operator, PredicateValue::SingleOptional(self))
    }
}

impl<T: RawValue> ColumnOperand<T> for T {
    type Output = Predicate<T>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<T> {
        let raw = self.raw_value().to_value();
        predicate(lhs, operator, PredicateValue::Boxed(raw))
    }
}

impl<T, M, U> ColumnOperand<T> for Column<M, U> {
    type Output = JoinPredicate;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> JoinPredicate {
        join(lhs, operator, self.query_value())
    }
}

impl<'a> ColumnOperand<String> for &'a str {
    type Output = Predicate<String>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<String> {
        predicate(lhs, operator, PredicateValue::Single(self.to_owned()))
    }
}

// column, membership

impl<T: SqlValue> ColumnMembership<T> for Vec<Option<T>> {
    type Output = Predicate<T>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<T> {
        predicate(lhs, operator, PredicateValue::ArrayOfOptionals(self))
    }
}

impl<T: SqlValue, const N: usize> ColumnMembership<T> for [Option<T>; N] {
    type Output = Predicate<T>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<T> {
        predicate(lhs, operator, PredicateValue::ArrayOfOptionals(self.into()))
    }
}

impl<T: RawValue> ColumnMembership<T> for Vec<T> {
    type Output = Predicate<T>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<T> {
        predicate(lhs, operator, PredicateValue::ArrayOfBoxed(raw_values(&self)))
    }
}

impl<T: RawValue, const N: usize> ColumnMembership<T> for [T; N] {
    type Output = Predicate<T>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<T> {
        predicate(lhs, operator, PredicateValue::ArrayOfBoxed(raw_values(&self)))
    }
}

impl<'a> ColumnMembership<String> for Vec<&'a str> {
    type Output = Predicate<String>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<String> {
        let values = self.into_iter().map(str::to_owned).collect();
        predicate(lhs, operator, PredicateValue::Array(values))
    }
}

impl<T> ColumnMembership<T> for Subquery {
    type Output = Predicate<Value>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<Value> {
        predicate(lhs, operator, PredicateValue::Raw(self.into_sql()))
    }
}

macro_rules! impl_scalar_operand {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ColumnOperand<$ty> for $ty {
                type Output = Predicate<$ty>;

                fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<$ty> {
                    predicate(lhs, operator, PredicateValue::Single(self))
                }
            }

            impl ColumnMembership<$ty> for Vec<$ty> {
                type Output = Predicate<$ty>;

                fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<$ty> {
                    predicate(lhs, operator, PredicateValue::Array(self))
                }
            }

            impl<const N: usize> ColumnMembership<$ty> for [$ty; N] {
                type Output = Predicate<$ty>;

                fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<$ty> {
                    predicate(lhs, operator, PredicateValue::Array(self.into()))
                }
            }
        )+
    };
}

impl_scalar_operand!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

#[cfg(feature = "uuid")]
impl_scalar_operand!(uuid::Uuid);

// aggregate

impl<K: Numeric, T> AggregateOperand<T> for K {
    type Output = Predicate<K>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<K> {
        predicate(lhs, operator, PredicateValue::Boxed(self.to_value()))
    }
}

impl<T> AggregateOperand<T> for Subquery {
    type Output = Predicate<Value>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<Value> {
        predicate(lhs, operator, PredicateValue::Raw(self.into_sql()))
    }
}

impl<T, M, U> AggregateOperand<T> for Column<M, U> {
    type Output = JoinPredicate;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> JoinPredicate {
        join(lhs, operator, self.query_value())
    }
}

impl<K: Numeric, T> AggregateMembership<T> for Vec<K> {
    type Output = Predicate<K>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<K> {
        let values = self.iter().map(SqlValue::to_value).collect();
        predicate(lhs, operator, PredicateValue::ArrayOfBoxed(values))
    }
}

impl<K: Numeric, T, const N: usize> AggregateMembership<T> for [K; N] {
    type Output = Predicate<K>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<K> {
        let values = self.iter().map(SqlValue::to_value).collect();
        predicate(lhs, operator, PredicateValue::ArrayOfBoxed(values))
    }
}

impl<T> AggregateMembership<T> for Subquery {
    type Output = Predicate<Value>;

    fn resolve(self, lhs: SmolStr, operator: Operator) -> Predicate<Value> {
        predicate(lhs, operator, PredicateValue::Raw(self.into_sql()))
    }
}

// patterns

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternMode {
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
    /// `%value%`
    Contains,
}

impl PatternMode {
    pub fn wrap(&self, value: &str) -> String {
        match self {
            PatternMode::StartsWith => format!("{value}%"),
            PatternMode::EndsWith => format!("%{value}"),
            PatternMode::Contains => format!("%{value}%"),
        }
    }
}

fn pattern<T, V>(lhs: SmolStr, operator: Operator, mode: PatternMode, value: &V) -> Predicate<T>
where
    V: fmt::Display + ?Sized,
{
    let text = mode.wrap(&value.to_string());
    let sql = format_value(Some(&Value::String(text)));
    predicate(lhs, operator, PredicateValue::Raw(sql.into()))
}

impl<M, T> Column<M, T>
where
    T: SqlValue + fmt::Display,
{
    pub fn like<V: Into<T>>(&self, mode: PatternMode, value: V) -> Predicate<T> {
        let value: T = value.into();
        pattern(self.query_value(), Operator::Like, mode, &value)
    }

    pub fn not_like<V: Into<T>>(&self, mode: PatternMode, value: V) -> Predicate<T> {
        let value: T = value.into();
        pattern(self.query_value(), Operator::NotLike, mode, &value)
    }

    pub fn starts_with<V: Into<T>>(&self, value: V) -> Predicate<T> {
        self.like(PatternMode::StartsWith, value)
    }

    pub fn ends_with<V: Into<T>>(&self, value: V) -> Predicate<T> {
        self.like(PatternMode::EndsWith, value)
    }

    pub fn contains<V: Into<T>>(&self, value: V) -> Predicate<T> {
        self.like(PatternMode::Contains, value)
    }

    pub fn not_starts_with<V: Into<T>>(&self, value: V) -> Predicate<T> {
        self.not_like(PatternMode::StartsWith, value)
    }

    pub fn not_ends_with<V: Into<T>>(&self, value: V) -> Predicate<T> {
        self.not_like(PatternMode::EndsWith, value)
    }

    pub fn not_contains<V: Into<T>>(&self, value: V) -> Predicate<T> {
        self.not_like(PatternMode::Contains, value)
    }
}
