//! Typed column predicates rendered to inline SQL.
//!
//! ```
//! use predicate::{Column, Render, TableSchema};
//!
//! struct User;
//!
//! impl TableSchema for User {
//!     fn entity() -> &'static str {
//!         "users"
//!     }
//! }
//!
//! let age = Column::<User, i32>::new("age");
//! let name = Column::<User, String>::new("name");
//!
//! assert_eq!("\"_users_\".\"age\" = 30", age.equal(Some(30)).render());
//! assert_eq!("\"_users_\".\"age\" IS NULL", age.equal(None).render());
//! assert_eq!("\"_users_\".\"age\" IN (1,2,3)", age.is_in(vec![1, 2, 3]).render());
//! assert_eq!("\"_users_\".\"name\" LIKE '%bob%'", name.contains("bob").render());
//! ```

mod col;
mod cond;
mod format;
mod operator;
mod predicate;
mod query;
mod resolve;
mod table;
mod value;
mod writer;

pub use col::{Aggregate, AggregateFunction, Column};
pub use cond::{Conditions, Conjunction};
pub use format::format_value;
pub use operator::Operator;
pub use predicate::{JoinPredicate, Predicate, PredicateValue, PredicateValueKind, Render};
pub use query::{IntoRaw, Query, Raw, Subquery, sub};
pub use resolve::{
    AggregateMembership, AggregateOperand, ColumnMembership, ColumnOperand, PatternMode,
};
pub use table::{Table, TableSchema};
pub use value::{Numeric, RawValue, SqlValue, Value};

pub fn raw_static(value: &'static str) -> Raw {
    Raw::new_static(value)
}

pub fn raw(value: &str) -> Raw {
    Raw::new(value)
}
