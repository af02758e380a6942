use std::fmt;

use smol_str::SmolStr;

use crate::writer::{FormatContext, FormatWriter};

/// Anything that renders to a complete `select` statement.
pub trait Query {
    fn query(&self) -> String;
}

impl<Q: Query + ?Sized> Query for &Q {
    fn query(&self) -> String {
        (**self).query()
    }
}

/// Hand-written SQL, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raw(SmolStr);

impl Raw {
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Query for Raw {
    fn query(&self) -> String {
        self.0.to_string()
    }
}

impl FormatWriter for Raw {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

pub trait IntoRaw {
    fn into_raw(self) -> Raw;
}

impl IntoRaw for Raw {
    fn into_raw(self) -> Raw {
        self
    }
}

impl IntoRaw for &'static str {
    fn into_raw(self) -> Raw {
        Raw::new_static(self)
    }
}

impl IntoRaw for String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

/// A query embedded as an operand, rendered as `(<query>)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subquery(SmolStr);

impl Subquery {
    pub fn new<Q: Query + ?Sized>(query: &Q) -> Self {
        Self(smol_str::format_smolstr!("({})", query.query()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn into_sql(self) -> SmolStr {
        self.0
    }
}

macro_rules! impl_subquery_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Subquery {
                fn from(value: $ty) -> Self {
                    Subquery::new(&value.into_raw())
                }
            }
        )+
    };
}

impl_subquery_from!(Raw, &'static str, String);

impl FormatWriter for Subquery {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

/// Wraps `query` for use as a predicate operand.
pub fn sub<Q: Query + ?Sized>(query: &Q) -> Subquery {
    Subquery::new(query)
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer;

    use super::*;

    struct Select(&'static str);

    impl Query for Select {
        fn query(&self) -> String {
            format!("select \"id\" from \"{}\"", self.0)
        }
    }

    #[test]
    fn test_subquery_parenthesised() {
        let subquery = sub(&Select("roles"));
        assert_eq!("(select \"id\" from \"roles\")", subquery.as_str());
        assert_eq!("(select \"id\" from \"roles\")", format_writer(subquery));
    }

    #[test]
    fn test_subquery_from_raw() {
        let subquery = Subquery::from("select 1");
        assert_eq!("(select 1)", subquery.as_str());
        let subquery: Subquery = String::from("select max(\"age\") from \"users\"").into();
        assert_eq!("(select max(\"age\") from \"users\")", subquery.as_str());
    }

    #[test]
    fn test_raw_query() {
        let raw = Raw::new_static("select * from \"users\"");
        assert_eq!("select * from \"users\"", raw.query());
        assert_eq!("select * from \"users\"", format_writer(raw));
    }
}
