use std::fmt;

use predicate_derive::PredicateBuilder;

use crate::writer::FormatWriter;

/// The closed set of comparison and membership operations.
///
/// The `compare` and `membership` variants each get a builder method on
/// [`Column`](crate::Column) and [`Aggregate`](crate::Aggregate), the like
/// variants are reached through the pattern builders instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PredicateBuilder)]
pub enum Operator {
    #[predicate(compare)]
    Equal,
    #[predicate(compare)]
    NotEqual,
    #[predicate(compare)]
    Greater,
    #[predicate(compare)]
    GreaterOrEqual,
    #[predicate(compare)]
    Less,
    #[predicate(compare)]
    LessOrEqual,
    #[predicate(membership, rename = "is_in")]
    In,
    #[predicate(membership)]
    NotIn,
    Like,
    NotLike,
}

impl Operator {
    pub const fn token(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }

    pub const fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    pub const fn is_pattern(&self) -> bool {
        matches!(self, Operator::Like | Operator::NotLike)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FormatWriter for Operator {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut crate::writer::FormatContext<'_, W>,
    ) -> fmt::Result {
        context.writer.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer;

    use super::*;

    #[test]
    fn test_tokens() {
        assert_eq!("=", format_writer(Operator::Equal));
        assert_eq!("!=", format_writer(Operator::NotEqual));
        assert_eq!(">=", format_writer(Operator::GreaterOrEqual));
        assert_eq!("<=", format_writer(Operator::LessOrEqual));
        assert_eq!("NOT IN", format_writer(Operator::NotIn));
        assert_eq!("NOT LIKE", Operator::NotLike.to_string());
    }

    #[test]
    fn test_families() {
        assert!(Operator::In.is_membership());
        assert!(!Operator::Equal.is_membership());
        assert!(Operator::NotLike.is_pattern());
        assert!(!Operator::NotIn.is_pattern());
    }
}
