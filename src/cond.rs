use std::fmt;

use crate::{
    predicate::Render,
    writer::{self, FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
    AndNot,
    OrNot,
}

impl FormatWriter for Conjunction {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            Conjunction::And => context.writer.write_str("AND"),
            Conjunction::Or => context.writer.write_str("OR"),
            Conjunction::AndNot => context.writer.write_str("AND NOT"),
            Conjunction::OrNot => context.writer.write_str("OR NOT"),
        }
    }
}

enum ConditionKind {
    Predicate(Box<dyn Render + Send + Sync>),
    Group(Conditions),
}

impl FormatWriter for ConditionKind {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            ConditionKind::Predicate(predicate) => context.writer.write_str(&predicate.render()),
            ConditionKind::Group(group) => {
                context.writer.write_char('(')?;
                group.format_writer(context)?;
                context.writer.write_char(')')
            }
        }
    }
}

struct Condition {
    conjunction: Conjunction,
    kind: ConditionKind,
}

/// Predicates chained with conjunctions, rendered left to right.
///
/// The first conjunction is not written, so the result can follow a
/// `WHERE` directly.
#[derive(Default)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<P>(&mut self, conjunction: Conjunction, predicate: P) -> &mut Self
    where
        P: Render + Send + Sync + 'static,
    {
        self.0.push(Condition {
            conjunction,
            kind: ConditionKind::Predicate(Box::new(predicate)),
        });
        self
    }

    pub fn and<P>(&mut self, predicate: P) -> &mut Self
    where
        P: Render + Send + Sync + 'static,
    {
        self.push(Conjunction::And, predicate)
    }

    pub fn or<P>(&mut self, predicate: P) -> &mut Self
    where
        P: Render + Send + Sync + 'static,
    {
        self.push(Conjunction::Or, predicate)
    }

    pub fn and_not<P>(&mut self, predicate: P) -> &mut Self
    where
        P: Render + Send + Sync + 'static,
    {
        self.push(Conjunction::AndNot, predicate)
    }

    pub fn or_not<P>(&mut self, predicate: P) -> &mut Self
    where
        P: Render + Send + Sync + 'static,
    {
        self.push(Conjunction::OrNot, predicate)
    }

    /// Adds the conditions built by `closure` as a parenthesised group.
    pub fn group<F>(&mut self, conjunction: Conjunction, closure: F) -> &mut Self
    where
        F: FnOnce(&mut Conditions),
    {
        let mut inner = Conditions::new();
        closure(&mut inner);
        if !inner.is_empty() {
            self.0.push(Condition {
                conjunction,
                kind: ConditionKind::Group(inner),
            });
        }
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FormatWriter for Conditions {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        for (index, condition) in self.0.iter().enumerate() {
            if index > 0 {
                context.writer.write_char(' ')?;
                condition.conjunction.format_writer(context)?;
                context.writer.write_char(' ')?;
            } else if matches!(condition.conjunction, Conjunction::AndNot | Conjunction::OrNot) {
                context.writer.write_str("NOT ")?;
            }
            condition.kind.format_writer(context)?;
        }
        Ok(())
    }
}

impl Render for Conditions {
    fn render(&self) -> String {
        writer::render_to_string(self)
    }
}

impl fmt::Debug for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Conditions").field(&self.render()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Column, JoinPredicate, Operator, TableSchema};

    use super::*;

    struct User;

    impl TableSchema for User {
        fn entity() -> &'static str {
            "users"
        }
    }

    fn age() -> Column<User, i32> {
        Column::new("age")
    }

    #[test]
    fn test_empty() {
        assert_eq!("", Conditions::new().render());
        assert!(Conditions::new().is_empty());
    }

    #[test]
    fn test_chain() {
        let mut conds = Conditions::new();
        conds
            .and(age().greater(18))
            .and(age().less(Some(65)))
            .or(age().equal(None));
        assert_eq!(
            "\"_users_\".\"age\" > 18 AND \"_users_\".\"age\" < 65 OR \"_users_\".\"age\" IS NULL",
            conds.render()
        );
        assert_eq!(3, conds.len());
    }

    #[test]
    fn test_leading_not() {
        let mut conds = Conditions::new();
        conds.and_not(age().is_in(vec![1, 2]));
        assert_eq!("NOT \"_users_\".\"age\" IN (1,2)", conds.render());
    }

    #[test]
    fn test_group() {
        let mut conds = Conditions::new();
        conds
            .and(JoinPredicate::new("a", Operator::Equal, "b"))
            .group(Conjunction::Or, |inner| {
                inner.and(age().equal(1)).or_not(age().equal(2));
            })
            .group(Conjunction::And, |_| {});
        assert_eq!(
            "a = b OR (\"_users_\".\"age\" = 1 OR NOT \"_users_\".\"age\" = 2)",
            conds.render()
        );
    }
}
