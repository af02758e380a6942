use std::fmt::{self, Write};

use smol_str::SmolStr;

use crate::{
    format::write_value,
    operator::Operator,
    value::{SqlValue, Value},
    writer::{self, FormatContext, FormatWriter},
};

/// A rendered-on-demand SQL boolean fragment.
pub trait Render {
    fn render(&self) -> String;
}

impl<R: Render + ?Sized> Render for &R {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<R: Render + ?Sized> Render for Box<R> {
    fn render(&self) -> String {
        (**self).render()
    }
}

/// Shape of the right-hand operand of a [`Predicate`].
#[derive(Debug, Clone)]
pub enum PredicateValue<T> {
    Single(T),
    SingleOptional(Option<T>),
    /// A value whose static type was erased, such as an enum raw value.
    Boxed(Value),
    Array(Vec<T>),
    ArrayOfOptionals(Vec<Option<T>>),
    ArrayOfBoxed(Vec<Value>),
    /// Pre-rendered SQL, written verbatim.
    Raw(SmolStr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateValueKind {
    Single,
    SingleOptional,
    Boxed,
    Array,
    ArrayOfOptionals,
    ArrayOfBoxed,
    Raw,
}

impl fmt::Display for PredicateValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PredicateValueKind::Single => "single",
            PredicateValueKind::SingleOptional => "single optional",
            PredicateValueKind::Boxed => "boxed",
            PredicateValueKind::Array => "array",
            PredicateValueKind::ArrayOfOptionals => "array of optionals",
            PredicateValueKind::ArrayOfBoxed => "array of boxed",
            PredicateValueKind::Raw => "raw",
        };
        f.write_str(name)
    }
}

impl<T> PredicateValue<T> {
    pub fn kind(&self) -> PredicateValueKind {
        match self {
            PredicateValue::Single(_) => PredicateValueKind::Single,
            PredicateValue::SingleOptional(_) => PredicateValueKind::SingleOptional,
            PredicateValue::Boxed(_) => PredicateValueKind::Boxed,
            PredicateValue::Array(_) => PredicateValueKind::Array,
            PredicateValue::ArrayOfOptionals(_) => PredicateValueKind::ArrayOfOptionals,
            PredicateValue::ArrayOfBoxed(_) => PredicateValueKind::ArrayOfBoxed,
            PredicateValue::Raw(_) => PredicateValueKind::Raw,
        }
    }

    /// Compares the variant only, payloads are ignored.
    pub fn same_kind<U>(&self, other: &PredicateValue<U>) -> bool {
        self.kind() == other.kind()
    }
}

fn write_list<W, I>(context: &mut FormatContext<'_, W>, values: I) -> fmt::Result
where
    W: Write,
    I: IntoIterator<Item = Value>,
{
    context.writer.write_char('(')?;
    for (index, value) in values.into_iter().enumerate() {
        if index > 0 {
            context.writer.write_char(',')?;
        }
        write_value(context, Some(&value))?;
    }
    context.writer.write_char(')')
}

impl<T: SqlValue> FormatWriter for PredicateValue<T> {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            PredicateValue::Single(value) => write_value(context, Some(&value.to_value())),
            PredicateValue::SingleOptional(value) => {
                let value = value.as_ref().map(SqlValue::to_value);
                write_value(context, value.as_ref())
            }
            PredicateValue::Boxed(value) => value.format_writer(context),
            PredicateValue::Array(values) => write_list(context, values.iter().map(SqlValue::to_value)),
            PredicateValue::ArrayOfOptionals(values) => {
                write_list(context, values.iter().map(SqlValue::to_value))
            }
            PredicateValue::ArrayOfBoxed(values) => write_list(context, values.iter().cloned()),
            PredicateValue::Raw(sql) => context.writer.write_str(sql),
        }
    }
}

// "!= NULL" contains "= NULL", so the negated forms go first
const NULL_REWRITES: [(&str, &str); 4] = [
    ("!= NULL", "IS NOT NULL"),
    ("= NULL", "IS NULL"),
    ("!= nil", "IS NOT NULL"),
    ("= nil", "IS NULL"),
];

/// Turns equality with `NULL` into `IS [NOT] NULL`.
///
/// Applies to the whole fragment, a literal that contains one of the
/// patterns is rewritten as well, and so are `<=`/`>=` against `NULL`
/// (`<IS NULL`, `>IS NULL`).
pub(crate) fn rewrite_null(mut sql: String) -> String {
    for (from, to) in NULL_REWRITES {
        if sql.contains(from) {
            sql = sql.replace(from, to);
        }
    }
    sql
}

/// A column or aggregate compared against a value.
#[derive(Debug, Clone)]
pub struct Predicate<T> {
    property: SmolStr,
    operator: Operator,
    value: PredicateValue<T>,
}

impl<T> Predicate<T> {
    pub fn new<P>(property: P, operator: Operator, value: PredicateValue<T>) -> Self
    where
        P: Into<SmolStr>,
    {
        Self {
            property: property.into(),
            operator,
            value,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &PredicateValue<T> {
        &self.value
    }
}

impl<T: SqlValue> FormatWriter for Predicate<T> {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        let mut str = String::with_capacity(self.property.len() + 16);
        let mut inner = FormatContext::new(&mut str);
        inner.writer.write_str(&self.property)?;
        inner.writer.write_char(' ')?;
        self.operator.format_writer(&mut inner)?;
        inner.writer.write_char(' ')?;
        self.value.format_writer(&mut inner)?;

        context.writer.write_str(&rewrite_null(str))
    }
}

impl<T: SqlValue> Render for Predicate<T> {
    fn render(&self) -> String {
        writer::render_to_string(self)
    }
}

impl<T: SqlValue> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut context = FormatContext::new(f);
        self.format_writer(&mut context)
    }
}

/// Two SQL expressions compared with each other, neither side is formatted.
#[derive(Debug, Clone)]
pub struct JoinPredicate {
    lhs: SmolStr,
    operator: Operator,
    rhs: SmolStr,
}

impl JoinPredicate {
    pub fn new<L, R>(lhs: L, operator: Operator, rhs: R) -> Self
    where
        L: Into<SmolStr>,
        R: Into<SmolStr>,
    {
        Self {
            lhs: lhs.into(),
            operator,
            rhs: rhs.into(),
        }
    }

    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn rhs(&self) -> &str {
        &self.rhs
    }
}

impl FormatWriter for JoinPredicate {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(&self.lhs)?;
        context.writer.write_char(' ')?;
        self.operator.format_writer(context)?;
        context.writer.write_char(' ')?;
        context.writer.write_str(&self.rhs)
    }
}

impl Render for JoinPredicate {
    fn render(&self) -> String {
        writer::render_to_string(self)
    }
}

impl fmt::Display for JoinPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut context = FormatContext::new(f);
        self.format_writer(&mut context)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer;

    use super::*;

    const AGE: &str = "\"_users_\".\"age\"";

    #[test]
    fn test_single_value() {
        let pred = Predicate::new(AGE, Operator::Equal, PredicateValue::Single(30));
        assert_eq!("\"_users_\".\"age\" = 30", pred.render());
    }

    #[test]
    fn test_optional_null_rewrite() {
        let pred = Predicate::new(AGE, Operator::Equal, PredicateValue::SingleOptional(None::<i32>));
        assert_eq!("\"_users_\".\"age\" IS NULL", pred.render());
        let pred = Predicate::new(AGE, Operator::NotEqual, PredicateValue::SingleOptional(None::<i32>));
        assert_eq!("\"_users_\".\"age\" IS NOT NULL", pred.render());
    }

    #[test]
    fn test_optional_present() {
        let pred = Predicate::new(AGE, Operator::Greater, PredicateValue::SingleOptional(Some(18)));
        assert_eq!("\"_users_\".\"age\" > 18", pred.render());
    }

    #[test]
    fn test_boxed() {
        let pred = Predicate::<i32>::new(AGE, Operator::Equal, PredicateValue::Boxed(Value::I64(3)));
        assert_eq!("\"_users_\".\"age\" = 3", pred.render());
    }

    #[test]
    fn test_arrays() {
        let pred = Predicate::new(AGE, Operator::In, PredicateValue::Array(vec![1, 2, 3]));
        assert_eq!("\"_users_\".\"age\" IN (1,2,3)", pred.render());

        let pred = Predicate::new(
            AGE,
            Operator::NotIn,
            PredicateValue::ArrayOfOptionals(vec![Some(1), None]),
        );
        assert_eq!("\"_users_\".\"age\" NOT IN (1,NULL)", pred.render());

        let pred = Predicate::<i32>::new(
            AGE,
            Operator::In,
            PredicateValue::ArrayOfBoxed(vec![Value::StaticString("a"), Value::Bool(true)]),
        );
        assert_eq!("\"_users_\".\"age\" IN ('a',1)", pred.render());
    }

    #[test]
    fn test_raw_verbatim() {
        let pred = Predicate::<i32>::new(
            AGE,
            Operator::In,
            PredicateValue::Raw(SmolStr::new_static("(select \"id\" from \"users\")")),
        );
        assert_eq!(
            "\"_users_\".\"age\" IN (select \"id\" from \"users\")",
            pred.render()
        );
    }

    #[test]
    fn test_rewrite_is_global() {
        let pred = Predicate::new(
            "\"_notes_\".\"body\"",
            Operator::Equal,
            PredicateValue::Single(String::from("x = NULL")),
        );
        assert_eq!("\"_notes_\".\"body\" = 'x IS NULL'", pred.render());
    }

    #[test]
    fn test_rewrite_nil() {
        assert_eq!("a IS NULL", rewrite_null("a = nil".into()));
        assert_eq!("a IS NOT NULL", rewrite_null("a != nil".into()));
        assert_eq!("a >= 1", rewrite_null("a >= 1".into()));
    }

    #[test]
    fn test_rewrite_hits_ordering_operators() {
        let pred = Predicate::new(AGE, Operator::LessOrEqual, PredicateValue::SingleOptional(None::<u8>));
        assert_eq!("\"_users_\".\"age\" <IS NULL", pred.render());
        let pred = Predicate::new(AGE, Operator::GreaterOrEqual, PredicateValue::SingleOptional(None::<u8>));
        assert_eq!("\"_users_\".\"age\" >IS NULL", pred.render());
    }

    #[test]
    fn test_render_idempotent() {
        let pred = Predicate::new(AGE, Operator::LessOrEqual, PredicateValue::SingleOptional(None::<u8>));
        assert_eq!(pred.render(), pred.render());
        assert_eq!(pred.render(), pred.to_string());
        assert_eq!(pred.render(), format_writer(&pred));
    }

    #[test]
    fn test_join() {
        let join = JoinPredicate::new("\"_users_\".\"id\"", Operator::Equal, "\"_posts_\".\"user_id\"");
        assert_eq!("\"_users_\".\"id\" = \"_posts_\".\"user_id\"", join.render());
        assert_eq!(join.render(), join.to_string());
    }

    #[test]
    fn test_same_kind_ignores_payload() {
        let a = PredicateValue::Single(1);
        let b = PredicateValue::Single(2);
        let c = PredicateValue::<String>::Single(String::from("x"));
        let d = PredicateValue::<i32>::SingleOptional(Some(1));
        assert!(a.same_kind(&b));
        assert!(a.same_kind(&c));
        assert!(!a.same_kind(&d));
        assert_eq!("array of optionals", PredicateValueKind::ArrayOfOptionals.to_string());
    }
}
