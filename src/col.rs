use std::{fmt, marker::PhantomData};

use smol_str::SmolStr;

use crate::{
    table::{Table, TableSchema},
    writer::{self, FormatContext, FormatWriter},
};

/// A typed attribute of model `M` holding values of type `T`.
pub struct Column<M, T> {
    query_value: SmolStr,
    _marker: PhantomData<fn() -> (M, T)>,
}

impl<M, T> Column<M, T> {
    /// Wraps an already rendered expression, such as a json path or a cast.
    pub fn from_expr<E>(expr: E) -> Self
    where
        E: Into<SmolStr>,
    {
        Self {
            query_value: expr.into(),
            _marker: PhantomData,
        }
    }

    /// The SQL expression this column renders to.
    pub fn query_value(&self) -> SmolStr {
        self.query_value.clone()
    }

    pub fn as_str(&self) -> &str {
        self.query_value.as_str()
    }

    pub fn aggregate(&self, function: AggregateFunction) -> Aggregate<M, T> {
        Aggregate::new(function, self)
    }

    pub fn avg(&self) -> Aggregate<M, T> {
        self.aggregate(AggregateFunction::Avg)
    }

    pub fn sum(&self) -> Aggregate<M, T> {
        self.aggregate(AggregateFunction::Sum)
    }

    pub fn min(&self) -> Aggregate<M, T> {
        self.aggregate(AggregateFunction::Min)
    }

    pub fn max(&self) -> Aggregate<M, T> {
        self.aggregate(AggregateFunction::Max)
    }

    pub fn count(&self) -> Aggregate<M, T> {
        self.aggregate(AggregateFunction::Count)
    }
}

impl<M: TableSchema, T> Column<M, T> {
    /// `"_alias_"."name"` for the column `name` of `M`.
    pub fn new(name: &str) -> Self {
        let mut str = String::with_capacity(name.len() + 16);
        let mut context = FormatContext::new(&mut str);
        // writing into a String cannot fail
        let _ = write_column(&mut context, &Table::<M>::alias(), name);
        Self::from_expr(str)
    }
}

fn write_column<W: fmt::Write>(
    context: &mut FormatContext<'_, W>,
    alias: &str,
    name: &str,
) -> fmt::Result {
    context.write_ident(alias)?;
    context.writer.write_char('.')?;
    context.write_ident(name)
}

impl<M, T> Clone for Column<M, T> {
    fn clone(&self) -> Self {
        Self::from_expr(self.query_value.clone())
    }
}

impl<M, T> fmt::Debug for Column<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.query_value).finish()
    }
}

impl<M, T> FormatWriter for Column<M, T> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Avg,
    Sum,
    Max,
    Min,
    Count,
}

impl FormatWriter for AggregateFunction {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            AggregateFunction::Avg => context.writer.write_str("AVG("),
            AggregateFunction::Sum => context.writer.write_str("SUM("),
            AggregateFunction::Max => context.writer.write_str("MAX("),
            AggregateFunction::Min => context.writer.write_str("MIN("),
            AggregateFunction::Count => context.writer.write_str("COUNT("),
        }
    }
}

/// An aggregate function applied to a column of `M`.
pub struct Aggregate<M, T> {
    function: AggregateFunction,
    expression: SmolStr,
    _marker: PhantomData<fn() -> (M, T)>,
}

impl<M, T> Aggregate<M, T> {
    pub fn new(function: AggregateFunction, column: &Column<M, T>) -> Self {
        let call = AggregateCall { function, column };
        Self {
            function,
            expression: writer::render_to_string(&call).into(),
            _marker: PhantomData,
        }
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    /// The rendered call, e.g. `SUM("_orders_"."amount")`.
    pub fn expression(&self) -> SmolStr {
        self.expression.clone()
    }

    pub fn as_str(&self) -> &str {
        self.expression.as_str()
    }
}

impl<M, T> Clone for Aggregate<M, T> {
    fn clone(&self) -> Self {
        Self {
            function: self.function,
            expression: self.expression.clone(),
            _marker: PhantomData,
        }
    }
}

impl<M, T> fmt::Debug for Aggregate<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("function", &self.function)
            .field("expression", &self.expression)
            .finish()
    }
}

impl<M, T> FormatWriter for Aggregate<M, T> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

struct AggregateCall<'a, M, T> {
    function: AggregateFunction,
    column: &'a Column<M, T>,
}

impl<M, T> FormatWriter for AggregateCall<'_, M, T> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.function.format_writer(context)?;
        self.column.format_writer(context)?;
        context.writer.write_char(')')
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer;

    use super::*;

    struct Order;

    impl TableSchema for Order {
        fn entity() -> &'static str {
            "orders"
        }
    }

    #[test]
    fn test_column_expr() {
        let amount = Column::<Order, f64>::new("amount");
        assert_eq!("\"_orders_\".\"amount\"", amount.as_str());
        assert_eq!("\"_orders_\".\"amount\"", format_writer(&amount));
    }

    #[test]
    fn test_column_quote() {
        let col = Column::<Order, i32>::new("odd\"name");
        assert_eq!("\"_orders_\".\"odd\"\"name\"", col.as_str());
    }

    #[test]
    fn test_column_from_expr() {
        let col = Column::<Order, String>::from_expr("(o.\"meta\"->>'kind')");
        assert_eq!("(o.\"meta\"->>'kind')", col.query_value().as_str());
    }

    #[test]
    fn test_aggregates() {
        let amount = Column::<Order, f64>::new("amount");
        assert_eq!("SUM(\"_orders_\".\"amount\")", amount.sum().as_str());
        assert_eq!("AVG(\"_orders_\".\"amount\")", amount.avg().as_str());
        assert_eq!("MIN(\"_orders_\".\"amount\")", amount.min().as_str());
        assert_eq!("MAX(\"_orders_\".\"amount\")", amount.max().as_str());
        assert_eq!("COUNT(\"_orders_\".\"amount\")", amount.count().expression().as_str());
        assert_eq!(AggregateFunction::Count, amount.count().function());
    }
}
