//! Literal rendering for predicate values.
//!
//! Output is inline SQL text, not a bound parameter. Strings are wrapped in
//! single quotes without escaping embedded quotes, and a string starting with
//! `(` is written unchanged as a pre-wrapped subquery or expression. Callers
//! pass strings that are either already safe SQL or contain no `'`.
//! Other values are written with their display text unquoted, an empty
//! display text is written as `''`.

use std::fmt::Write;

use crate::{
    value::Value,
    writer::{FormatContext, FormatWriter},
};

/// Renders `value` as a SQL literal, `None` and [`Value::Null`] are `NULL`.
///
/// ```
/// use predicate::{Value, format_value};
///
/// assert_eq!("NULL", format_value(None));
/// assert_eq!("'hello'", format_value(Some(&Value::StaticString("hello"))));
/// assert_eq!("(select 1)", format_value(Some(&Value::StaticString("(select 1)"))));
/// assert_eq!("1", format_value(Some(&Value::Bool(true))));
/// ```
pub fn format_value(value: Option<&Value>) -> String {
    let mut str = String::new();
    let mut context = FormatContext::new(&mut str);
    // writing into a String cannot fail
    let _ = write_value(&mut context, value);
    str
}

pub(crate) fn write_value<W: Write>(
    context: &mut FormatContext<'_, W>,
    value: Option<&Value>,
) -> std::fmt::Result {
    match value {
        Some(value) => value.format_writer(context),
        None => context.writer.write_str("NULL"),
    }
}

fn write_str_literal<W: Write>(context: &mut FormatContext<'_, W>, value: &str) -> std::fmt::Result {
    if value.starts_with('(') {
        return context.writer.write_str(value);
    }
    context.writer.write_char('\'')?;
    context.writer.write_str(value)?;
    context.writer.write_char('\'')
}

impl FormatWriter for Value {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        match self {
            Value::Null => context.writer.write_str("NULL"),
            Value::String(value) => write_str_literal(context, value),
            Value::StaticString(value) => write_str_literal(context, value),
            #[cfg(feature = "uuid")]
            Value::Uuid(value) => write!(context.writer, "'{}'", value.hyphenated()),
            Value::Bool(value) => context.writer.write_char(if *value { '1' } else { '0' }),
            Value::F32(value) => write!(context.writer, "{value}"),
            Value::F64(value) => write!(context.writer, "{value}"),
            Value::I8(value) => write!(context.writer, "{value}"),
            Value::I16(value) => write!(context.writer, "{value}"),
            Value::I32(value) => write!(context.writer, "{value}"),
            Value::I64(value) => write!(context.writer, "{value}"),
            Value::I128(value) => write!(context.writer, "{value}"),
            Value::Isize(value) => write!(context.writer, "{value}"),
            Value::U8(value) => write!(context.writer, "{value}"),
            Value::U16(value) => write!(context.writer, "{value}"),
            Value::U32(value) => write!(context.writer, "{value}"),
            Value::U64(value) => write!(context.writer, "{value}"),
            Value::U128(value) => write!(context.writer, "{value}"),
            Value::Usize(value) => write!(context.writer, "{value}"),
            Value::Other(value) if value.is_empty() => context.writer.write_str("''"),
            Value::Other(value) => context.writer.write_str(value),
        }
    }
}
