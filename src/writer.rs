use std::{fmt::Write, ops::Deref};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    pub(crate) fn write_ident(&mut self, part: &str) -> std::fmt::Result {
        if part == "*" {
            return self.writer.write_char('*');
        }

        self.writer.write_char('"')?;

        // duplicate the quote if present
        let mut last = 0;
        for (index, char) in part.char_indices() {
            if char == '"' {
                if index != last {
                    self.writer.write_str(&part[last..index])?;
                }
                self.writer.write_str("\"\"")?;
                last = index + char.len_utf8();
            }
        }

        // write trailing slice
        if last < part.len() {
            self.writer.write_str(&part[last..])?;
        }

        self.writer.write_char('"')
    }

    pub(crate) fn write_alias(&mut self, alias: &str) -> std::fmt::Result {
        self.writer.write_str(" as ")?;
        self.write_ident(alias)
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: std::fmt::Write>(&self, ctx: &mut FormatContext<'_, W>) -> std::fmt::Result {
        self.deref().format_writer(ctx)
    }
}

/// Formats into a fresh string, writing into a `String` cannot fail.
pub(crate) fn render_to_string<F: FormatWriter + ?Sized>(value: &F) -> String {
    let mut str = String::with_capacity(64);
    let mut context = FormatContext::new(&mut str);
    // fmt::Write for String never returns an error
    let _ = value.format_writer(&mut context);
    str
}
