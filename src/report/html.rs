use std::io::Write;

use log::debug;

use crate::{
    model::TypeRegistry,
    report::{Markup, ReportWriter},
    stubs::{PatchKind, ReportRow, StubText},
    Result,
};

const TITLE: &str = "Elements of Harmony: Results";

const STYLE: &str = "
.row1
{
    background-color:rgb(238, 238, 238);
}

.row2
{
    background-color:rgb(255, 255, 255);
}

.head1
{
    background-color:rgb(105, 105, 105);
    color:rgb(255, 255, 255);
}

.head2
{
    background-color:rgb(215, 217, 242);
}

.row1, .row2, .head2
{
    color:rgb(51, 51, 51);
}
";

/// Writes rows as a standalone HTML page.
///
/// The page holds one table with three columns. Every type section starts with a `head1`
/// row repeating the type name and a `head2` row naming the columns; stub rows alternate
/// between the `row1` and `row2` classes, starting over with `row1` for every module.
///
/// Stub lines are terminated by `<br/>`, their leading spaces become `&nbsp;`. Names in
/// rows must already be escaped with [`Markup::Html`].
pub struct HtmlReport<W: Write> {
    out: W,
    shaded: bool,
    table_open: bool,
}

impl<W: Write> HtmlReport<W> {
    /// Creates the report and writes the document head.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if `out` fails.
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "<!doctype html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\"/>")?;
        writeln!(out, "<title>{TITLE}</title>")?;
        writeln!(out, "<style>{STYLE}</style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<table>")?;

        Ok(HtmlReport {
            out,
            shaded: false,
            table_open: true,
        })
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn row_class(&mut self) -> &'static str {
        let class = if self.shaded { "row2" } else { "row1" };
        self.shaded = !self.shaded;
        class
    }

    fn close_table(&mut self) -> Result<()> {
        if self.table_open {
            writeln!(self.out, "</table>")?;
            self.table_open = false;
        }
        Ok(())
    }
}

/// Renders one stub as the content of a table cell.
fn cell(stub: &StubText) -> String {
    let mut html = String::new();
    for line in stub.lines() {
        let body = line.trim_start_matches(' ');
        for _ in 0..line.len() - body.len() {
            html.push_str("&nbsp;");
        }
        html.push_str(body);
        html.push_str("<br/>");
    }
    html
}

impl<W: Write> ReportWriter for HtmlReport<W> {
    fn markup(&self) -> Markup {
        Markup::Html
    }

    fn begin_module(&mut self, name: &str) -> Result<()> {
        debug!("Writing HTML rows of {name}");
        self.shaded = false;
        Ok(())
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        match row {
            ReportRow::Header(header) => {
                writeln!(
                    self.out,
                    "<tr class=\"head1\"><th>{header}</th><th>{header}</th><th>{header}</th></tr>"
                )?;
                write!(self.out, "<tr class=\"head2\">")?;
                for kind in [PatchKind::Prefix, PatchKind::Replacement, PatchKind::Postfix] {
                    write!(self.out, "<th>{}</th>", kind.column_title())?;
                }
                writeln!(self.out, "</tr>")?;
                writeln!(self.out)?;
            }
            ReportRow::Stubs(stubs) => {
                let class = self.row_class();
                write!(self.out, "<tr class=\"{class}\">")?;
                for (_, stub) in stubs.iter() {
                    write!(self.out, "<td>{}</td>", cell(stub))?;
                }
                writeln!(self.out, "</tr>")?;
            }
        }
        Ok(())
    }

    fn write_listing(&mut self, registry: &TypeRegistry) -> Result<()> {
        self.close_table()?;
        self.shaded = false;

        writeln!(self.out, "<table>")?;
        for entry in registry {
            let class = self.row_class();
            writeln!(
                self.out,
                "<tr class=\"{class}\"><td>{}</td><td>{}</td><td>{}</td></tr>",
                Markup::Html.escape(&entry.full_name),
                Markup::Html.escape(&entry.name),
                Markup::Html.escape(&entry.display),
            )?;
        }
        writeln!(self.out, "</table>")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.close_table()?;
        writeln!(self.out, "</body></html>")?;
        self.out.flush()?;
        Ok(())
    }
}
