use std::io::Write;

use log::debug;

use crate::{
    model::TypeRegistry,
    report::{Markup, ReportWriter},
    stubs::ReportRow,
    Result,
};

/// Writes rows as plain text.
///
/// ```text
/// == N.C ==
///
/// -- Before --
/// [HarmonyPatch(typeof(N.C))]
/// ...
/// -- Replace --
/// ...
/// -- After --
/// ...
///
/// ```
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    /// Creates a report writing to `out`.
    pub fn new(out: W) -> Self {
        TextReport { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TextReport<W> {
    fn markup(&self) -> Markup {
        Markup::Plain
    }

    fn begin_module(&mut self, name: &str) -> Result<()> {
        debug!("Writing text rows of {name}");
        writeln!(self.out, "# {name}")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        match row {
            ReportRow::Header(header) => {
                writeln!(self.out, "== {header} ==")?;
                writeln!(self.out)?;
            }
            ReportRow::Stubs(stubs) => {
                for (kind, stub) in stubs.iter() {
                    writeln!(self.out, "-- {} --", kind.column_title())?;
                    writeln!(self.out, "{stub}")?;
                }
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    fn write_listing(&mut self, registry: &TypeRegistry) -> Result<()> {
        writeln!(self.out, "== Types ==")?;
        writeln!(self.out)?;
        for entry in registry {
            writeln!(
                self.out,
                "{}\t{}\t{}",
                entry.full_name, entry.name, entry.display
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
