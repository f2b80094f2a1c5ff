//! Report output.
//!
//! The stub generator produces [`ReportRow`]s; this module turns them into documents. Two
//! emitters implement [`ReportWriter`]:
//!
//! - [`HtmlReport`] - a standalone HTML page with one three-column table
//! - [`TextReport`] - plain text sections, one block per stub kind
//!
//! Both can append the diagnostic listing of every type the run encountered. The
//! [`LibraryList`] parser reads the list of modules a run covers.
//!
//! # Examples
//!
//! ```rust
//! use harmonygen::prelude::*;
//!
//! let mut report = HtmlReport::new(Vec::new())?;
//! report.begin_module("Game.dll")?;
//! report.write_row(&ReportRow::Header("Game.Player".to_string()))?;
//! report.finish()?;
//!
//! let html = String::from_utf8(report.into_inner()).unwrap();
//! assert!(html.contains("<th>Game.Player</th>"));
//! # Ok::<(), harmonygen::Error>(())
//! ```

mod html;
mod library;
mod markup;
mod text;

pub use html::HtmlReport;
pub use library::{LibraryList, DEFAULT_LIBRARY_LIST};
pub use markup::Markup;
pub use text::TextReport;

use crate::{model::TypeRegistry, stubs::ReportRow, Result};

/// A document the rows of one or more modules are written to.
///
/// Callers invoke [`ReportWriter::begin_module`] once per module before its rows, may append
/// the type listing, and call [`ReportWriter::finish`] exactly once at the end.
pub trait ReportWriter {
    /// The markup names must be escaped with before they are handed to this writer.
    fn markup(&self) -> Markup;

    /// Starts the rows of the module `name`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the underlying writer fails.
    fn begin_module(&mut self, name: &str) -> Result<()>;

    /// Writes one header or stub row.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the underlying writer fails.
    fn write_row(&mut self, row: &ReportRow) -> Result<()>;

    /// Writes one entry per type in `registry`: full name, simple name and display name.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the underlying writer fails.
    fn write_listing(&mut self, registry: &TypeRegistry) -> Result<()>;

    /// Completes the document and flushes it.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the underlying writer fails.
    fn finish(&mut self) -> Result<()>;

    /// Starts module `name` and writes all of its `rows`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the underlying writer fails.
    fn write_module(&mut self, name: &str, rows: &[ReportRow]) -> Result<()> {
        self.begin_module(name)?;
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }
}
