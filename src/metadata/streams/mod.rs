//! Metadata streams.
//!
//! The metadata root lists the streams of a module. The reader consumes three of them:
//! `#~` holds the tables, `#Strings` the identifiers, and `#Blob` the signatures.

mod blob;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use streamheader::{StreamHeader, VALID_STREAM_NAMES};
pub use strings::Strings;
pub use tablesheader::TablesHeader;
