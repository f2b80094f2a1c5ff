use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The stub generator itself is total over well-formed descriptors and never fails; every
/// variant here originates from reading modules from disk or memory, or from loading the
/// library list that names them.
///
/// # Error Categories
///
/// ## File Parsing Errors
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond file boundaries
/// - [`Error::NotSupported`] - Unsupported file format or feature
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::RecursionLimit`] - Signature nesting exceeded the parser limit
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::GoblinErr`] - PE parsing errors from goblin crate
///
/// ## Input Errors
/// - [`Error::LibraryList`] - Invalid or empty library list
///
/// # Examples
///
/// ```rust,no_run
/// use harmonygen::{CilModule, Error};
/// use std::path::Path;
///
/// match CilModule::from_file(Path::new("Assembly-CSharp.dll")) {
///     Ok(module) => println!("{} root types", module.types().len()),
///     Err(Error::NotSupported) => eprintln!("File format is not supported"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Returned for uncompressed (`#-`) metadata table streams and other layouts the
    /// reader does not handle.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Recursion limit reached while decoding a nested signature.
    ///
    /// The associated value shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// The library list is missing or names no existing library.
    ///
    /// The associated value is the message shown to the user.
    #[error("{0}")]
    LibraryList(String),
}
