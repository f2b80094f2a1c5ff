use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{Error, Result};

/// File name of the library list in the working directory.
pub const DEFAULT_LIBRARY_LIST: &str = "Libraries.txt";

/// The modules a run covers, read from a plain text list with one path per line.
///
/// Blank lines and lines starting with `#` are skipped, surrounding whitespace is trimmed.
/// Relative paths are resolved against a base directory. Entries that do not name an
/// existing file are kept apart in [`LibraryList::missing`], in list order. Messages name
/// the list by the path it was loaded from, or [`DEFAULT_LIBRARY_LIST`] for parsed text.
///
/// # Examples
///
/// ```rust
/// use harmonygen::report::LibraryList;
/// use std::path::Path;
///
/// let list = LibraryList::parse("# managed assemblies\n\nGame.dll\n", Path::new("/nowhere"));
/// assert!(list.libraries().is_empty());
/// assert_eq!(list.missing(), [Path::new("/nowhere/Game.dll")]);
/// assert!(list.require_libraries().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryList {
    name: String,
    libraries: Vec<PathBuf>,
    missing: Vec<PathBuf>,
}

impl LibraryList {
    /// Reads the list at `path`, resolving entries against the current directory.
    ///
    /// # Errors
    /// Returns [`Error::LibraryList`] if `path` does not exist, and [`Error::FileError`] if it
    /// cannot be read or the current directory is unavailable.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::LibraryList(format!(
                    "Please create a {} file that contains the libraries you want to generate stubs for.",
                    path.display()
                )));
            }
            Err(error) => return Err(error.into()),
        };

        let base = std::env::current_dir()?;
        let mut list = Self::parse(&contents, &base);
        list.name = path.display().to_string();
        Ok(list)
    }

    /// Parses the list `contents`, resolving relative entries against `base`.
    #[must_use]
    pub fn parse(contents: &str, base: &Path) -> Self {
        let mut list = LibraryList {
            name: DEFAULT_LIBRARY_LIST.to_string(),
            ..LibraryList::default()
        };

        for (index, line) in contents.lines().enumerate() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }

            let path = base.join(entry);
            if path.is_file() {
                list.libraries.push(path);
            } else {
                debug!("Library list line {}: {} does not exist", index + 1, path.display());
                list.missing.push(path);
            }
        }

        list
    }

    /// The name messages use for this list.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The existing libraries, in list order.
    #[must_use]
    pub fn libraries(&self) -> &[PathBuf] {
        &self.libraries
    }

    /// The entries that do not name an existing file, in list order.
    #[must_use]
    pub fn missing(&self) -> &[PathBuf] {
        &self.missing
    }

    /// The existing libraries, or an error if there are none.
    ///
    /// # Errors
    /// Returns [`Error::LibraryList`] if no entry names an existing file.
    pub fn require_libraries(&self) -> Result<&[PathBuf]> {
        if self.libraries.is_empty() {
            return Err(Error::LibraryList(format!(
                "No valid libraries found in {}.",
                self.name
            )));
        }

        Ok(&self.libraries)
    }
}
