//! Memory-mapped backend for modules read from disk.
//!
//! Managed libraries shipped with a game are commonly several megabytes large, while the
//! reader only touches the metadata directory. Mapping the file lets the OS page in just the
//! regions that get parsed.

use std::{fs, path::Path};

use memmap2::Mmap;

use super::Backend;
use crate::{
    Error::{Error, FileError, OutOfBounds},
    Result,
};

/// A read-only memory mapping of a file on disk.
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Opens and maps the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;

        // The mapping is read-only and outlives no one but `Physical` itself.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|error| Error(error.to_string()))?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        self.data.get(offset..offset_end).ok_or(OutOfBounds)
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn physical() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(&[0x4D, 0x5A, 0x90, 0x00, 0x03]).unwrap();
        temp.flush().unwrap();

        let physical = Physical::new(temp.path()).unwrap();

        assert_eq!(physical.len(), 5);
        assert_eq!(physical.data()[0], 0x4D);
        assert_eq!(physical.data_slice(1, 2).unwrap(), &[0x5A, 0x90]);
        assert!(physical.data_slice(4, 2).is_err());
        assert!(physical.data_slice(usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn physical_missing_file() {
        let result = Physical::new("/nonexistent/path/to/Assembly-CSharp.dll");

        match result {
            Err(FileError(io_error)) => {
                assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected FileError, got {:?}", other.map(|p| p.len())),
        }
    }
}
