//! The `#Blob` heap (ECMA-335 II.24.2.4).

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// Length-prefixed binary data, addressed by byte offset.
///
/// Each blob starts with its length as a compressed unsigned integer. Method, property and
/// type specification signatures all live here.
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Wraps the raw heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with the
    /// empty blob.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Invalid memory for #Blob heap"));
        }

        Ok(Blob { data })
    }

    /// Returns the blob starting at `index`, without its length prefix.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the index or the declared length point
    /// outside the heap.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        let Some(tail) = self.data.get(index..) else {
            return Err(OutOfBounds);
        };

        let mut parser = Parser::new(tail);
        let len = parser.read_compressed_uint()? as usize;
        let skip = parser.pos();

        let Some(data_start) = index.checked_add(skip) else {
            return Err(OutOfBounds);
        };

        let Some(data_end) = data_start.checked_add(len) else {
            return Err(OutOfBounds);
        };

        self.data.get(data_start..data_end).ok_or(OutOfBounds)
    }
}
