//! Stream headers of the metadata root (ECMA-335 II.24.2.2).

use crate::{file::io::read_le, Error::OutOfBounds, Result};

/// Names of the streams a metadata root may declare.
///
/// `#-` is the uncompressed table stream; it is recognised here and rejected later by the
/// module reader.
pub const VALID_STREAM_NAMES: [&str; 7] =
    ["#Strings", "#US", "#Blob", "#GUID", "#~", "#-", "#Pdb"];

/// Location of a single stream, relative to the metadata root.
#[derive(Debug, Clone)]
pub struct StreamHeader {
    /// Offset of the stream from the start of the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Stream name, e.g. `#~`
    pub name: String,
}

impl StreamHeader {
    /// Reads a stream header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is too short or
    /// [`crate::Error::Malformed`] for an unknown stream name.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let name = data[8..]
            .iter()
            .take(32)
            .take_while(|byte| **byte != 0)
            .map(|byte| char::from(*byte))
            .collect::<String>();

        if !VALID_STREAM_NAMES.contains(&name.as_str()) {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }

        Ok(StreamHeader {
            offset: read_le::<u32>(data)?,
            size: read_le::<u32>(&data[4..])?,
            name,
        })
    }
}
