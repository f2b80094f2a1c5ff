//! The metadata root (ECMA-335 II.24.2.1).
//!
//! The root starts with the `BSJB` signature, carries a runtime version string padded to a
//! multiple of four bytes, and lists the stream headers that locate `#~`, `#Strings`, `#Blob`
//! and friends relative to the root.

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Error::OutOfBounds,
    Result,
};

/// Signature of the metadata root, `BSJB` read as little-endian.
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The parsed metadata root.
pub struct Root {
    /// Metadata format major version
    pub major_version: u16,
    /// Metadata format minor version
    pub minor_version: u16,
    /// Runtime version string, e.g. `v4.0.30319`, without its null padding
    pub version: String,
    /// Reserved flags
    pub flags: u16,
    /// The streams in the order they were declared
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Reads the root from the start of the metadata.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a wrong signature, a bad stream count or a stream
    /// that does not fit into `data`, and [`crate::Error::OutOfBounds`] for truncated input.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 20 {
            return Err(OutOfBounds);
        }

        let signature = read_le::<u32>(data)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {}",
                signature
            ));
        }

        let mut offset = 4;
        let major_version = read_le_at::<u16>(data, &mut offset)?;
        let minor_version = read_le_at::<u16>(data, &mut offset)?;
        offset += 4;

        let version_length = read_le_at::<u32>(data, &mut offset)? as usize;
        let Some(version_end) = offset.checked_add(version_length) else {
            return Err(malformed_error!(
                "Version string length causing integer overflow - {}",
                version_length
            ));
        };

        let Some(version_bytes) = data.get(offset..version_end) else {
            return Err(OutOfBounds);
        };
        let version = version_bytes
            .iter()
            .take_while(|byte| **byte != 0)
            .map(|byte| char::from(*byte))
            .collect::<String>();

        offset = version_end;
        let flags = read_le_at::<u16>(data, &mut offset)?;
        let stream_count = read_le_at::<u16>(data, &mut offset)?;
        // 9 - min size that a valid StreamHeader can be
        if stream_count == 0 || stream_count > 5 || usize::from(stream_count) * 9 > data.len() {
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut stream_headers = Vec::with_capacity(usize::from(stream_count));
        for _ in 0..stream_count {
            let Some(header_data) = data.get(offset..) else {
                return Err(OutOfBounds);
            };

            let stream = StreamHeader::from(header_data)?;
            match stream.offset.checked_add(stream.size) {
                Some(end) if end as usize <= data.len() => {}
                Some(_) => return Err(OutOfBounds),
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        stream.offset,
                        stream.size
                    ))
                }
            }

            let name_aligned = ((stream.name.len() + 1) + 3) & !3;
            offset += 8 + name_aligned;

            if stream_headers
                .iter()
                .any(|known: &StreamHeader| known.name == stream.name)
            {
                return Err(malformed_error!("Duplicate stream - {}", stream.name));
            }
            stream_headers.push(stream);
        }

        Ok(Root {
            major_version,
            minor_version,
            version,
            flags,
            stream_headers,
        })
    }

    /// Finds a stream header by name.
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|header| header.name == name)
    }
}
