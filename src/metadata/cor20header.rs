//! The CLI header (ECMA-335 II.25.3.3).
//!
//! The CLR runtime header data directory of the PE points at this 72-byte structure. The
//! reader needs it for one thing: the RVA and size of the metadata root.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The fields of the CLI header that locate and describe the metadata.
#[derive(Debug, Clone)]
pub struct Cor20Header {
    /// Size of the header in bytes, always 72
    pub cb: u32,
    /// Minimum runtime major version
    pub major_runtime_version: u16,
    /// Minimum runtime minor version
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata in bytes
    pub meta_data_size: u32,
    /// Runtime flags (`COMIMAGE_FLAGS_*`)
    pub flags: u32,
    /// MethodDef or File token of the entry point, 0 for libraries
    pub entry_point_token: u32,
}

impl Cor20Header {
    /// Reads the header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than 72 bytes or
    /// [`crate::Error::Malformed`] if `cb` is wrong or the metadata directory is empty.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < 72 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb != 72 {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        if meta_data_rva == 0 {
            return Err(malformed_error!("Metadata RVA cannot be zero"));
        }

        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_size == 0 {
            return Err(malformed_error!("Metadata size cannot be zero"));
        }

        let flags = parser.read_le::<u32>()?;
        let entry_point_token = parser.read_le::<u32>()?;

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags,
            entry_point_token,
        })
    }
}
