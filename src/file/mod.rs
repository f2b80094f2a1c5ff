//! PE image loading and address translation.
//!
//! A managed module is an ordinary PE image whose CLR runtime header data directory points at
//! the CLI header (ECMA-335 II.25.3.3), which in turn locates the metadata root. [`File`]
//! owns the raw bytes through a [`Backend`] and keeps the `goblin` parse of the headers next to
//! them, so callers can resolve the CLR directory and translate RVAs into file offsets.
//!
//! # Examples
//!
//! ```rust,no_run
//! use harmonygen::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
//! let (clr_rva, clr_size) = file.clr()?;
//! let clr_offset = file.rva_to_offset(clr_rva)?;
//! let cor20 = file.data_slice(clr_offset, clr_size)?;
//! println!("CLI header is {} bytes", cor20.len());
//! # Ok::<(), harmonygen::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    Error::{Empty, GoblinErr},
    Result,
};
use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Source of the raw bytes behind a [`File`].
pub trait Backend: Send + Sync {
    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not fully inside the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;
}

#[self_referencing]
/// A loaded PE image that carries a CLR runtime header.
///
/// Loading fails unless the optional header exists and its CLR runtime header directory is
/// present, so every `File` is known to be a managed module candidate.
pub struct File {
    /// The underlying data source (memory or file).
    data: Box<dyn Backend>,
    /// The parsed PE structure, referencing the data.
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Maps and parses the PE image at `file`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, [`crate::Error::Empty`]
    /// for a zero-length file, [`crate::Error::GoblinErr`] if the PE headers do not parse and
    /// [`crate::Error::Malformed`] if there is no CLR runtime header.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Parses a PE image from an owned buffer.
    ///
    /// # Errors
    /// Same as [`File::from_file`], minus the I/O failures.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let pe = PE::parse(data.data()).map_err(GoblinErr)?;

            let Some(optional_header) = pe.header.optional_header else {
                return Err(malformed_error!("File does not have an OptionalHeader"));
            };

            if optional_header
                .data_directories
                .get_clr_runtime_header()
                .is_none()
            {
                return Err(malformed_error!(
                    "File does not have a CLR runtime header directory"
                ));
            }

            Ok(pe)
        })
    }

    /// Returns the total size of the loaded file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the file has a length of zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the RVA and size of the CLR runtime header.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the directory is missing.
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            let Some(optional_header) = pe.header.optional_header else {
                return Err(malformed_error!("File does not have an OptionalHeader"));
            };

            if let Some(clr_dir) = optional_header.data_directories.get_clr_runtime_header() {
                Ok((clr_dir.virtual_address as usize, clr_dir.size as usize))
            } else {
                Err(malformed_error!(
                    "File does not have a CLR runtime header directory"
                ))
            }
        })
    }

    /// Returns the whole image.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.borrow_data().data()
    }

    /// Returns `len` bytes starting at file offset `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the image.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.borrow_data().data_slice(offset, len)
    }

    /// Translates a relative virtual address into a file offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section contains `rva` or a section header
    /// overflows.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        let rva_u32 =
            u32::try_from(rva).map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

        self.with_pe(|pe| {
            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::ImageBuilder;

    #[test]
    fn load_synthetic_image() {
        let file = File::from_mem(ImageBuilder::new().build()).unwrap();

        let (clr_rva, clr_size) = file.clr().unwrap();
        assert_eq!(clr_rva, 0x2000);
        assert_eq!(clr_size, 72);
        assert_eq!(file.rva_to_offset(clr_rva).unwrap(), 0x200);
        assert_eq!(file.rva_to_offset(0x2010).unwrap(), 0x210);
        assert!(file.rva_to_offset(0x10).is_err());
        assert!(!file.is_empty());
    }

    #[test]
    fn load_empty() {
        assert!(matches!(File::from_mem(Vec::new()), Err(crate::Error::Empty)));
    }

    #[test]
    fn load_invalid() {
        assert!(File::from_mem(vec![0xCC; 512]).is_err());
    }
}
