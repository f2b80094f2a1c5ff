//! Cursor-based reader for metadata blobs and signatures.
//!
//! [`Parser`] wraps a byte slice with a position and offers the reads that ECMA-335 blobs
//! need: little-endian integers, compressed unsigned integers (II.23.2) and compressed
//! `TypeDefOrRefOrSpecEncoded` tokens (II.23.2.8). Every read is bounds-checked.

use crate::{
    file::io::{read_le_at, CilIO},
    metadata::token::Token,
    Error::OutOfBounds,
    Result,
};

/// A forward-only reader over a borrowed byte slice.
///
/// # Examples
///
/// ```rust,ignore
/// use harmonygen::file::parser::Parser;
///
/// // DEFAULT calling convention, 1 parameter, returns I4, takes STRING
/// let signature = [0x00, 0x01, 0x08, 0x0E];
/// let mut parser = Parser::new(&signature);
///
/// assert_eq!(parser.read_le::<u8>()?, 0x00);
/// assert_eq!(parser.read_compressed_uint()?, 1);
/// assert_eq!(parser.peek_byte()?, 0x08);
/// # Ok::<(), harmonygen::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] from a byte slice.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Move the position forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing would exceed the data length.
    pub fn advance(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    /// Move the position forward by `step` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        match self.position.checked_add(step) {
            Some(end) if end <= self.data.len() => {
                self.position = end;
                Ok(())
            }
            _ => Err(OutOfBounds),
        }
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    pub fn peek_byte(&self) -> Result<u8> {
        self.data.get(self.position).copied().ok_or(OutOfBounds)
    }

    /// Read a `T` in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_le<T: CilIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a compressed unsigned integer as defined in ECMA-335 II.23.2.
    ///
    /// - Values 0-127: 1 byte (0xxxxxxx)
    /// - Values 128-16383: 2 bytes (10xxxxxx xxxxxxxx)
    /// - Values 16384-536870911: 4 bytes (110xxxxx xxxxxxxx xxxxxxxx xxxxxxxx)
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length or
    /// [`crate::Error::Malformed`] for an invalid leading byte.
    pub fn read_compressed_uint(&mut self) -> Result<u32> {
        let first_byte = self.read_le::<u8>()?;

        if (first_byte & 0x80) == 0 {
            return Ok(u32::from(first_byte));
        }

        if (first_byte & 0xC0) == 0x80 {
            let second_byte = self.read_le::<u8>()?;
            return Ok(((u32::from(first_byte) & 0x3F) << 8) | u32::from(second_byte));
        }

        if (first_byte & 0xE0) == 0xC0 {
            let b1 = u32::from(self.read_le::<u8>()?);
            let b2 = u32::from(self.read_le::<u8>()?);
            let b3 = u32::from(self.read_le::<u8>()?);
            return Ok(((u32::from(first_byte) & 0x1F) << 24) | (b1 << 16) | (b2 << 8) | b3);
        }

        Err(malformed_error!("Invalid compressed uint - {}", first_byte))
    }

    /// Read a compressed signed integer as defined in ECMA-335 II.23.2.
    ///
    /// The value is stored rotated left by one with the sign in bit 0, using the same 1, 2
    /// or 4 byte layout as [`Parser::read_compressed_uint`].
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length or
    /// [`crate::Error::Malformed`] for an invalid leading byte.
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_compressed_int(&mut self) -> Result<i32> {
        let start = self.position;
        let value = self.read_compressed_uint()?;
        let magnitude = value >> 1;

        if value & 1 == 0 {
            return Ok(magnitude as i32);
        }

        let extended = match self.position - start {
            1 => magnitude | 0xFFFF_FFC0,
            2 => magnitude | 0xFFFF_E000,
            _ => magnitude | 0xF000_0000,
        };

        Ok(extended as i32)
    }

    /// Read a compressed `TypeDefOrRefOrSpecEncoded` token (ECMA-335 II.23.2.8).
    ///
    /// | Tag | Table |
    /// |-----|-------|
    /// | 0x0 | TypeDef |
    /// | 0x1 | TypeRef |
    /// | 0x2 | TypeSpec |
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length or
    /// [`crate::Error::Malformed`] for the reserved tag 0x3.
    pub fn read_compressed_token(&mut self) -> Result<Token> {
        let compressed_token = self.read_compressed_uint()?;

        let table: u32 = match compressed_token & 0x3 {
            0x0 => 0x0200_0000,
            0x1 => 0x0100_0000,
            0x2 => 0x1B00_0000,
            _ => {
                return Err(malformed_error!(
                    "Invalid compressed token - {}",
                    compressed_token
                ))
            }
        };

        Ok(Token::new(table + (compressed_token >> 2)))
    }
}
