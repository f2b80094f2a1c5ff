//! Metadata tokens.
//!
//! A token packs a table id in its high byte and a 1-based row index in the low 24 bits
//! (ECMA-335 II.22). The reader uses them to address rows across tables and to identify
//! types referenced from signatures.

use std::fmt;

/// A 32-bit metadata token: `table << 24 | row`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// Create a new token from its raw value.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Create a token from a table id byte and a row index.
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// The raw token value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The table id byte.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The 1-based row index; 0 means "no row".
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns `true` for the null token.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
