//! Bounds-checked little-endian reads for PE and metadata parsing.
//!
//! Everything in a .NET image that the reader touches is little-endian: PE headers, the CLR
//! header, the metadata root, the tables stream and heap indices. The helpers here read a
//! fixed-size integer out of a byte slice, optionally advancing an offset, and return
//! [`crate::Error::OutOfBounds`] instead of panicking when the slice is too short.
//!
//! # Examples
//!
//! ```rust,ignore
//! use harmonygen::file::io::{read_le, read_le_at, read_le_at_dyn};
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
//! assert_eq!(read_le::<u16>(&data)?, 1);
//!
//! let mut offset = 2;
//! assert_eq!(read_le_at::<u16>(&data, &mut offset)?, 2);
//! assert_eq!(read_le_at_dyn(&data, &mut offset, true)?, 3);
//! assert_eq!(offset, 8);
//! # Ok::<(), harmonygen::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Fixed-size integers that can be decoded from little-endian bytes.
pub trait CilIO: Sized {
    /// Byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_cil_io {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_cil_io! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
}

/// Reads a `T` from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `T`.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Reads a `T` at `offset` and advances `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };

    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Reads a 4-byte value when `is_large`, otherwise a 2-byte value promoted to `u32`.
///
/// Heap and table indices in the tables stream switch between both widths depending on the
/// heap sizes and row counts of the module.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    let res = if is_large {
        read_le_at::<u32>(data, offset)?
    } else {
        u32::from(read_le_at::<u16>(data, offset)?)
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_le_values() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

        assert_eq!(read_le::<u8>(&data).unwrap(), 0x01);
        assert_eq!(read_le::<u16>(&data).unwrap(), 0x0201);
        assert_eq!(read_le::<u32>(&data).unwrap(), 0x0403_0201);
        assert_eq!(read_le::<u64>(&data).unwrap(), 0x0807_0605_0403_0201);
        assert_eq!(read_le::<i8>(&[0xFF]).unwrap(), -1);
    }

    #[test]
    fn read_le_at_advances() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
        let mut offset = 0;

        assert_eq!(read_le_at::<u16>(&data, &mut offset).unwrap(), 1);
        assert_eq!(offset, 2);
        assert_eq!(read_le_at::<u32>(&data, &mut offset).unwrap(), 2);
        assert_eq!(offset, 6);
        assert!(matches!(
            read_le_at::<u8>(&data, &mut offset),
            Err(OutOfBounds)
        ));
        assert_eq!(offset, 6);
    }

    #[test]
    fn read_le_at_dyn_widths() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
        let mut offset = 0;

        assert_eq!(read_le_at_dyn(&data, &mut offset, false).unwrap(), 1);
        assert_eq!(read_le_at_dyn(&data, &mut offset, true).unwrap(), 2);
        assert_eq!(offset, 6);
    }

    #[test]
    fn read_le_overflowing_offset() {
        let data = [0x00; 4];
        let mut offset = usize::MAX;

        assert!(matches!(
            read_le_at::<u32>(&data, &mut offset),
            Err(OutOfBounds)
        ));
    }
}
