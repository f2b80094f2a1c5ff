//! The `#Strings` heap (ECMA-335 II.24.2.3).

use std::ffi::CStr;

use crate::{Error::OutOfBounds, Result};

/// Null-terminated UTF-8 identifiers, addressed by byte offset.
///
/// # Examples
///
/// ```rust,ignore
/// use harmonygen::metadata::streams::Strings;
///
/// let data = &[0u8, b'I', b'n', b't', b'3', b'2', 0u8];
/// let strings = Strings::from(data)?;
/// assert_eq!(strings.get(1)?, "Int32");
/// # Ok::<(), harmonygen::Error>(())
/// ```
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Wraps the raw heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with the
    /// empty string.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Provided #Strings heap is empty"));
        }

        Ok(Strings { data })
    }

    /// Returns the string starting at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `index` is outside the heap and
    /// [`crate::Error::Malformed`] if the string is unterminated or not UTF-8.
    pub fn get(&self, index: usize) -> Result<&'a str> {
        let Some(tail) = self.data.get(index..) else {
            return Err(OutOfBounds);
        };

        CStr::from_bytes_until_nul(tail)
            .ok()
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| malformed_error!("Invalid string at index - {}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data = [
            0x00,
            b'<', b'M', b'o', b'd', b'u', b'l', b'e', b'>', 0x00,
            b'S', b'y', b's', b't', b'e', b'm', 0x00,
            b'I', b'n', b't', b'3', b'2', 0x00,
        ];

        let strings = Strings::from(&data).unwrap();

        assert_eq!(strings.get(0).unwrap(), "");
        assert_eq!(strings.get(1).unwrap(), "<Module>");
        assert_eq!(strings.get(10).unwrap(), "System");
        assert_eq!(strings.get(17).unwrap(), "Int32");
        assert_eq!(strings.get(19).unwrap(), "t32");
        assert!(strings.get(100).is_err());
    }

    #[test]
    fn invalid_heap() {
        assert!(Strings::from(&[]).is_err());
        assert!(Strings::from(&[b'A', 0x00]).is_err());

        let strings = Strings::from(&[0x00, b'A']).unwrap();
        assert!(strings.get(1).is_err());
    }
}
