//! In-memory backend for modules that are already loaded into a buffer.

use super::Backend;
use crate::{Error::OutOfBounds, Result};

/// Owns the raw bytes of a module read from somewhere other than a path.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a new memory backend that takes ownership of `data`.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        self.data.get(offset..offset_end).ok_or(OutOfBounds)
    }

    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory() {
        let mut data = vec![0xCC_u8; 64];
        data[10..15].copy_from_slice(&[0xBB; 5]);

        let memory = Memory::new(data);

        assert_eq!(memory.len(), 64);
        assert_eq!(memory.data()[0], 0xCC);
        assert_eq!(memory.data_slice(10, 5).unwrap(), &[0xBB; 5]);
        assert!(memory.data_slice(usize::MAX, 2).is_err());
        assert!(memory.data_slice(0, 65).is_err());
    }

    #[test]
    fn memory_empty() {
        let memory = Memory::new(Vec::new());

        assert_eq!(memory.len(), 0);
        assert!(memory.data_slice(0, 1).is_err());
        assert_eq!(memory.data_slice(0, 0).unwrap(), &[] as &[u8]);
    }
}
