use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{CodedIndexType, TableId},
    Error::OutOfBounds,
    Result,
};

/// Row count of a table and the width needed to index into it.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows in the table
    pub rows: u32,
    /// Bits needed to represent a row index
    pub bits: u8,
    /// Whether simple indices into the table are 4 bytes wide
    pub is_large: bool,
}

impl TableRowInfo {
    /// Computes the index width for a table with `rows` rows.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts and derived index widths of every table in a `#~` stream.
///
/// All column widths of the tables stream depend on this information: heap indices grow to
/// four bytes when the `HeapSizes` flags say so, simple table indices when the target table
/// has more than 65535 rows, and coded indices when the largest target table no longer fits
/// next to the tag bits in 16 bits (ECMA-335 II.24.2.6).
#[derive(Clone, Default, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared reference to a [`TableInfo`].
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Reads the row counts that follow the fixed 24-byte `#~` header.
    ///
    /// Row counts exist for every bit set in `valid_bitvec`, including tables this reader
    /// does not know about; those are skipped.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row count array is truncated.
    pub fn new(data: &[u8], valid_bitvec: u64) -> Result<Self> {
        let mut rows = vec![TableRowInfo::default(); TableId::COUNT];
        let mut next_row_offset = 24;

        for bit in 0..64_usize {
            if (valid_bitvec & (1 << bit)) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            if let Some(slot) = rows.get_mut(bit) {
                *slot = TableRowInfo::new(row_count);
            }
        }

        let Some(heap_size_flags) = data.get(6).copied() else {
            return Err(OutOfBounds);
        };

        let mut table_info = TableInfo {
            rows,
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_size_flags & 1 == 1,
            is_large_index_guid: heap_size_flags & 2 == 2,
            is_large_index_blob: heap_size_flags & 4 == 4,
        };

        table_info.calculate_coded_index_bits();

        Ok(table_info)
    }

    /// Builds a `TableInfo` from explicit row counts.
    #[cfg(test)]
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
        };

        for (id, rows) in valid_tables {
            table_info.rows[*id as usize] = TableRowInfo::new(*rows);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Splits a raw coded index into the target table and row.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the tag does not name a table of the coded
    /// index type.
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tables = coded_index_type.tables();
        let tag_bits = coded_index_type.tag_bits();
        let tag_mask = (1 << tag_bits) - 1;

        let tag = (value & tag_mask) as usize;
        let index = value >> tag_bits;

        match tables.get(tag) {
            Some(table) => Ok((*table, index)),
            None => Err(OutOfBounds),
        }
    }

    /// Whether simple indices into `id` are 4 bytes wide.
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// Whether `#Strings` indices are 4 bytes wide.
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// Whether `#GUID` indices are 4 bytes wide.
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// Whether `#Blob` indices are 4 bytes wide.
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Row information of `table`.
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.rows[table_id as usize].bits > 16 {
            4
        } else {
            2
        }
    }

    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let max_bits = coded_index
                .tables()
                .iter()
                .map(|table| self.rows[*table as usize].bits)
                .max()
                .unwrap_or(1);

            self.coded_indexes[coded_index as usize] = max_bits + coded_index.tag_bits();
        }
    }
}
