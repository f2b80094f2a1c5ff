//! The compressed `#~` tables stream (ECMA-335 II.24.2.6).
//!
//! The stream starts with a fixed 24-byte header, followed by one `u32` row count per bit set
//! in the `valid` vector, followed by the tables themselves in table-id order. Because every
//! row size depends on the row counts of other tables, the header computes the start offset
//! of each table up front and hands out typed [`MetadataTable`] views on request.

use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Error::OutOfBounds,
    Result,
};

/// The parsed header of a `#~` stream.
pub struct TablesHeader<'a> {
    /// Major version of the table schema, 2
    pub major_version: u8,
    /// Minor version of the table schema, 0
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    data: &'a [u8],
    locations: Vec<Option<(usize, u32)>>,
}

impl<'a> TablesHeader<'a> {
    /// Parses the header and locates every known table in `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the header or a table is truncated, and
    /// [`crate::Error::Malformed`] if no tables are present.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let mut offset = 4;
        let major_version = read_le_at::<u8>(data, &mut offset)?;
        let minor_version = read_le_at::<u8>(data, &mut offset)?;
        offset = 8;
        let valid = read_le_at::<u64>(data, &mut offset)?;
        let sorted = read_le_at::<u64>(data, &mut offset)?;

        if valid == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let info = Arc::new(TableInfo::new(data, valid)?);

        let mut locations = vec![None; TableId::COUNT];
        let mut current_offset = 24 + valid.count_ones() as usize * 4;
        for table_id in TableId::iter() {
            let rows = info.get(table_id).rows;
            if rows == 0 {
                continue;
            }

            let size = u64::from(rows) * u64::from(table_id.row_size(&info));
            let Ok(size) = usize::try_from(size) else {
                return Err(OutOfBounds);
            };

            match current_offset.checked_add(size) {
                Some(end) if end <= data.len() => {
                    locations[table_id as usize] = Some((current_offset, rows));
                    current_offset = end;
                }
                _ => return Err(OutOfBounds),
            }
        }

        Ok(TablesHeader {
            major_version,
            minor_version,
            valid,
            sorted,
            info,
            data,
            locations,
        })
    }

    /// Number of rows in `table`, 0 if absent.
    #[must_use]
    pub fn table_row_count(&self, table: TableId) -> u32 {
        self.info.get(table).rows
    }

    /// Returns a typed view of the table holding `T` rows, if it has any rows.
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<MetadataTable<'a, T>> {
        let (offset, rows) = self.locations[T::TABLE_ID as usize]?;
        let data = self.data.get(offset..)?;

        MetadataTable::new(data, rows, self.info.clone()).ok()
    }
}
