//! Typed access to the metadata tables of a `#~` stream.
//!
//! Every table is a dense array of fixed-size rows whose column widths depend on the row
//! counts of other tables and on the heap size flags. [`TableInfo`] captures those widths,
//! [`TableId::row_size`] turns them into row sizes for every table, and [`MetadataTable`]
//! gives lazy, bounds-checked access to the rows of the tables the module reader consumes.
//!
//! Rows are read into `*Raw` structs that keep heap indices and coded indices unresolved;
//! resolving names and signatures is the job of [`crate::metadata::reader`].

mod codedindex;
mod customattribute;
mod genericparam;
mod memberref;
mod methoddef;
mod methodsemantics;
mod module;
mod nestedclass;
mod param;
mod property;
mod propertymap;
mod tableid;
mod tableinfo;
mod typedef;
mod typeref;
mod typespec;

use std::marker::PhantomData;

pub use codedindex::{CodedIndex, CodedIndexType};
pub use customattribute::CustomAttributeRaw;
pub use genericparam::GenericParamRaw;
pub use memberref::MemberRefRaw;
pub use methoddef::{MethodAttributes, MethodDefRaw};
pub use methodsemantics::{MethodSemanticsAttributes, MethodSemanticsRaw};
pub use module::ModuleRaw;
pub use nestedclass::NestedClassRaw;
pub use param::{ParamAttributes, ParamRaw};
pub use property::PropertyRaw;
pub use propertymap::PropertyMapRaw;
pub use tableid::TableId;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};
pub use typedef::TypeDefRaw;
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;

use crate::{Error::OutOfBounds, Result};

/// A row type that can be decoded from a metadata table.
pub trait RowReadable: Sized {
    /// The table the rows live in.
    const TABLE_ID: TableId;

    /// Reads the row with id `rid` at `offset`, advancing `offset` past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// A view over the rows of one table.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Creates a view over `row_count` rows starting at the beginning of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` cannot hold all rows.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = T::TABLE_ID.row_size(&sizes);
        let size = u64::from(row_count) * u64::from(row_size);
        if size > data.len() as u64 {
            return Err(OutOfBounds);
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Total size of the table in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of a single row in bytes.
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Reads the row with the 1-based id `index`.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<T> {
        if index == 0 || self.row_count < index {
            return None;
        }

        T::row_read(
            self.data,
            &mut ((index as usize - 1) * self.row_size as usize),
            index,
            &self.sizes,
        )
        .ok()
    }

    /// Iterates over all rows in order.
    #[must_use]
    pub fn iter(&self) -> TableIterator<'_, 'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'t, 'a, T: RowReadable> IntoIterator for &'t MetadataTable<'a, T> {
    type Item = T;
    type IntoIter = TableIterator<'t, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over the rows of a [`MetadataTable`].
pub struct TableIterator<'t, 'a, T> {
    table: &'t MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<T: RowReadable> Iterator for TableIterator<'_, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        match T::row_read(
            self.table.data,
            &mut self.current_offset,
            self.current_row + 1,
            &self.table.sizes,
        ) {
            Ok(row) => {
                self.current_row += 1;
                Some(row)
            }
            Err(_) => None,
        }
    }
}
