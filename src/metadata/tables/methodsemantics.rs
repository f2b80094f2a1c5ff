use bitflags::bitflags;

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

bitflags! {
    /// `MethodSemanticsAttributes` (II.23.1.12).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MethodSemanticsAttributes: u32 {
        /// Property setter
        const SETTER = 0x0001;
        /// Property getter
        const GETTER = 0x0002;
        /// Other property or event accessor
        const OTHER = 0x0004;
        /// Event add accessor
        const ADD_ON = 0x0008;
        /// Event remove accessor
        const REMOVE_ON = 0x0010;
        /// Event raise accessor
        const FIRE = 0x0020;
    }
}

/// A row of the `MethodSemantics` table (II.22.28).
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// `MethodSemanticsAttributes`
    pub semantics: u32,
    /// `MethodDef` row of the accessor
    pub method: u32,
    /// The owning `Event` or `Property`
    pub association: CodedIndex,
}

impl RowReadable for MethodSemanticsRaw {
    const TABLE_ID: TableId = TableId::MethodSemantics;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodSemanticsRaw {
            rid,
            token: Token::new(0x1800_0000 + rid),
            semantics: u32::from(read_le_at::<u16>(data, offset)?),
            method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            association: CodedIndex::read(data, offset, sizes, CodedIndexType::HasSemantics)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::{MetadataTable, TableInfo};

    #[test]
    fn crafted_short() {
        #[rustfmt::skip]
        let data = vec![
            0x02, 0x00, // semantics: Getter
            0x03, 0x00, // method
            0x05, 0x00, // association: Property 2
        ];

        let sizes = Arc::new(TableInfo::new_test(&[], false, false, false));
        let table = MetadataTable::<MethodSemanticsRaw>::new(&data, 1, sizes).unwrap();
        let row = table.get(1).unwrap();

        assert_eq!(
            MethodSemanticsAttributes::from_bits_truncate(row.semantics),
            MethodSemanticsAttributes::GETTER
        );
        assert_eq!(row.method, 3);
        assert_eq!(row.association, CodedIndex::new(TableId::Property, 2));
    }
}
