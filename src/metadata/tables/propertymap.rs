use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `PropertyMap` table (II.22.35).
///
/// Like `TypeDef::method_list`, `property_list` starts a run of `Property` rows that ends at
/// the next map row.
#[derive(Clone, Debug)]
pub struct PropertyMapRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// `TypeDef` row owning the properties
    pub parent: u32,
    /// First `Property` row of the run
    pub property_list: u32,
}

impl RowReadable for PropertyMapRaw {
    const TABLE_ID: TableId = TableId::PropertyMap;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyMapRaw {
            rid,
            token: Token::new(0x1500_0000 + rid),
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            property_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Property))?,
        })
    }
}
