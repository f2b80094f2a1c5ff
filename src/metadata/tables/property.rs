use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `Property` table (II.22.34).
#[derive(Clone, Debug)]
pub struct PropertyRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// `PropertyAttributes`
    pub flags: u32,
    /// `#Strings` index of the property name
    pub name: u32,
    /// `#Blob` index of the `PropertySig`
    pub signature: u32,
}

impl RowReadable for PropertyRaw {
    const TABLE_ID: TableId = TableId::Property;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyRaw {
            rid,
            token: Token::new(0x1700_0000 + rid),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
