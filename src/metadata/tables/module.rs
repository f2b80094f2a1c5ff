use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `Module` table (II.22.30). Only the first row is meaningful.
#[derive(Clone, Debug)]
pub struct ModuleRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// Reserved, 0
    pub generation: u32,
    /// `#Strings` index of the module name
    pub name: u32,
    /// `#GUID` index of the module version id
    pub mvid: u32,
}

impl RowReadable for ModuleRaw {
    const TABLE_ID: TableId = TableId::Module;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let row = ModuleRaw {
            rid,
            token: Token::new(rid),
            generation: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            mvid: read_le_at_dyn(data, offset, sizes.is_large_guid())?,
        };

        // EncId and EncBaseId
        read_le_at_dyn(data, offset, sizes.is_large_guid())?;
        read_le_at_dyn(data, offset, sizes.is_large_guid())?;

        Ok(row)
    }
}
