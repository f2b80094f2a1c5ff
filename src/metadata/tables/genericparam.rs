use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `GenericParam` table (II.22.20).
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// Position of the parameter in the owner's parameter list
    pub number: u32,
    /// `GenericParamAttributes`
    pub flags: u32,
    /// The owning `TypeDef` or `MethodDef`
    pub owner: CodedIndex,
    /// `#Strings` index of the parameter name
    pub name: u32,
}

impl RowReadable for GenericParamRaw {
    const TABLE_ID: TableId = TableId::GenericParam;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(GenericParamRaw {
            rid,
            token: Token::new(0x2A00_0000 + rid),
            number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            owner: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeOrMethodDef)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}
