use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `TypeDef` table (II.22.37).
///
/// `method_list` is the first `MethodDef` row owned by the type; the run extends to the
/// `method_list` of the next row, or to the end of the `MethodDef` table for the last type.
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// `TypeAttributes`
    pub flags: u32,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// Base type, row 0 for none
    pub extends: CodedIndex,
    /// First `Field` row owned by this type
    pub field_list: u32,
    /// First `MethodDef` row owned by this type
    pub method_list: u32,
}

impl RowReadable for TypeDefRaw {
    const TABLE_ID: TableId = TableId::TypeDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeDefRaw {
            rid,
            token: Token::new(0x0200_0000 + rid),
            flags: read_le_at::<u32>(data, offset)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            extends: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
            field_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Field))?,
            method_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
        })
    }
}
