use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `TypeRef` table (II.22.38).
#[derive(Clone, Debug)]
pub struct TypeRefRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// Module, `ModuleRef`, `AssemblyRef` or enclosing `TypeRef`
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}

impl RowReadable for TypeRefRaw {
    const TABLE_ID: TableId = TableId::TypeRef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeRefRaw {
            rid,
            token: Token::new(0x0100_0000 + rid),
            resolution_scope: CodedIndex::read(data, offset, sizes, CodedIndexType::ResolutionScope)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}
