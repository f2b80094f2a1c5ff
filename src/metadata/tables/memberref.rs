use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `MemberRef` table (II.22.25).
///
/// Custom attribute constructors defined in other assemblies are `MemberRef`s whose class is
/// the attribute's `TypeRef`.
#[derive(Clone, Debug)]
pub struct MemberRefRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// Declaring type or module
    pub class: CodedIndex,
    /// `#Strings` index of the member name
    pub name: u32,
    /// `#Blob` index of the member signature
    pub signature: u32,
}

impl RowReadable for MemberRefRaw {
    const TABLE_ID: TableId = TableId::MemberRef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MemberRefRaw {
            rid,
            token: Token::new(0x0A00_0000 + rid),
            class: CodedIndex::read(data, offset, sizes, CodedIndexType::MemberRefParent)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
