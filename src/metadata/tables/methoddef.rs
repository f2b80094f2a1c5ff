use bitflags::bitflags;

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

bitflags! {
    /// The subset of `MethodAttributes` (II.23.1.10) the stub generator looks at.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct MethodAttributes: u32 {
        /// Defined on the type rather than per instance
        const STATIC = 0x0010;
        /// Cannot be overridden
        const FINAL = 0x0020;
        /// Virtual method
        const VIRTUAL = 0x0040;
        /// Method hides by name and signature
        const HIDE_BY_SIG = 0x0080;
        /// Method is abstract
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// Runtime checks the name encoding
        const RT_SPECIAL_NAME = 0x1000;
    }
}

/// A row of the `MethodDef` table (II.22.26).
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// RVA of the method body, 0 for abstract and extern methods
    pub rva: u32,
    /// `MethodImplAttributes`
    pub impl_flags: u32,
    /// `MethodAttributes`
    pub flags: u32,
    /// `#Strings` index of the method name
    pub name: u32,
    /// `#Blob` index of the `MethodDefSig`
    pub signature: u32,
    /// First `Param` row owned by this method
    pub param_list: u32,
}

impl RowReadable for MethodDefRaw {
    const TABLE_ID: TableId = TableId::MethodDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::new(0x0600_0000 + rid),
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
        })
    }
}
