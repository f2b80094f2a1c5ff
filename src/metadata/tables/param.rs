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
    /// `ParamAttributes` (II.23.1.13).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ParamAttributes: u32 {
        /// Param is `[In]`
        const IN = 0x0001;
        /// Param is `[Out]`
        const OUT = 0x0002;
        /// Param is optional
        const OPTIONAL = 0x0010;
        /// Param has a default value
        const HAS_DEFAULT = 0x1000;
        /// Param has marshalling information
        const HAS_FIELD_MARSHAL = 0x2000;
    }
}

/// A row of the `Param` table (II.22.33).
///
/// Sequence 0 describes the return value; declared parameters start at 1.
#[derive(Clone, Debug)]
pub struct ParamRaw {
    /// Row id
    pub rid: u32,
    /// Metadata token
    pub token: Token,
    /// `ParamAttributes`
    pub flags: u32,
    /// Position of the parameter in the signature
    pub sequence: u32,
    /// `#Strings` index of the name, 0 for unnamed
    pub name: u32,
}

impl RowReadable for ParamRaw {
    const TABLE_ID: TableId = TableId::Param;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ParamRaw {
            rid,
            token: Token::new(0x0800_0000 + rid),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            sequence: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}
