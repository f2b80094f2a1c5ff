use strum::{EnumCount, EnumIter};

use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// The coded index kinds of ECMA-335 II.24.2.6.
///
/// A coded index stores a tag in its low bits that selects one of several tables, and the row
/// index in the remaining bits.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
#[repr(usize)]
pub enum CodedIndexType {
    /// `TypeDef`, `TypeRef` or `TypeSpec`
    TypeDefOrRef,
    /// `Field`, `Param` or `Property`
    HasConstant,
    /// Anything that can carry a custom attribute
    HasCustomAttribute,
    /// `Field` or `Param`
    HasFieldMarshal,
    /// `TypeDef`, `MethodDef` or `Assembly`
    HasDeclSecurity,
    /// Parent of a `MemberRef`
    MemberRefParent,
    /// `Event` or `Property`
    HasSemantics,
    /// `MethodDef` or `MemberRef`
    MethodDefOrRef,
    /// `Field` or `MethodDef`
    MemberForwarded,
    /// `File`, `AssemblyRef` or `ExportedType`
    Implementation,
    /// Constructor of a custom attribute
    CustomAttributeType,
    /// Scope a `TypeRef` resolves in
    ResolutionScope,
    /// Owner of a generic parameter
    TypeOrMethodDef,
}

impl CodedIndexType {
    /// The tables selected by each tag value, in tag order.
    #[must_use]
    pub fn tables(&self) -> &'static [TableId] {
        match self {
            CodedIndexType::TypeDefOrRef => {
                &[TableId::TypeDef, TableId::TypeRef, TableId::TypeSpec]
            }
            CodedIndexType::HasConstant => &[TableId::Field, TableId::Param, TableId::Property],
            CodedIndexType::HasCustomAttribute => &[
                TableId::MethodDef,
                TableId::Field,
                TableId::TypeRef,
                TableId::TypeDef,
                TableId::Param,
                TableId::InterfaceImpl,
                TableId::MemberRef,
                TableId::Module,
                TableId::DeclSecurity,
                TableId::Property,
                TableId::Event,
                TableId::StandAloneSig,
                TableId::ModuleRef,
                TableId::TypeSpec,
                TableId::Assembly,
                TableId::AssemblyRef,
                TableId::File,
                TableId::ExportedType,
                TableId::ManifestResource,
                TableId::GenericParam,
                TableId::GenericParamConstraint,
                TableId::MethodSpec,
            ],
            CodedIndexType::HasFieldMarshal => &[TableId::Field, TableId::Param],
            CodedIndexType::HasDeclSecurity => {
                &[TableId::TypeDef, TableId::MethodDef, TableId::Assembly]
            }
            CodedIndexType::MemberRefParent => &[
                TableId::TypeDef,
                TableId::TypeRef,
                TableId::ModuleRef,
                TableId::MethodDef,
                TableId::TypeSpec,
            ],
            CodedIndexType::HasSemantics => &[TableId::Event, TableId::Property],
            CodedIndexType::MethodDefOrRef => &[TableId::MethodDef, TableId::MemberRef],
            CodedIndexType::MemberForwarded => &[TableId::Field, TableId::MethodDef],
            CodedIndexType::Implementation => {
                &[TableId::File, TableId::AssemblyRef, TableId::ExportedType]
            }
            // Tags 0, 1 and 4 are reserved; only 2 (MethodDef) and 3 (MemberRef) occur
            CodedIndexType::CustomAttributeType => &[
                TableId::MethodDef,
                TableId::MethodDef,
                TableId::MethodDef,
                TableId::MemberRef,
                TableId::MemberRef,
            ],
            CodedIndexType::ResolutionScope => &[
                TableId::Module,
                TableId::ModuleRef,
                TableId::AssemblyRef,
                TableId::TypeRef,
            ],
            CodedIndexType::TypeOrMethodDef => &[TableId::TypeDef, TableId::MethodDef],
        }
    }

    /// Number of low bits used by the tag.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn tag_bits(&self) -> u8 {
        let count = self.tables().len();
        (usize::BITS - (count - 1).leading_zeros()) as u8
    }
}

/// A decoded coded index.
#[derive(Clone, Debug, PartialEq)]
pub struct CodedIndex {
    /// The table the index points into
    pub tag: TableId,
    /// The 1-based row, 0 for "none"
    pub row: u32,
    /// The token for `tag` and `row`
    pub token: Token,
}

impl CodedIndex {
    /// Reads a coded index of kind `ci_type` at `offset`, advancing it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data is truncated or the tag is invalid.
    pub fn read(
        data: &[u8],
        offset: &mut usize,
        info: &TableInfoRef,
        ci_type: CodedIndexType,
    ) -> Result<Self> {
        let coded_index = read_le_at_dyn(data, offset, info.coded_index_bytes(ci_type) == 4)?;

        let (tag, row) = info.decode_coded_index(coded_index, ci_type)?;
        Ok(CodedIndex::new(tag, row))
    }

    /// Builds a coded index for `row` in `tag`.
    #[must_use]
    pub fn new(tag: TableId, row: u32) -> CodedIndex {
        CodedIndex {
            tag,
            row,
            token: Token::from_parts(tag as u8, row),
        }
    }
}
