use strum::{EnumCount, EnumIter};

use crate::metadata::tables::{CodedIndexType, TableInfo};

/// Identifiers of the metadata tables in a `#~` stream (ECMA-335 II.22).
///
/// The discriminant is the table number, which is also the bit position in the `valid`
/// vector and the high byte of every token pointing into the table.
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TableId {
    /// The current module
    Module = 0x00,
    /// References to types defined in other modules or assemblies
    TypeRef = 0x01,
    /// Types defined in this module
    TypeDef = 0x02,
    /// Field indirection, only present in unoptimized metadata
    FieldPtr = 0x03,
    /// Field definitions
    Field = 0x04,
    /// Method indirection, only present in unoptimized metadata
    MethodPtr = 0x05,
    /// Method definitions
    MethodDef = 0x06,
    /// Parameter indirection, only present in unoptimized metadata
    ParamPtr = 0x07,
    /// Parameter definitions
    Param = 0x08,
    /// Interfaces implemented by types
    InterfaceImpl = 0x09,
    /// References to fields and methods of other types
    MemberRef = 0x0A,
    /// Compile-time constants
    Constant = 0x0B,
    /// Custom attribute instances
    CustomAttribute = 0x0C,
    /// Marshalling descriptors
    FieldMarshal = 0x0D,
    /// Declarative security
    DeclSecurity = 0x0E,
    /// Explicit class layouts
    ClassLayout = 0x0F,
    /// Explicit field offsets
    FieldLayout = 0x10,
    /// Standalone signatures
    StandAloneSig = 0x11,
    /// Type to event list mapping
    EventMap = 0x12,
    /// Event indirection, only present in unoptimized metadata
    EventPtr = 0x13,
    /// Event definitions
    Event = 0x14,
    /// Type to property list mapping
    PropertyMap = 0x15,
    /// Property indirection, only present in unoptimized metadata
    PropertyPtr = 0x16,
    /// Property definitions
    Property = 0x17,
    /// Accessor methods of properties and events
    MethodSemantics = 0x18,
    /// Explicit method overrides
    MethodImpl = 0x19,
    /// References to other modules
    ModuleRef = 0x1A,
    /// Type specifications
    TypeSpec = 0x1B,
    /// P/Invoke mappings
    ImplMap = 0x1C,
    /// Field initial data
    FieldRVA = 0x1D,
    /// Edit-and-continue log
    EncLog = 0x1E,
    /// Edit-and-continue map
    EncMap = 0x1F,
    /// The current assembly
    Assembly = 0x20,
    /// Unused
    AssemblyProcessor = 0x21,
    /// Unused
    AssemblyOS = 0x22,
    /// Referenced assemblies
    AssemblyRef = 0x23,
    /// Unused
    AssemblyRefProcessor = 0x24,
    /// Unused
    AssemblyRefOS = 0x25,
    /// Files of a multi-file assembly
    File = 0x26,
    /// Types forwarded or exported from other modules
    ExportedType = 0x27,
    /// Manifest resources
    ManifestResource = 0x28,
    /// Nesting relationships between type definitions
    NestedClass = 0x29,
    /// Generic parameters of types and methods
    GenericParam = 0x2A,
    /// Generic method instantiations
    MethodSpec = 0x2B,
    /// Constraints on generic parameters
    GenericParamConstraint = 0x2C,
}

impl TableId {
    /// Size in bytes of a single row of this table, given the index widths in `info`.
    #[must_use]
    #[rustfmt::skip]
    pub fn row_size(self, info: &TableInfo) -> u32 {
        let s = u32::from(info.str_bytes());
        let g = u32::from(info.guid_bytes());
        let b = u32::from(info.blob_bytes());
        let t = |id: TableId| u32::from(info.table_index_bytes(id));
        let c = |ci: CodedIndexType| u32::from(info.coded_index_bytes(ci));

        match self {
            TableId::Module                 => 2 + s + g + g + g,
            TableId::TypeRef                => c(CodedIndexType::ResolutionScope) + s + s,
            TableId::TypeDef                => 4 + s + s + c(CodedIndexType::TypeDefOrRef) + t(TableId::Field) + t(TableId::MethodDef),
            TableId::FieldPtr               => t(TableId::Field),
            TableId::Field                  => 2 + s + b,
            TableId::MethodPtr              => t(TableId::MethodDef),
            TableId::MethodDef              => 4 + 2 + 2 + s + b + t(TableId::Param),
            TableId::ParamPtr               => t(TableId::Param),
            TableId::Param                  => 2 + 2 + s,
            TableId::InterfaceImpl          => t(TableId::TypeDef) + c(CodedIndexType::TypeDefOrRef),
            TableId::MemberRef              => c(CodedIndexType::MemberRefParent) + s + b,
            TableId::Constant               => 2 + c(CodedIndexType::HasConstant) + b,
            TableId::CustomAttribute        => c(CodedIndexType::HasCustomAttribute) + c(CodedIndexType::CustomAttributeType) + b,
            TableId::FieldMarshal           => c(CodedIndexType::HasFieldMarshal) + b,
            TableId::DeclSecurity           => 2 + c(CodedIndexType::HasDeclSecurity) + b,
            TableId::ClassLayout            => 2 + 4 + t(TableId::TypeDef),
            TableId::FieldLayout            => 4 + t(TableId::Field),
            TableId::StandAloneSig          => b,
            TableId::EventMap               => t(TableId::TypeDef) + t(TableId::Event),
            TableId::EventPtr               => t(TableId::Event),
            TableId::Event                  => 2 + s + c(CodedIndexType::TypeDefOrRef),
            TableId::PropertyMap            => t(TableId::TypeDef) + t(TableId::Property),
            TableId::PropertyPtr            => t(TableId::Property),
            TableId::Property               => 2 + s + b,
            TableId::MethodSemantics        => 2 + t(TableId::MethodDef) + c(CodedIndexType::HasSemantics),
            TableId::MethodImpl             => t(TableId::TypeDef) + c(CodedIndexType::MethodDefOrRef) * 2,
            TableId::ModuleRef              => s,
            TableId::TypeSpec               => b,
            TableId::ImplMap                => 2 + c(CodedIndexType::MemberForwarded) + s + t(TableId::ModuleRef),
            TableId::FieldRVA               => 4 + t(TableId::Field),
            TableId::EncLog                 => 4 + 4,
            TableId::EncMap                 => 4,
            TableId::Assembly               => 4 + 2 * 4 + 4 + b + s + s,
            TableId::AssemblyProcessor      => 4,
            TableId::AssemblyOS             => 4 + 4 + 4,
            TableId::AssemblyRef            => 2 * 4 + 4 + b + s + s + b,
            TableId::AssemblyRefProcessor   => 4 + t(TableId::AssemblyRef),
            TableId::AssemblyRefOS          => 4 + 4 + 4 + t(TableId::AssemblyRef),
            TableId::File                   => 4 + s + b,
            TableId::ExportedType           => 4 + 4 + s + s + c(CodedIndexType::Implementation),
            TableId::ManifestResource       => 4 + 4 + s + c(CodedIndexType::Implementation),
            TableId::NestedClass            => t(TableId::TypeDef) + t(TableId::TypeDef),
            TableId::GenericParam           => 2 + 2 + c(CodedIndexType::TypeOrMethodDef) + s,
            TableId::MethodSpec             => c(CodedIndexType::MethodDefOrRef) + b,
            TableId::GenericParamConstraint => t(TableId::GenericParam) + c(CodedIndexType::TypeDefOrRef),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn discriminants_are_contiguous() {
        for (index, id) in TableId::iter().enumerate() {
            assert_eq!(id as usize, index);
        }
        assert_eq!(TableId::COUNT, 0x2D);
    }

    #[test]
    fn row_sizes_small_indices() {
        let info = TableInfo::new_test(&[], false, false, false);

        assert_eq!(TableId::Module.row_size(&info), 10);
        assert_eq!(TableId::TypeRef.row_size(&info), 6);
        assert_eq!(TableId::TypeDef.row_size(&info), 14);
        assert_eq!(TableId::MethodDef.row_size(&info), 14);
        assert_eq!(TableId::Param.row_size(&info), 6);
        assert_eq!(TableId::CustomAttribute.row_size(&info), 6);
        assert_eq!(TableId::Assembly.row_size(&info), 22);
        assert_eq!(TableId::AssemblyRef.row_size(&info), 20);
    }

    #[test]
    fn row_sizes_large_heaps() {
        let info = TableInfo::new_test(&[(TableId::MethodDef, 0x1_0000)], true, true, true);

        assert_eq!(TableId::TypeDef.row_size(&info), 4 + 4 + 4 + 2 + 2 + 4);
        assert_eq!(TableId::MethodDef.row_size(&info), 4 + 2 + 2 + 4 + 4 + 2);
        assert_eq!(TableId::MethodSemantics.row_size(&info), 2 + 4 + 2);
    }
}
