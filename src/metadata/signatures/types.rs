use crate::metadata::token::Token;

/// Element type codes used in signature blobs (ECMA-335 II.23.1.16).
#[allow(non_snake_case, missing_docs)]
pub mod ELEMENT_TYPE {
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    pub const PTR: u8 = 0x0f;
    pub const BYREF: u8 = 0x10;
    pub const VALUETYPE: u8 = 0x11;
    pub const CLASS: u8 = 0x12;
    pub const VAR: u8 = 0x13;
    pub const ARRAY: u8 = 0x14;
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    pub const I: u8 = 0x18;
    pub const U: u8 = 0x19;
    pub const FNPTR: u8 = 0x1b;
    pub const OBJECT: u8 = 0x1c;
    pub const SZARRAY: u8 = 0x1d;
    pub const MVAR: u8 = 0x1e;
    pub const CMOD_REQD: u8 = 0x1f;
    pub const CMOD_OPT: u8 = 0x20;
    pub const SENTINEL: u8 = 0x41;
    pub const PINNED: u8 = 0x45;
}

/// A type as written in a signature blob.
///
/// Named types are kept as unresolved `TypeDefOrRefOrSpec` tokens; turning them into names is
/// done by the module reader, which has the tables at hand.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSignature {
    Void,
    Boolean,
    Char,
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    I8,
    U8,
    R4,
    R8,
    String,
    I,
    U,
    Object,
    TypedByRef,
    /// Unmanaged pointer to the inner type
    Ptr(Box<TypeSignature>),
    /// Managed reference to the inner type
    ByRef(Box<TypeSignature>),
    /// A value type named by token
    ValueType(Token),
    /// A reference type named by token
    Class(Token),
    /// Generic parameter of the enclosing type, by position
    GenericParamType(u32),
    /// Generic parameter of the enclosing method, by position
    GenericParamMethod(u32),
    /// General array with rank and bounds
    Array(SignatureArray),
    /// Single-dimensional, zero-based array
    SzArray(Box<TypeSignature>),
    /// Instantiation of a generic type definition with type arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
    /// A custom modifier applied to the inner type
    Modified(CustomModifier, Box<TypeSignature>),
    /// Pinned local
    Pinned(Box<TypeSignature>),
    /// Vararg sentinel
    Sentinel,
}

/// A `modreq` or `modopt` annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomModifier {
    /// `true` for `modreq`, `false` for `modopt`
    pub is_required: bool,
    /// The modifier type
    pub modifier_type: Token,
}

/// Bounds of a single array dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArrayDimensions {
    /// Declared size
    pub size: Option<u32>,
    /// Declared lower bound
    pub lower_bound: Option<i32>,
}

/// A general (`ELEMENT_TYPE_ARRAY`) array.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureArray {
    /// Element type
    pub base: Box<TypeSignature>,
    /// Number of dimensions
    pub rank: u32,
    /// One entry per dimension, `rank` entries in total
    pub dimensions: Vec<ArrayDimensions>,
}

/// A `MethodDefSig`, `MethodRefSig` or standalone method signature (II.23.2.1 - II.23.2.3).
#[derive(Debug, Clone, PartialEq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct SignatureMethod {
    /// Instance method, an implicit `this` is passed
    pub has_this: bool,
    /// `this` is written explicitly as the first parameter
    pub explicit_this: bool,
    /// Variable argument list
    pub vararg: bool,
    /// Number of generic parameters
    pub param_count_generic: u32,
    /// Return type, `None` only for a default-constructed signature
    pub return_type: Option<TypeSignature>,
    /// Declared parameters
    pub params: Vec<TypeSignature>,
    /// Parameters after the vararg sentinel
    pub varargs: Vec<TypeSignature>,
}

/// A `PropertySig` (II.23.2.5).
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureProperty {
    /// Instance property
    pub has_this: bool,
    /// Property type
    pub base: TypeSignature,
    /// Indexer parameters
    pub params: Vec<TypeSignature>,
}
