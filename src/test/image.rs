//! Builds minimal managed PE images in memory.
//!
//! The image is a PE32 DLL with one `.text` section at RVA 0x2000 (file offset 0x200). The
//! section starts with the CLI header; the metadata root follows at RVA 0x2050 with the `#~`,
//! `#Strings` and `#Blob` streams. Only the tables the module reader consumes are emitted,
//! all with 2-byte indices, so builders are limited to small modules.
//!
//! ```rust,ignore
//! let mut image = ImageBuilder::new();
//! let int = vec![sig::I4];
//! image.add_type(
//!     TypeDefBuilder::new("N", "C").with_method(
//!         MethodDefBuilder::new("Compute", sig::method(false, &int, &[int.clone()]))
//!             .with_flags(METHOD_STATIC)
//!             .with_param("x"),
//!     ),
//! );
//! let bytes = image.build();
//! ```

#![allow(dead_code)]

use std::collections::HashMap;

/// RVA of the `.text` section and of the CLI header at its start.
pub const TEXT_RVA: u32 = 0x2000;
/// File offset of the `.text` section.
pub const TEXT_OFFSET: u32 = 0x200;
/// Offset of the metadata root inside the `.text` section.
const METADATA_START: usize = 0x50;
const FILE_ALIGNMENT: u32 = 0x200;
const SECTION_ALIGNMENT: u32 = 0x2000;
const PE_HEADER_OFFSET: usize = 0x80;

/// `MethodAttributes.Static`
pub const METHOD_STATIC: u16 = 0x0010;
/// `MethodAttributes.SpecialName | RTSpecialName | HideBySig | Public`
pub const METHOD_SPECIAL: u16 = 0x1886;
/// `MethodAttributes.Public | HideBySig`
pub const METHOD_PUBLIC: u16 = 0x0086;
/// `ParamAttributes.Out`
pub const PARAM_OUT: u16 = 0x0002;

/// Signature blob encoders (ECMA-335 II.23.2).
pub mod sig {
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const U1: u8 = 0x05;
    pub const I4: u8 = 0x08;
    pub const I8: u8 = 0x0a;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    pub const I: u8 = 0x18;
    pub const OBJECT: u8 = 0x1c;

    /// Compressed unsigned integer.
    pub fn compress(value: u32) -> Vec<u8> {
        match value {
            0..=0x7F => vec![value as u8],
            0x80..=0x3FFF => vec![0x80 | (value >> 8) as u8, value as u8],
            _ => vec![
                0xC0 | (value >> 24) as u8,
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            ],
        }
    }

    fn tagged(element: u8, coded: u32) -> Vec<u8> {
        let mut bytes = vec![element];
        bytes.extend(compress(coded));
        bytes
    }

    fn wrapped(element: u8, inner: &[u8]) -> Vec<u8> {
        let mut bytes = vec![element];
        bytes.extend_from_slice(inner);
        bytes
    }

    /// `CLASS` naming TypeRef row `rid`.
    pub fn class_ref(rid: u32) -> Vec<u8> {
        tagged(0x12, (rid << 2) | 1)
    }

    /// `VALUETYPE` naming TypeRef row `rid`.
    pub fn value_ref(rid: u32) -> Vec<u8> {
        tagged(0x11, (rid << 2) | 1)
    }

    /// `CLASS` naming TypeDef row `rid`.
    pub fn class_def(rid: u32) -> Vec<u8> {
        tagged(0x12, rid << 2)
    }

    /// `CLASS` naming TypeSpec row `rid`.
    pub fn class_spec(rid: u32) -> Vec<u8> {
        tagged(0x12, (rid << 2) | 2)
    }

    pub fn sz_array(element: &[u8]) -> Vec<u8> {
        wrapped(0x1d, element)
    }

    /// General array with all sizes and lower bounds given, bounds non-negative.
    pub fn array(element: &[u8], rank: u32, sizes: &[u32], lower_bounds: &[u32]) -> Vec<u8> {
        let mut bytes = wrapped(0x14, element);
        bytes.extend(compress(rank));
        bytes.extend(compress(sizes.len() as u32));
        for size in sizes {
            bytes.extend(compress(*size));
        }
        bytes.extend(compress(lower_bounds.len() as u32));
        for bound in lower_bounds {
            bytes.extend(compress(bound << 1));
        }
        bytes
    }

    pub fn by_ref(inner: &[u8]) -> Vec<u8> {
        wrapped(0x10, inner)
    }

    pub fn ptr(inner: &[u8]) -> Vec<u8> {
        wrapped(0x0f, inner)
    }

    /// `modreq(TypeRef rid) inner`
    pub fn mod_req(rid: u32, inner: &[u8]) -> Vec<u8> {
        let mut bytes = tagged(0x1f, (rid << 2) | 1);
        bytes.extend_from_slice(inner);
        bytes
    }

    pub fn generic_inst(definition: &[u8], arguments: &[Vec<u8>]) -> Vec<u8> {
        let mut bytes = wrapped(0x15, definition);
        bytes.extend(compress(arguments.len() as u32));
        for argument in arguments {
            bytes.extend_from_slice(argument);
        }
        bytes
    }

    pub fn var(number: u32) -> Vec<u8> {
        tagged(0x13, number)
    }

    pub fn mvar(number: u32) -> Vec<u8> {
        tagged(0x1e, number)
    }

    /// `MethodDefSig`; `has_this` for instance methods.
    pub fn method(has_this: bool, ret: &[u8], params: &[Vec<u8>]) -> Vec<u8> {
        generic_method(has_this, 0, ret, params)
    }

    /// `MethodDefSig` with `generic_count` method type parameters, none if 0.
    pub fn generic_method(has_this: bool, generic_count: u32, ret: &[u8], params: &[Vec<u8>]) -> Vec<u8> {
        let mut convention = if has_this { 0x20 } else { 0x00 };
        if generic_count > 0 {
            convention |= 0x10;
        }

        let mut bytes = vec![convention];
        if generic_count > 0 {
            bytes.extend(compress(generic_count));
        }
        bytes.extend(compress(params.len() as u32));
        bytes.extend_from_slice(ret);
        for param in params {
            bytes.extend_from_slice(param);
        }
        bytes
    }

    /// `PropertySig` without index parameters.
    pub fn property(has_this: bool, ty: &[u8]) -> Vec<u8> {
        let mut bytes = vec![if has_this { 0x28 } else { 0x08 }, 0x00];
        bytes.extend_from_slice(ty);
        bytes
    }
}

/// A method row and its parameter rows.
#[derive(Clone, Debug)]
pub struct MethodDefBuilder {
    name: String,
    flags: u16,
    signature: Vec<u8>,
    params: Vec<(u16, u16, String)>,
    generic_parameters: Vec<String>,
    extension: bool,
}

impl MethodDefBuilder {
    /// A public instance method; `signature` must match the flags.
    pub fn new(name: &str, signature: Vec<u8>) -> Self {
        MethodDefBuilder {
            name: name.to_string(),
            flags: METHOD_PUBLIC,
            signature,
            params: Vec::new(),
            generic_parameters: Vec::new(),
            extension: false,
        }
    }

    /// Replaces the flags, keeping `Public | HideBySig` out of the caller's way.
    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = METHOD_PUBLIC | flags;
        self
    }

    /// Names the next parameter.
    pub fn with_param(self, name: &str) -> Self {
        self.with_param_row(0, name)
    }

    /// Names the next parameter and marks it `out`.
    pub fn with_out_param(self, name: &str) -> Self {
        self.with_param_row(PARAM_OUT, name)
    }

    fn with_param_row(mut self, flags: u16, name: &str) -> Self {
        let sequence = self.params.iter().filter(|(seq, _, _)| *seq > 0).count() as u16 + 1;
        self.params.push((sequence, flags, name.to_string()));
        self
    }

    /// Adds the `Sequence = 0` row describing the return value.
    pub fn with_return_param(mut self) -> Self {
        self.params.insert(0, (0, 0, String::new()));
        self
    }

    pub fn with_generic_parameters(mut self, names: &[&str]) -> Self {
        self.generic_parameters = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Marks the method with `ExtensionAttribute`.
    pub fn extension(mut self) -> Self {
        self.extension = true;
        self
    }
}

#[derive(Clone, Debug)]
struct PropertyDefBuilder {
    name: String,
    signature: Vec<u8>,
    getter: Option<usize>,
    setter: Option<usize>,
}

/// A type row with its methods and properties.
#[derive(Clone, Debug)]
pub struct TypeDefBuilder {
    namespace: String,
    name: String,
    flags: u32,
    generic_parameters: Vec<String>,
    methods: Vec<MethodDefBuilder>,
    properties: Vec<PropertyDefBuilder>,
}

impl TypeDefBuilder {
    /// A public class.
    pub fn new(namespace: &str, name: &str) -> Self {
        TypeDefBuilder {
            namespace: namespace.to_string(),
            name: name.to_string(),
            flags: 0x0010_0001,
            generic_parameters: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn with_generic_parameters(mut self, names: &[&str]) -> Self {
        self.generic_parameters = names.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_method(mut self, method: MethodDefBuilder) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a property whose accessors are the methods at the given positions of this type.
    pub fn with_property(
        mut self,
        name: &str,
        signature: Vec<u8>,
        getter: Option<usize>,
        setter: Option<usize>,
    ) -> Self {
        self.properties.push(PropertyDefBuilder {
            name: name.to_string(),
            signature,
            getter,
            setter,
        });
        self
    }
}

/// Deduplicating `#Strings` heap writer.
#[derive(Default)]
struct StringHeap {
    data: Vec<u8>,
    offsets: HashMap<String, u16>,
}

impl StringHeap {
    fn new() -> Self {
        StringHeap {
            data: vec![0],
            offsets: HashMap::new(),
        }
    }

    fn add(&mut self, value: &str) -> u16 {
        if value.is_empty() {
            return 0;
        }
        if let Some(offset) = self.offsets.get(value) {
            return *offset;
        }

        let offset = self.data.len() as u16;
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
        self.offsets.insert(value.to_string(), offset);
        offset
    }
}

struct BlobHeap {
    data: Vec<u8>,
}

impl BlobHeap {
    fn new() -> Self {
        BlobHeap { data: vec![0] }
    }

    fn add(&mut self, blob: &[u8]) -> u16 {
        let offset = self.data.len() as u16;
        self.data.extend(sig::compress(blob.len() as u32));
        self.data.extend_from_slice(blob);
        offset
    }
}

/// One metadata table being written, 2-byte columns unless stated otherwise.
#[derive(Default)]
struct Table {
    rows: u32,
    data: Vec<u8>,
}

impl Table {
    fn row(&mut self, columns: &[u16]) {
        self.rows += 1;
        for column in columns {
            self.data.extend_from_slice(&column.to_le_bytes());
        }
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn pad_to(out: &mut Vec<u8>, alignment: usize) {
    while out.len() % alignment != 0 {
        out.push(0);
    }
}

fn align(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

/// Builds a managed PE image from type definitions.
///
/// `TypeDef` row 1 is `<Module>`, as in every compiler-produced module.
pub struct ImageBuilder {
    module_name: String,
    types: Vec<TypeDefBuilder>,
    nested: Vec<(u32, u32)>,
    type_refs: Vec<(u16, String, String)>,
    type_specs: Vec<Vec<u8>>,
    raw_blobs: Vec<(u32, Vec<u8>)>,
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBuilder {
    pub fn new() -> Self {
        ImageBuilder {
            module_name: "Test.dll".to_string(),
            types: vec![TypeDefBuilder {
                flags: 0,
                ..TypeDefBuilder::new("", "<Module>")
            }],
            nested: Vec::new(),
            type_refs: Vec::new(),
            type_specs: Vec::new(),
            raw_blobs: Vec::new(),
        }
    }

    pub fn with_module_name(mut self, name: &str) -> Self {
        self.module_name = name.to_string();
        self
    }

    /// The `TypeDef` row the next added type will get.
    pub fn next_type(&self) -> u32 {
        self.types.len() as u32 + 1
    }

    /// Adds a root type and returns its `TypeDef` row.
    pub fn add_type(&mut self, ty: TypeDefBuilder) -> u32 {
        self.types.push(ty);
        self.types.len() as u32
    }

    /// Adds a type nested in `TypeDef` row `enclosing` and returns its row.
    pub fn add_nested_type(&mut self, enclosing: u32, ty: TypeDefBuilder) -> u32 {
        let rid = self.add_type(ty);
        self.nested.push((rid, enclosing));
        rid
    }

    /// Returns the `TypeRef` row for `namespace.name`, adding it on first use.
    pub fn type_ref(&mut self, namespace: &str, name: &str) -> u32 {
        // ResolutionScope: Module row 1
        self.type_ref_in(1 << 2, namespace, name)
    }

    /// Returns the `TypeRef` row for `name` nested in `TypeRef` row `outer`.
    pub fn nested_type_ref(&mut self, outer: u32, name: &str) -> u32 {
        self.type_ref_in(((outer << 2) | 3) as u16, "", name)
    }

    fn type_ref_in(&mut self, scope: u16, namespace: &str, name: &str) -> u32 {
        if let Some(index) = self
            .type_refs
            .iter()
            .position(|(s, ns, n)| *s == scope && ns == namespace && n == name)
        {
            return index as u32 + 1;
        }

        self.type_refs
            .push((scope, namespace.to_string(), name.to_string()));
        self.type_refs.len() as u32
    }

    /// Adds a `TypeSpec` row with the given signature and returns its row.
    pub fn type_spec(&mut self, signature: Vec<u8>) -> u32 {
        self.type_specs.push(signature);
        self.type_specs.len() as u32
    }

    /// Assembles the image.
    pub fn build(mut self) -> Vec<u8> {
        let metadata = self.metadata();
        image(&metadata)
    }

    fn metadata(&mut self) -> Vec<u8> {
        let needs_extension = self
            .types
            .iter()
            .flat_map(|ty| &ty.methods)
            .any(|method| method.extension);
        let extension_ref = needs_extension
            .then(|| self.type_ref("System.Runtime.CompilerServices", "ExtensionAttribute"));

        let mut strings = StringHeap::new();
        let mut blobs = BlobHeap::new();

        let mut module = Table::default();
        let mut type_ref = Table::default();
        let mut type_def = Table::default();
        let mut method_def = Table::default();
        let mut param = Table::default();
        let mut member_ref = Table::default();
        let mut custom_attribute = Table::default();
        let mut property_map = Table::default();
        let mut property = Table::default();
        let mut method_semantics = Table::default();
        let mut type_spec = Table::default();
        let mut nested_class = Table::default();
        let mut generic_param = Table::default();

        let name = strings.add(&self.module_name);
        module.row(&[0, name, 0, 0, 0]);

        for (scope, namespace, name) in &self.type_refs {
            let name = strings.add(name);
            let namespace = strings.add(namespace);
            type_ref.row(&[*scope, name, namespace]);
        }

        let extension_ctor = extension_ref.map(|rid| {
            let name = strings.add(".ctor");
            let signature = blobs.add(&[0x20, 0x00, 0x01]);
            // MemberRefParent: TypeRef
            member_ref.row(&[((rid << 3) | 1) as u16, name, signature]);
            member_ref.rows
        });

        let mut generic_rows = Vec::new();
        let mut method_rid = 1_u32;
        let mut param_rid = 1_u32;
        let mut property_rid = 1_u32;

        for (index, ty) in self.types.iter().enumerate() {
            let type_rid = index as u32 + 1;
            let name = strings.add(&ty.name);
            let namespace = strings.add(&ty.namespace);

            type_def.rows += 1;
            put_u32(&mut type_def.data, ty.flags);
            for column in [name, namespace, 0, 1, method_rid as u16] {
                put_u16(&mut type_def.data, column);
            }

            for (number, parameter) in ty.generic_parameters.iter().enumerate() {
                // TypeOrMethodDef: TypeDef
                generic_rows.push((number as u16, (type_rid << 1) as u16, parameter.clone()));
            }

            let first_method = method_rid;
            for method in &ty.methods {
                let name = strings.add(&method.name);
                let signature = blobs.add(&method.signature);

                method_def.rows += 1;
                put_u32(&mut method_def.data, 0);
                for column in [0, method.flags, name, signature, param_rid as u16] {
                    put_u16(&mut method_def.data, column);
                }

                for (sequence, flags, name) in &method.params {
                    let name = strings.add(name);
                    param.row(&[*flags, *sequence, name]);
                    param_rid += 1;
                }

                for (number, parameter) in method.generic_parameters.iter().enumerate() {
                    // TypeOrMethodDef: MethodDef
                    generic_rows.push((
                        number as u16,
                        ((method_rid << 1) | 1) as u16,
                        parameter.clone(),
                    ));
                }

                if let (true, Some(ctor)) = (method.extension, extension_ctor) {
                    let value = blobs.add(&[0x01, 0x00, 0x00, 0x00]);
                    // HasCustomAttribute: MethodDef, CustomAttributeType: MemberRef
                    custom_attribute.row(&[(method_rid << 5) as u16, ((ctor << 3) | 3) as u16, value]);
                }

                method_rid += 1;
            }

            if !ty.properties.is_empty() {
                property_map.row(&[type_rid as u16, property_rid as u16]);
            }

            for prop in &ty.properties {
                let name = strings.add(&prop.name);
                let signature = blobs.add(&prop.signature);
                property.row(&[0, name, signature]);

                // HasSemantics: Property
                let association = ((property_rid << 1) | 1) as u16;
                if let Some(getter) = prop.getter {
                    method_semantics.row(&[0x0002, (first_method + getter as u32) as u16, association]);
                }
                if let Some(setter) = prop.setter {
                    method_semantics.row(&[0x0001, (first_method + setter as u32) as u16, association]);
                }

                property_rid += 1;
            }
        }

        for signature in &self.type_specs {
            let blob = blobs.add(signature);
            type_spec.row(&[blob]);
        }

        for (nested, enclosing) in &self.nested {
            nested_class.row(&[*nested as u16, *enclosing as u16]);
        }

        for (number, owner, name) in generic_rows {
            let name = strings.add(&name);
            generic_param.row(&[number, 0, owner, name]);
        }

        let tables = [
            (0x00, module),
            (0x01, type_ref),
            (0x02, type_def),
            (0x06, method_def),
            (0x08, param),
            (0x0A, member_ref),
            (0x0C, custom_attribute),
            (0x15, property_map),
            (0x17, property),
            (0x18, method_semantics),
            (0x1B, type_spec),
            (0x29, nested_class),
            (0x2A, generic_param),
        ];

        let mut stream = Vec::new();
        put_u32(&mut stream, 0);
        stream.push(2);
        stream.push(0);
        stream.push(0); // HeapSizes: all small
        stream.push(1);

        let valid = tables
            .iter()
            .filter(|(_, table)| table.rows > 0)
            .fold(0_u64, |valid, (id, _)| valid | (1 << id));
        stream.extend_from_slice(&valid.to_le_bytes());
        stream.extend_from_slice(&0_u64.to_le_bytes());

        for (_, table) in tables.iter().filter(|(_, table)| table.rows > 0) {
            put_u32(&mut stream, table.rows);
        }
        for (_, table) in &tables {
            stream.extend_from_slice(&table.data);
        }
        pad_to(&mut stream, 4);

        let mut string_data = strings.data;
        pad_to(&mut string_data, 4);
        let mut blob_data = blobs.data;
        pad_to(&mut blob_data, 4);

        metadata_root(&[
            ("#~", stream),
            ("#Strings", string_data),
            ("#Blob", blob_data),
        ])
    }

    /// Replaces the blob of `MethodDef` row `rid` with raw bytes, for malformed signatures.
    pub fn with_method_signature(mut self, rid: u32, signature: Vec<u8>) -> Self {
        let mut remaining = rid;
        for ty in &mut self.types {
            if (remaining as usize) <= ty.methods.len() {
                ty.methods[remaining as usize - 1].signature = signature;
                break;
            }
            remaining -= ty.methods.len() as u32;
        }
        self
    }
}

/// Metadata root followed by `streams`, each already padded to 4 bytes.
fn metadata_root(streams: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let version = b"v4.0.30319\0\0";

    let header_len = 16
        + version.len()
        + 4
        + streams
            .iter()
            .map(|(name, _)| 8 + (name.len() + 1).div_ceil(4) * 4)
            .sum::<usize>();

    let mut root = Vec::new();
    root.extend_from_slice(b"BSJB");
    put_u16(&mut root, 1);
    put_u16(&mut root, 1);
    put_u32(&mut root, 0);
    put_u32(&mut root, version.len() as u32);
    root.extend_from_slice(version);
    put_u16(&mut root, 0);
    put_u16(&mut root, streams.len() as u16);

    let mut offset = header_len;
    for (name, data) in streams {
        put_u32(&mut root, offset as u32);
        put_u32(&mut root, data.len() as u32);
        root.extend_from_slice(name.as_bytes());
        root.push(0);
        pad_to(&mut root, 4);
        offset += data.len();
    }

    for (_, data) in streams {
        root.extend_from_slice(data);
    }
    root
}

/// Wraps `metadata` into a PE32 DLL.
fn image(metadata: &[u8]) -> Vec<u8> {
    let mut text = Vec::new();
    put_u32(&mut text, 72);
    put_u16(&mut text, 2);
    put_u16(&mut text, 5);
    put_u32(&mut text, TEXT_RVA + METADATA_START as u32);
    put_u32(&mut text, metadata.len() as u32);
    put_u32(&mut text, 0x0000_0001); // COMIMAGE_FLAGS_ILONLY
    put_u32(&mut text, 0);
    text.resize(72, 0);
    text.resize(METADATA_START, 0);
    text.extend_from_slice(metadata);

    let virtual_size = text.len() as u32;
    let raw_size = align(virtual_size, FILE_ALIGNMENT);
    let image_size = TEXT_RVA + align(virtual_size, SECTION_ALIGNMENT);

    let mut out = vec![0_u8; PE_HEADER_OFFSET];
    out[0] = b'M';
    out[1] = b'Z';
    out[0x3C..0x40].copy_from_slice(&(PE_HEADER_OFFSET as u32).to_le_bytes());

    out.extend_from_slice(b"PE\0\0");

    // COFF header
    put_u16(&mut out, 0x014C);
    put_u16(&mut out, 1);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    put_u16(&mut out, 0xE0);
    put_u16(&mut out, 0x2102);

    // Optional header, standard fields
    put_u16(&mut out, 0x010B);
    out.push(8);
    out.push(0);
    put_u32(&mut out, raw_size);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    put_u32(&mut out, TEXT_RVA);
    put_u32(&mut out, 0);

    // Optional header, windows fields
    put_u32(&mut out, 0x1000_0000);
    put_u32(&mut out, SECTION_ALIGNMENT);
    put_u32(&mut out, FILE_ALIGNMENT);
    put_u16(&mut out, 4);
    put_u16(&mut out, 0);
    put_u16(&mut out, 0);
    put_u16(&mut out, 0);
    put_u16(&mut out, 4);
    put_u16(&mut out, 0);
    put_u32(&mut out, 0);
    put_u32(&mut out, image_size);
    put_u32(&mut out, TEXT_OFFSET);
    put_u32(&mut out, 0);
    put_u16(&mut out, 3);
    put_u16(&mut out, 0x8540);
    put_u32(&mut out, 0x0010_0000);
    put_u32(&mut out, 0x1000);
    put_u32(&mut out, 0x0010_0000);
    put_u32(&mut out, 0x1000);
    put_u32(&mut out, 0);
    put_u32(&mut out, 16);

    // Data directories, only the CLR runtime header (14) is set
    for index in 0..16 {
        if index == 14 {
            put_u32(&mut out, TEXT_RVA);
            put_u32(&mut out, 72);
        } else {
            put_u32(&mut out, 0);
            put_u32(&mut out, 0);
        }
    }

    // Section table
    out.extend_from_slice(b".text\0\0\0");
    put_u32(&mut out, virtual_size);
    put_u32(&mut out, TEXT_RVA);
    put_u32(&mut out, raw_size);
    put_u32(&mut out, TEXT_OFFSET);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    put_u16(&mut out, 0);
    put_u16(&mut out, 0);
    put_u32(&mut out, 0x6000_0020);

    out.resize(TEXT_OFFSET as usize, 0);
    out.extend_from_slice(&text);
    out.resize((TEXT_OFFSET + raw_size) as usize, 0);
    out
}
