//! Materializes the descriptor model from the metadata of a .NET module.
//!
//! [`CilModule`] is the entry point: it locates the CLI header through the PE data
//! directories, reads the metadata root and its `#~`, `#Strings` and `#Blob` streams, and
//! hands them to a [`ModuleReader`] that turns table rows into [`TypeDescriptor`]s.
//!
//! # Naming
//!
//! Names follow the conventions of the stub text the descriptors end up in:
//!
//! - type definitions and references are `Namespace.Name`, nested types `Outer/Inner`,
//! - generic instances keep the definition's simple name and list their arguments by full
//!   name, e.g. ``System.Collections.Generic.List`1<System.Int32>``,
//! - arrays, by-reference types, pointers, custom modifiers and pinned types decorate the
//!   wrapped name (`Int32[]`, `Int32[0...,0...]`, `Int32&`, `Int32*`,
//!   `Int32 modreq(System.Runtime.CompilerServices.IsVolatile)`, `Int32 pinned`),
//! - generic parameters use their declared name, or `!n` / `!!n` if it is unknown.
//!
//! # Errors
//!
//! Structural problems (missing streams, truncated tables, unreadable names) fail the whole
//! module. A method whose signature cannot be decoded is logged and left out.

use std::{collections::HashMap, ops::Range, path::Path, sync::Arc};

use log::{debug, warn};

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        root::Root,
        signatures::{SignatureArray, SignatureParser, TypeSignature},
        streams::{Blob, Strings, TablesHeader},
        tables::{
            CodedIndex, CustomAttributeRaw, GenericParamRaw, MemberRefRaw, MethodDefRaw,
            MethodSemanticsRaw, ModuleRaw, NestedClassRaw, ParamRaw, PropertyMapRaw,
            PropertyRaw, RowReadable, TableId, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
        },
        token::Token,
    },
    model::{
        MethodDescriptor, MethodFlags, MethodSemantics, ParameterDescriptor, ParameterFlags,
        PropertyDescriptor, TypeDescriptor, TypeFlags,
    },
    Error::{NotSupported, RecursionLimit},
    Result,
};

/// Size of the CLI header.
const CLI_HEADER_SIZE: usize = 72;

/// Maximum depth of nested type references (enclosing types, type specs, nested types).
const MAX_RESOLUTION_DEPTH: usize = 64;

/// A loaded .NET module: its name and its root types.
///
/// # Examples
///
/// ```rust,no_run
/// use harmonygen::CilModule;
/// use std::path::Path;
///
/// let module = CilModule::from_file(Path::new("Assembly-CSharp.dll"))?;
/// for ty in module.types() {
///     println!("{} ({} methods)", ty.full_name, ty.methods.len());
/// }
/// # Ok::<(), harmonygen::Error>(())
/// ```
#[derive(Debug)]
pub struct CilModule {
    name: String,
    types: Vec<TypeDescriptor>,
}

impl CilModule {
    /// Reads the module at `path`; the file is memory-mapped while it is read.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, and the errors of
    /// [`CilModule::from_mem`] for invalid content.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::from_file(path)?;
        Self::load(&file)
    }

    /// Reads a module from an in-memory image.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty input, [`crate::Error::GoblinErr`] if the
    /// data is not a PE file, [`crate::Error::NotSupported`] for uncompressed (`#-`) metadata,
    /// and [`crate::Error::Malformed`] or [`crate::Error::OutOfBounds`] for damaged metadata.
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        let file = File::from_mem(data)?;
        Self::load(&file)
    }

    fn load(file: &File) -> Result<Self> {
        let view = MetadataView::from_file(file)?;
        let module = ModuleReader::new(view)?.read()?;

        debug!(
            "Loaded module '{}' with {} root types",
            module.name,
            module.types.len()
        );

        Ok(module)
    }

    /// The module name from the `Module` table, empty if there is none.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The types that are not nested in another type, in table order.
    #[must_use]
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// Consumes the module, returning its root types.
    #[must_use]
    pub fn into_types(self) -> Vec<TypeDescriptor> {
        self.types
    }
}

/// The streams of a module the reader needs.
struct MetadataView<'a> {
    tables: TablesHeader<'a>,
    strings: Strings<'a>,
    blobs: Blob<'a>,
}

impl<'a> MetadataView<'a> {
    fn from_file(file: &'a File) -> Result<Self> {
        let (clr_rva, _) = file.clr()?;
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let cor20_header = Cor20Header::read(file.data_slice(clr_offset, CLI_HEADER_SIZE)?)?;

        let metadata_offset = file.rva_to_offset(cor20_header.meta_data_rva as usize)?;
        let metadata = file.data_slice(metadata_offset, cor20_header.meta_data_size as usize)?;
        let metadata_root = Root::read(metadata)?;

        let mut tables = None;
        let mut strings = None;
        let mut blobs = None;

        for stream in &metadata_root.stream_headers {
            let start = stream.offset as usize;
            let Some(stream_data) = metadata.get(start..start + stream.size as usize) else {
                return Err(crate::Error::OutOfBounds);
            };

            match stream.name.as_str() {
                "#~" => tables = Some(TablesHeader::from(stream_data)?),
                "#-" => return Err(NotSupported),
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#Blob" => blobs = Some(Blob::from(stream_data)?),
                _ => {}
            }
        }

        Ok(MetadataView {
            tables: tables.ok_or_else(|| malformed_error!("Missing #~ stream"))?,
            strings: strings.ok_or_else(|| malformed_error!("Missing #Strings stream"))?,
            blobs: blobs.ok_or_else(|| malformed_error!("Missing #Blob stream"))?,
        })
    }
}

/// Generic parameter names in scope while resolving a signature.
#[derive(Default, Clone, Copy)]
struct GenericContext<'c> {
    type_parameters: &'c [String],
    method_parameters: &'c [String],
}

/// Property accessors by `MethodDef` row.
#[derive(Default, Clone, Copy)]
struct Accessors {
    getter: Option<u32>,
    setter: Option<u32>,
}

/// Builds [`TypeDescriptor`]s from the tables of one module.
///
/// The reader indexes the relation tables (`NestedClass`, `GenericParam`, `MethodSemantics`,
/// `PropertyMap`, `CustomAttribute`) up front and then walks the `TypeDef` table once.
/// Identities of referenced types are cached by token.
pub(crate) struct ModuleReader<'a> {
    view: MetadataView<'a>,
    type_defs: Vec<TypeDefRaw>,
    method_defs: Vec<MethodDefRaw>,
    params: Vec<ParamRaw>,
    properties: Vec<PropertyRaw>,
    /// enclosing `TypeDef` row -> nested `TypeDef` rows
    nested: HashMap<u32, Vec<u32>>,
    /// nested `TypeDef` row -> enclosing `TypeDef` row
    enclosing: HashMap<u32, u32>,
    /// owner token -> parameter names, by number
    generic_parameters: HashMap<Token, Vec<String>>,
    /// `TypeDef` row -> `Property` rows
    property_ranges: HashMap<u32, Range<u32>>,
    /// `Property` row -> accessor rows
    accessors: HashMap<u32, Accessors>,
    /// `MethodDef` row -> accessor semantics
    semantics: HashMap<u32, MethodSemantics>,
    /// `MethodDef` row -> attribute type full names
    attributes: HashMap<u32, Vec<String>>,
    resolved: HashMap<Token, Arc<TypeDescriptor>>,
    depth: usize,
}

fn rows<T: RowReadable>(tables: &TablesHeader<'_>) -> Vec<T> {
    tables
        .table::<T>()
        .map(|table| table.iter().collect())
        .unwrap_or_default()
}

/// The run `[start, next_start)` of a list column, clamped to the target table.
fn run(start: u32, next_start: Option<u32>, target_rows: u32) -> Range<u32> {
    let end = next_start.unwrap_or(target_rows + 1).min(target_rows + 1);
    let start = start.max(1);
    start..end.max(start)
}

/// Creates a named type, applying the primitive rule for namespace `System`.
fn named_type(namespace: &str, name: &str) -> TypeDescriptor {
    if namespace == "System" {
        TypeDescriptor::system(name)
    } else {
        TypeDescriptor::new(namespace, name)
    }
}

/// The decoration of a general array, `[]` for rank one without bounds.
fn array_suffix(array: &SignatureArray) -> String {
    let dimensions = array
        .dimensions
        .iter()
        .map(|dimension| match (dimension.lower_bound, dimension.size) {
            (Some(lower), Some(size)) => {
                format!("{lower}...{}", i64::from(lower) + i64::from(size) - 1)
            }
            (Some(lower), None) => format!("{lower}..."),
            (None, _) => String::new(),
        })
        .collect::<Vec<_>>();

    if dimensions.len() <= 1 && dimensions.iter().all(String::is_empty) {
        return "[]".to_string();
    }

    format!("[{}]", dimensions.join(","))
}

impl<'a> ModuleReader<'a> {
    fn new(view: MetadataView<'a>) -> Result<Self> {
        let tables = &view.tables;

        let type_defs = rows::<TypeDefRaw>(tables);
        let method_defs = rows::<MethodDefRaw>(tables);
        let params = rows::<ParamRaw>(tables);
        let properties = rows::<PropertyRaw>(tables);

        let mut reader = ModuleReader {
            type_defs,
            method_defs,
            params,
            properties,
            nested: HashMap::new(),
            enclosing: HashMap::new(),
            generic_parameters: HashMap::new(),
            property_ranges: HashMap::new(),
            accessors: HashMap::new(),
            semantics: HashMap::new(),
            attributes: HashMap::new(),
            resolved: HashMap::new(),
            depth: 0,
            view,
        };

        reader.index_nesting();
        reader.index_generic_parameters()?;
        reader.index_properties();
        reader.index_attributes();

        Ok(reader)
    }

    fn index_nesting(&mut self) {
        for row in rows::<NestedClassRaw>(&self.view.tables) {
            self.nested
                .entry(row.enclosing_class)
                .or_default()
                .push(row.nested_class);
            self.enclosing.insert(row.nested_class, row.enclosing_class);
        }
    }

    fn index_generic_parameters(&mut self) -> Result<()> {
        let mut numbered: HashMap<Token, Vec<(u32, String)>> = HashMap::new();
        for row in rows::<GenericParamRaw>(&self.view.tables) {
            let name = self.view.strings.get(row.name as usize)?;
            numbered
                .entry(row.owner.token)
                .or_default()
                .push((row.number, name.to_string()));
        }

        for (owner, mut parameters) in numbered {
            parameters.sort_by_key(|(number, _)| *number);
            self.generic_parameters
                .insert(owner, parameters.into_iter().map(|(_, name)| name).collect());
        }

        Ok(())
    }

    fn index_properties(&mut self) {
        let property_rows = self.properties.len() as u32;
        let maps = rows::<PropertyMapRaw>(&self.view.tables);
        for (index, map) in maps.iter().enumerate() {
            let next = maps.get(index + 1).map(|next| next.property_list);
            self.property_ranges
                .insert(map.parent, run(map.property_list, next, property_rows));
        }

        for row in rows::<MethodSemanticsRaw>(&self.view.tables) {
            if row.association.tag != TableId::Property {
                continue;
            }

            let semantics = MethodSemantics::from_bits_truncate(row.semantics);
            *self.semantics.entry(row.method).or_default() |= semantics;

            let accessors = self.accessors.entry(row.association.row).or_default();
            if semantics.contains(MethodSemantics::GETTER) {
                accessors.getter = Some(row.method);
            }
            if semantics.contains(MethodSemantics::SETTER) {
                accessors.setter = Some(row.method);
            }
        }
    }

    fn index_attributes(&mut self) {
        for row in rows::<CustomAttributeRaw>(&self.view.tables) {
            if row.parent.tag != TableId::MethodDef {
                continue;
            }

            match self.attribute_type_name(&row.constructor) {
                Ok(Some(name)) => self.attributes.entry(row.parent.row).or_default().push(name),
                Ok(None) => {}
                Err(error) => warn!(
                    "Ignoring custom attribute {} of method {}: {}",
                    row.token, row.parent.token, error
                ),
            }
        }
    }

    /// Full name of the type declaring the attribute constructor `constructor`.
    fn attribute_type_name(&mut self, constructor: &CodedIndex) -> Result<Option<String>> {
        let declaring_type = match constructor.tag {
            TableId::MethodDef => match self.method_owner(constructor.row) {
                Some(owner) => self.type_def(owner)?,
                None => return Ok(None),
            },
            TableId::MemberRef => {
                let Some(member) = self
                    .view
                    .tables
                    .table::<MemberRefRaw>()
                    .and_then(|table| table.get(constructor.row))
                else {
                    return Err(malformed_error!("Invalid MemberRef - {}", constructor.token));
                };

                match member.class.tag {
                    TableId::TypeDef | TableId::TypeRef | TableId::TypeSpec => {
                        self.resolve_token(member.class.token, GenericContext::default())?
                    }
                    _ => return Ok(None),
                }
            }
            _ => return Ok(None),
        };

        Ok(Some(declaring_type.full_name.clone()))
    }

    fn method_range(&self, type_index: usize) -> Range<u32> {
        let next = self
            .type_defs
            .get(type_index + 1)
            .map(|next| next.method_list);
        run(
            self.type_defs[type_index].method_list,
            next,
            self.method_defs.len() as u32,
        )
    }

    fn param_range(&self, method_index: usize) -> Range<u32> {
        let next = self
            .method_defs
            .get(method_index + 1)
            .map(|next| next.param_list);
        run(
            self.method_defs[method_index].param_list,
            next,
            self.params.len() as u32,
        )
    }

    /// The `TypeDef` row owning `MethodDef` row `method`.
    fn method_owner(&self, method: u32) -> Option<u32> {
        (0..self.type_defs.len())
            .find(|index| self.method_range(*index).contains(&method))
            .map(|index| index as u32 + 1)
    }

    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_RESOLUTION_DEPTH {
            return Err(RecursionLimit(MAX_RESOLUTION_DEPTH));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Identity of `TypeDef` row `rid`, without members.
    fn type_def(&mut self, rid: u32) -> Result<Arc<TypeDescriptor>> {
        let token = Token::from_parts(TableId::TypeDef as u8, rid);
        if let Some(resolved) = self.resolved.get(&token) {
            return Ok(resolved.clone());
        }

        let Some(row) = rid
            .checked_sub(1)
            .and_then(|index| self.type_defs.get(index as usize))
        else {
            return Err(malformed_error!("Invalid TypeDef - {}", token));
        };

        let name = self.view.strings.get(row.type_name as usize)?;
        let namespace = self.view.strings.get(row.type_namespace as usize)?;

        let mut descriptor = match self.enclosing.get(&rid).copied() {
            Some(enclosing) => {
                let outer = self.guarded(|reader| reader.type_def(enclosing))?;
                let mut nested = TypeDescriptor::nested(&outer, name);
                nested.namespace = namespace.to_string();
                nested
            }
            None => named_type(namespace, name),
        };

        if let Some(parameters) = self.generic_parameters.get(&token) {
            descriptor.generic_parameters.clone_from(parameters);
            descriptor.flags |= TypeFlags::GENERIC_PARAMETERS;
        }

        let descriptor = Arc::new(descriptor);
        self.resolved.insert(token, descriptor.clone());
        Ok(descriptor)
    }

    fn type_ref(&mut self, rid: u32) -> Result<Arc<TypeDescriptor>> {
        let token = Token::from_parts(TableId::TypeRef as u8, rid);
        if let Some(resolved) = self.resolved.get(&token) {
            return Ok(resolved.clone());
        }

        let Some(row) = self
            .view
            .tables
            .table::<TypeRefRaw>()
            .and_then(|table| table.get(rid))
        else {
            return Err(malformed_error!("Invalid TypeRef - {}", token));
        };

        let name = self.view.strings.get(row.type_name as usize)?;
        let namespace = self.view.strings.get(row.type_namespace as usize)?;

        let scope = &row.resolution_scope;
        let descriptor = if scope.tag == TableId::TypeRef && scope.row != 0 {
            let outer_rid = scope.row;
            let outer = self.guarded(|reader| reader.type_ref(outer_rid))?;
            let mut nested = TypeDescriptor::nested(&outer, name);
            nested.namespace = namespace.to_string();
            nested
        } else {
            named_type(namespace, name)
        };

        let descriptor = Arc::new(descriptor);
        self.resolved.insert(token, descriptor.clone());
        Ok(descriptor)
    }

    fn type_spec(&mut self, rid: u32, context: GenericContext<'_>) -> Result<Arc<TypeDescriptor>> {
        let Some(row) = self
            .view
            .tables
            .table::<TypeSpecRaw>()
            .and_then(|table| table.get(rid))
        else {
            return Err(malformed_error!("Invalid TypeSpec - {}", rid));
        };

        let blob = self.view.blobs.get(row.signature as usize)?;
        let signature = SignatureParser::new(blob).parse_type_spec_signature()?;

        self.guarded(|reader| reader.resolve_signature(&signature, context))
    }

    fn resolve_token(&mut self, token: Token, context: GenericContext<'_>) -> Result<Arc<TypeDescriptor>> {
        match token.table() {
            0x02 => self.type_def(token.row()),
            0x01 => self.type_ref(token.row()),
            0x1B => self.type_spec(token.row(), context),
            _ => Err(malformed_error!("Invalid type token - {}", token)),
        }
    }

    fn resolve_signature(
        &mut self,
        signature: &TypeSignature,
        context: GenericContext<'_>,
    ) -> Result<Arc<TypeDescriptor>> {
        let descriptor = match signature {
            TypeSignature::Void => TypeDescriptor::system("Void"),
            TypeSignature::Boolean => TypeDescriptor::system("Boolean"),
            TypeSignature::Char => TypeDescriptor::system("Char"),
            TypeSignature::I1 => TypeDescriptor::system("SByte"),
            TypeSignature::U1 => TypeDescriptor::system("Byte"),
            TypeSignature::I2 => TypeDescriptor::system("Int16"),
            TypeSignature::U2 => TypeDescriptor::system("UInt16"),
            TypeSignature::I4 => TypeDescriptor::system("Int32"),
            TypeSignature::U4 => TypeDescriptor::system("UInt32"),
            TypeSignature::I8 => TypeDescriptor::system("Int64"),
            TypeSignature::U8 => TypeDescriptor::system("UInt64"),
            TypeSignature::R4 => TypeDescriptor::system("Single"),
            TypeSignature::R8 => TypeDescriptor::system("Double"),
            TypeSignature::I => TypeDescriptor::system("IntPtr"),
            TypeSignature::U => TypeDescriptor::system("UIntPtr"),
            TypeSignature::String => TypeDescriptor::system("String"),
            TypeSignature::Object => TypeDescriptor::system("Object"),
            TypeSignature::TypedByRef => TypeDescriptor::system("TypedReference"),
            TypeSignature::ValueType(token) | TypeSignature::Class(token) => {
                return self.resolve_token(*token, context);
            }
            TypeSignature::GenericParamType(number) => TypeDescriptor::generic_parameter(
                &context
                    .type_parameters
                    .get(*number as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("!{number}")),
            ),
            TypeSignature::GenericParamMethod(number) => TypeDescriptor::generic_parameter(
                &context
                    .method_parameters
                    .get(*number as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("!!{number}")),
            ),
            TypeSignature::SzArray(element) => {
                let element = self.resolve_inner(element, context)?;
                TypeDescriptor::array_of(&element)
            }
            TypeSignature::Array(array) => {
                let element = self.resolve_inner(&array.base, context)?;
                TypeDescriptor::wrap(&element, &array_suffix(array), TypeFlags::ARRAY)
            }
            TypeSignature::ByRef(inner) => {
                let inner = self.resolve_inner(inner, context)?;
                TypeDescriptor::by_reference(&inner)
            }
            TypeSignature::Ptr(inner) => {
                let inner = self.resolve_inner(inner, context)?;
                TypeDescriptor::wrap(&inner, "*", TypeFlags::POINTER)
            }
            TypeSignature::Pinned(inner) => {
                let inner = self.resolve_inner(inner, context)?;
                TypeDescriptor::wrap(&inner, " pinned", TypeFlags::PINNED)
            }
            TypeSignature::Modified(modifier, inner) => {
                let inner = self.resolve_inner(inner, context)?;
                let modifier_type = self.resolve_token(modifier.modifier_type, context)?;
                let keyword = if modifier.is_required { "modreq" } else { "modopt" };
                TypeDescriptor::wrap(
                    &inner,
                    &format!(" {keyword}({})", modifier_type.full_name),
                    TypeFlags::MODIFIED,
                )
            }
            TypeSignature::GenericInst(definition, arguments) => {
                let definition = self.resolve_inner(definition, context)?;
                let arguments = arguments
                    .iter()
                    .map(|argument| self.resolve_inner(argument, context))
                    .collect::<Result<Vec<_>>>()?;
                TypeDescriptor::generic_instance(&definition, &arguments)
            }
            TypeSignature::FnPtr(method) => {
                let return_type = match &method.return_type {
                    Some(return_type) => self.resolve_inner(return_type, context)?.full_name.clone(),
                    None => "System.Void".to_string(),
                };
                let parameters = method
                    .params
                    .iter()
                    .map(|parameter| {
                        self.resolve_inner(parameter, context)
                            .map(|resolved| resolved.full_name.clone())
                    })
                    .collect::<Result<Vec<_>>>()?;

                let name = format!("method {return_type} *({})", parameters.join(","));
                TypeDescriptor::new("", &name).with_flags(TypeFlags::FUNCTION_POINTER)
            }
            TypeSignature::Sentinel => {
                return Err(malformed_error!("Unexpected sentinel in type signature"));
            }
        };

        Ok(Arc::new(descriptor))
    }

    fn resolve_inner(
        &mut self,
        signature: &TypeSignature,
        context: GenericContext<'_>,
    ) -> Result<Arc<TypeDescriptor>> {
        self.guarded(|reader| reader.resolve_signature(signature, context))
    }

    fn build_method(&mut self, index: usize, type_parameters: &[String]) -> Result<MethodDescriptor> {
        let rid = index as u32 + 1;
        let row = self.method_defs[index].clone();

        let name = self.view.strings.get(row.name as usize)?.to_string();
        let generic_parameters = self
            .generic_parameters
            .get(&row.token)
            .cloned()
            .unwrap_or_default();

        let blob = self.view.blobs.get(row.signature as usize)?;
        let signature = SignatureParser::new(blob).parse_method_signature()?;

        let context = GenericContext {
            type_parameters,
            method_parameters: &generic_parameters,
        };

        let return_type = match &signature.return_type {
            Some(return_type) => self.resolve_signature(return_type, context)?,
            None => Arc::new(TypeDescriptor::system("Void")),
        };

        let param_rows = self.param_range(index);
        let mut parameters = Vec::with_capacity(signature.params.len());
        for (position, parameter) in signature.params.iter().enumerate() {
            let sequence = position as u32 + 1;
            let parameter_type = self.resolve_signature(parameter, context)?;

            let declared = param_rows
                .clone()
                .filter_map(|param_rid| self.params.get(param_rid as usize - 1))
                .find(|param| param.sequence == sequence);

            let (name, flags) = match declared {
                Some(param) => (
                    self.view.strings.get(param.name as usize)?.to_string(),
                    ParameterFlags::from_bits_truncate(param.flags),
                ),
                None => (String::new(), ParameterFlags::empty()),
            };

            parameters.push(ParameterDescriptor {
                name,
                parameter_type,
                flags,
                sequence,
            });
        }

        Ok(MethodDescriptor {
            name,
            flags: MethodFlags::from_bits_truncate(row.flags),
            semantics: self.semantics.get(&rid).copied().unwrap_or_default(),
            return_type,
            parameters,
            generic_parameters,
            custom_attributes: self.attributes.get(&rid).cloned().unwrap_or_default(),
        })
    }

    fn build_type(&mut self, rid: u32) -> Result<TypeDescriptor> {
        let identity = self.type_def(rid)?;
        let mut ty = identity.identity();
        let type_parameters = ty.generic_parameters.clone();

        let mut by_rid = HashMap::new();
        for method_rid in self.method_range(rid as usize - 1) {
            match self.build_method(method_rid as usize - 1, &type_parameters) {
                Ok(method) => {
                    let method = Arc::new(method);
                    by_rid.insert(method_rid, method.clone());
                    ty.methods.push(method);
                }
                Err(error) => warn!(
                    "Skipping method {} of {}: {}",
                    Token::from_parts(TableId::MethodDef as u8, method_rid),
                    ty.full_name,
                    error
                ),
            }
        }

        if let Some(range) = self.property_ranges.get(&rid).cloned() {
            for property_rid in range {
                let Some(row) = self.properties.get(property_rid as usize - 1) else {
                    continue;
                };

                let name = self.view.strings.get(row.name as usize)?;
                let accessors = self.accessors.get(&property_rid).copied().unwrap_or_default();
                let lookup = |accessor: Option<u32>| accessor.and_then(|rid| by_rid.get(&rid).cloned());

                ty.properties.push(PropertyDescriptor::new(
                    name,
                    lookup(accessors.getter),
                    lookup(accessors.setter),
                ));
            }
        }

        let nested = self.nested.get(&rid).cloned().unwrap_or_default();
        for nested_rid in nested {
            let nested_type = self.guarded(|reader| reader.build_type(nested_rid))?;
            ty.nested_types.push(nested_type);
        }

        Ok(ty)
    }

    fn read(mut self) -> Result<CilModule> {
        let name = match self
            .view
            .tables
            .table::<ModuleRaw>()
            .and_then(|table| table.get(1))
        {
            Some(module) => self.view.strings.get(module.name as usize)?.to_string(),
            None => String::new(),
        };

        let mut types = Vec::new();
        for rid in 1..=self.type_defs.len() as u32 {
            if self.enclosing.contains_key(&rid) {
                continue;
            }

            types.push(self.build_type(rid)?);
        }

        Ok(CilModule { name, types })
    }
}
